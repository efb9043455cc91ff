//! Bilingual triage note attached to every search response

use crate::error::AppError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of the advisory note
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResponseLanguage {
    #[default]
    En,
    Zh,
}

impl ResponseLanguage {
    pub fn code(self) -> &'static str {
        match self {
            ResponseLanguage::En => "en",
            ResponseLanguage::Zh => "zh",
        }
    }
}

impl fmt::Display for ResponseLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ResponseLanguage {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(ResponseLanguage::En),
            "zh" => Ok(ResponseLanguage::Zh),
            other => Err(AppError::InvalidInput(format!(
                "Unsupported response language '{}', expected 'en' or 'zh'",
                other
            ))),
        }
    }
}

/// Build the triage note for `query` and the detected specialties
///
/// Always ends with the emergency and not-medical-advice disclaimers.
pub fn build_note(lang: ResponseLanguage, query: &str, specialties: &[String]) -> String {
    let joined = specialties.join(", ");
    match (lang, specialties.is_empty()) {
        (ResponseLanguage::Zh, false) => format!(
            "根据您的查询“{}”，建议首先考虑以下科室：{}。如出现胸痛、呼吸困难、晕厥等急症，请立刻拨打 911 或前往急诊。此信息仅供参考，不构成诊断。",
            query, joined
        ),
        (ResponseLanguage::Zh, true) => format!(
            "未能从“{}”明确识别科室。建议提供具体症状或已知诊断，并在紧急情况下拨打 911。此信息仅供参考，不构成诊断。",
            query
        ),
        (ResponseLanguage::En, false) => format!(
            "For your query '{}', consider the following specialties: {}. If you have red-flag symptoms (e.g., chest pain, shortness of breath, syncope), call 911 or go to the ER. This is not medical advice.",
            query, joined
        ),
        (ResponseLanguage::En, true) => format!(
            "Could not confidently map '{}' to a specialty. Please provide more detail on symptoms or a known diagnosis. For emergencies, call 911. This is not medical advice.",
            query
        ),
    }
}
