//! Boolean doctor filters (city, state, insurance, language)
//!
//! Supplied filters are AND-combined. A filter counts as supplied when its
//! raw value is a non-empty string. City and state are exact matches on
//! normalized text; insurance and language are substring matches.

use super::normalize::{normalize, normalize_opt};
use crate::catalog::DoctorRecord;
use serde::{Deserialize, Serialize};

/// Optional request filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub city: Option<String>,
    pub state: Option<String>,
    /// Payer code or payer name fragment
    pub insurance: Option<String>,
    pub language: Option<String>,
}

impl SearchFilters {
    pub fn city(&self) -> Option<&str> {
        supplied(&self.city)
    }

    pub fn state(&self) -> Option<&str> {
        supplied(&self.state)
    }

    pub fn insurance(&self) -> Option<&str> {
        supplied(&self.insurance)
    }

    pub fn language(&self) -> Option<&str> {
        supplied(&self.language)
    }

    /// Whether any filter was supplied
    pub fn is_active(&self) -> bool {
        self.city().is_some()
            || self.state().is_some()
            || self.insurance().is_some()
            || self.language().is_some()
    }

    /// Whether `doctor` passes every supplied filter
    pub fn matches(&self, doctor: &DoctorRecord) -> bool {
        if let Some(city) = self.city() {
            if !city_matches(doctor, city) {
                return false;
            }
        }
        if let Some(state) = self.state() {
            if !state_matches(doctor, state) {
                return false;
            }
        }
        if let Some(insurance) = self.insurance() {
            if !insurance_matches(doctor, insurance) {
                return false;
            }
        }
        if let Some(language) = self.language() {
            if !language_matches(doctor, language) {
                return false;
            }
        }
        true
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Some location's city equals `city` (normalized, exact)
pub fn city_matches(doctor: &DoctorRecord, city: &str) -> bool {
    let wanted = normalize(city);
    doctor
        .locations()
        .iter()
        .filter_map(|loc| loc.city.as_deref().filter(|c| !c.is_empty()))
        .any(|c| normalize(c) == wanted)
}

/// Some location's state equals `state` (normalized, exact)
pub fn state_matches(doctor: &DoctorRecord, state: &str) -> bool {
    let wanted = normalize(state);
    doctor
        .locations()
        .iter()
        .filter_map(|loc| loc.state.as_deref().filter(|s| !s.is_empty()))
        .any(|s| normalize(s) == wanted)
}

/// `insurance` is contained in some payer code or some payer name
pub fn insurance_matches(doctor: &DoctorRecord, insurance: &str) -> bool {
    let wanted = normalize(insurance);
    doctor.insurances().iter().any(|ins| {
        normalize_opt(ins.payer_code.as_deref()).contains(&wanted)
            || normalize_opt(ins.payer_name.as_deref()).contains(&wanted)
    })
}

/// `language` is contained in some spoken language
pub fn language_matches(doctor: &DoctorRecord, language: &str) -> bool {
    let wanted = normalize(language);
    doctor
        .languages()
        .iter()
        .any(|lang| normalize(lang).contains(&wanted))
}
