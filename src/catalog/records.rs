//! Doctor directory record types
//!
//! Flat value types mirroring the `doctors.json` / `mapping.json` dataset
//! format. Optional list fields may be absent or `null` in the source data;
//! the slice accessors below treat both as empty.

use serde::{Deserialize, Serialize};

/// A single doctor in the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub doctor_id: String,
    pub full_name: String,
    #[serde(default)]
    pub name_variants: Option<Vec<String>>,
    #[serde(default)]
    pub npi: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub conditions: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub insurances: Option<Vec<InsuranceRecord>>,
    #[serde(default)]
    pub appointment: Option<AppointmentRecord>,
    #[serde(default)]
    pub locations: Option<Vec<LocationRecord>>,
    #[serde(default)]
    pub ratings: Option<Vec<RatingRecord>>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub sources: Option<Vec<SourceRecord>>,
}

impl DoctorRecord {
    pub fn name_variants(&self) -> &[String] {
        self.name_variants.as_deref().unwrap_or(&[])
    }

    pub fn languages(&self) -> &[String] {
        self.languages.as_deref().unwrap_or(&[])
    }

    pub fn insurances(&self) -> &[InsuranceRecord] {
        self.insurances.as_deref().unwrap_or(&[])
    }

    /// All practice locations; the first one is the primary location
    pub fn locations(&self) -> &[LocationRecord] {
        self.locations.as_deref().unwrap_or(&[])
    }

    pub fn primary_location(&self) -> Option<&LocationRecord> {
        self.locations().first()
    }

    pub fn sources(&self) -> &[SourceRecord] {
        self.sources.as_deref().unwrap_or(&[])
    }

    /// Whether any of the doctor's specialties is in `labels` (exact label match)
    pub fn has_any_specialty(&self, labels: &[String]) -> bool {
        self.specialties.iter().any(|sp| labels.contains(sp))
    }
}

/// Accepted insurance plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsuranceRecord {
    #[serde(default)]
    pub payer_code: Option<String>,
    #[serde(default)]
    pub payer_name: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub verified_at: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl InsuranceRecord {
    /// Display label: `payer_name (plan)`, else payer name, else payer code
    pub fn display_label(&self) -> String {
        match (non_empty(&self.payer_name), non_empty(&self.plan)) {
            (Some(name), Some(plan)) => format!("{} ({})", name, plan),
            (Some(name), None) => name.to_string(),
            _ => non_empty(&self.payer_code).unwrap_or_default().to_string(),
        }
    }
}

/// Booking channels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentRecord {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub online_portals: Option<Vec<PortalRecord>>,
    #[serde(default)]
    pub walk_in: Option<bool>,
}

impl AppointmentRecord {
    pub fn online_portals(&self) -> &[PortalRecord] {
        self.online_portals.as_deref().unwrap_or(&[])
    }
}

/// Online booking portal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalRecord {
    #[serde(rename = "type", default)]
    pub portal_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Practice location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(default)]
    pub clinic_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

/// Third-party rating
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Provenance of a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub crawled_at: Option<String>,
}

/// One row of the condition -> specialty mapping table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionMappingEntry {
    /// Synonyms for the condition, matched as substrings of the query
    #[serde(default)]
    pub condition: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_doctor_deserialize_minimal() {
        let doctor: DoctorRecord = serde_json::from_value(json!({
            "doctor_id": "d1",
            "full_name": "Dr. Alice Wong",
            "languages": null
        }))
        .unwrap();

        assert!(doctor.specialties.is_empty());
        assert!(doctor.languages().is_empty());
        assert!(doctor.locations().is_empty());
        assert!(doctor.primary_location().is_none());
        assert!(doctor.appointment.is_none());
    }

    #[test]
    fn test_portal_type_rename() {
        let portal: PortalRecord =
            serde_json::from_value(json!({"type": "zocdoc", "url": "https://x"})).unwrap();
        assert_eq!(portal.portal_type.as_deref(), Some("zocdoc"));

        let back = serde_json::to_value(&portal).unwrap();
        assert_eq!(back["type"], "zocdoc");
    }

    #[test]
    fn test_insurance_display_label() {
        let both = InsuranceRecord {
            payer_code: Some("BCBS".into()),
            payer_name: Some("Blue Cross".into()),
            plan: Some("PPO".into()),
            ..Default::default()
        };
        assert_eq!(both.display_label(), "Blue Cross (PPO)");

        let name_only = InsuranceRecord {
            payer_name: Some("Aetna".into()),
            ..Default::default()
        };
        assert_eq!(name_only.display_label(), "Aetna");

        let code_only = InsuranceRecord {
            payer_code: Some("UHC".into()),
            plan: Some("HMO".into()),
            ..Default::default()
        };
        assert_eq!(code_only.display_label(), "UHC");

        assert_eq!(InsuranceRecord::default().display_label(), "");
    }
}
