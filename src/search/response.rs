//! Response shapes returned by `SearchEngine::search`

use super::ranking::{round_score, ScoredDoctor};
use crate::catalog::records::{PortalRecord, SourceRecord};
use crate::catalog::DoctorRecord;
use serde::Serialize;

/// Full search response: analysis block plus one page of doctors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub analysis: Analysis,
    pub doctors: Vec<DoctorCard>,
}

/// Detected specialties and the triage note
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub specialties: Vec<String>,
    pub triage_note: String,
}

/// Display row for one ranked doctor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorCard {
    pub doctor_id: String,
    pub name: String,
    pub specialties: Vec<String>,
    pub languages: Vec<String>,
    pub insurances: Vec<String>,
    pub appointment: AppointmentCard,
    pub location: LocationCard,
    pub sources: Vec<SourceRecord>,
    /// Rounded to three decimals
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentCard {
    pub phone: Option<String>,
    pub online_portals: Vec<PortalRecord>,
}

/// Primary location, or `{}` when the doctor has none
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LocationCard {
    Primary {
        clinic_name: Option<String>,
        city: Option<String>,
        state: Option<String>,
    },
    Unknown {},
}

impl DoctorCard {
    pub fn from_scored(scored: &ScoredDoctor<'_>) -> Self {
        Self::build(scored.doctor, scored.score)
    }

    fn build(doctor: &DoctorRecord, score: f64) -> Self {
        let appointment = match &doctor.appointment {
            Some(appt) => AppointmentCard {
                phone: appt.phone.clone(),
                online_portals: appt.online_portals().to_vec(),
            },
            None => AppointmentCard {
                phone: None,
                online_portals: Vec::new(),
            },
        };

        let location = match doctor.primary_location() {
            Some(loc) => LocationCard::Primary {
                clinic_name: loc.clinic_name.clone(),
                city: loc.city.clone(),
                state: loc.state.clone(),
            },
            None => LocationCard::Unknown {},
        };

        Self {
            doctor_id: doctor.doctor_id.clone(),
            name: doctor.full_name.clone(),
            specialties: doctor.specialties.clone(),
            languages: doctor.languages().to_vec(),
            insurances: doctor
                .insurances()
                .iter()
                .map(|ins| ins.display_label())
                .collect(),
            appointment,
            location,
            sources: doctor.sources().to_vec(),
            score: round_score(score),
        }
    }
}
