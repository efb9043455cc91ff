//! Read-only doctor directory
//!
//! The catalog is built once at startup from the dataset files and shared
//! behind an `Arc` by every request. Nothing mutates it after construction.

pub mod loader;
pub mod records;

pub use loader::load_catalog;
pub use records::{ConditionMappingEntry, DoctorRecord};

use crate::error::AppError;
use std::collections::HashSet;

/// Immutable snapshot of the doctor collection and the condition mapping table
#[derive(Debug)]
pub struct Catalog {
    doctors: Vec<DoctorRecord>,
    mapping: Vec<ConditionMappingEntry>,
    /// Distinct specialty labels across all doctors, first-seen order
    specialty_labels: Vec<String>,
}

impl Catalog {
    /// Validate the records and build the catalog
    ///
    /// Rejects empty or duplicate `doctor_id`s and empty `full_name`s.
    pub fn new(
        doctors: Vec<DoctorRecord>,
        mapping: Vec<ConditionMappingEntry>,
    ) -> Result<Self, AppError> {
        let mut seen_ids = HashSet::new();
        for doctor in &doctors {
            if doctor.doctor_id.trim().is_empty() {
                return Err(AppError::InvalidDataset(format!(
                    "doctor with empty doctor_id (full_name: {})",
                    doctor.full_name
                )));
            }
            if doctor.full_name.trim().is_empty() {
                return Err(AppError::InvalidDataset(format!(
                    "doctor {} has an empty full_name",
                    doctor.doctor_id
                )));
            }
            if !seen_ids.insert(doctor.doctor_id.as_str()) {
                return Err(AppError::InvalidDataset(format!(
                    "duplicate doctor_id: {}",
                    doctor.doctor_id
                )));
            }
        }

        let mut specialty_labels: Vec<String> = Vec::new();
        let mut seen_labels = HashSet::new();
        for doctor in &doctors {
            for sp in &doctor.specialties {
                if seen_labels.insert(sp.as_str()) {
                    specialty_labels.push(sp.clone());
                }
            }
        }

        Ok(Self {
            doctors,
            mapping,
            specialty_labels,
        })
    }

    /// Doctors in load order
    pub fn doctors(&self) -> &[DoctorRecord] {
        &self.doctors
    }

    pub fn mapping(&self) -> &[ConditionMappingEntry] {
        &self.mapping
    }

    pub fn specialty_labels(&self) -> &[String] {
        &self.specialty_labels
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}
