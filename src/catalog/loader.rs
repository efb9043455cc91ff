//! Dataset loading from the data directory
//!
//! Expects `doctors.json` (array of doctor records) and `mapping.json`
//! (array of condition mapping entries) side by side.

use super::records::{ConditionMappingEntry, DoctorRecord};
use super::Catalog;
use crate::error::AppError;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub const DOCTORS_FILE: &str = "doctors.json";
pub const MAPPING_FILE: &str = "mapping.json";

/// Load and validate the catalog from `data_dir`
pub fn load_catalog(data_dir: &Path) -> Result<Catalog> {
    let doctors: Vec<DoctorRecord> = read_json_array(&data_dir.join(DOCTORS_FILE))?;
    let mapping: Vec<ConditionMappingEntry> = read_json_array(&data_dir.join(MAPPING_FILE))?;

    let catalog = Catalog::new(doctors, mapping)?;

    info!(
        "Loaded {} doctors, {} mapping entries, {} specialties from {}",
        catalog.len(),
        catalog.mapping().len(),
        catalog.specialty_labels().len(),
        data_dir.display()
    );
    if catalog.is_empty() {
        warn!("{} holds no doctors; every search will return an empty page", DOCTORS_FILE);
    }

    Ok(catalog)
}

fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    debug!("Reading dataset file {}", path.display());

    let data = fs::read_to_string(path)
        .map_err(|e| AppError::DataLoadFailed(format!("{}: {}", path.display(), e)))?;

    let records: Vec<T> = serde_json::from_str(&data)
        .map_err(|e| AppError::DataParseFailed(format!("{}: {}", path.display(), e)))
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(records)
}
