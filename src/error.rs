//! Error types for the doctor-match server

use serde::Serialize;
use thiserror::Error;

/// Application error types
///
/// The search core itself never fails; these cover dataset loading and
/// request validation at the CLI / MCP / HTTP boundaries.
#[derive(Debug, Error, Serialize)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Dataset load failed: {0}")]
    DataLoadFailed(String),
    #[error("Dataset parse failed: {0}")]
    DataParseFailed(String),
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for MCP and HTTP responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::DataLoadFailed(_) => "data_load_failed",
            AppError::DataParseFailed(_) => "data_parse_failed",
            AppError::InvalidDataset(_) => "invalid_dataset",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Process exit code used in CLI mode
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) => 1,
            AppError::DataLoadFailed(_)
            | AppError::DataParseFailed(_)
            | AppError::InvalidDataset(_) => 3,
            AppError::Internal(_) => 5,
        }
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Loader errors travel through anyhow with context attached
        match err.downcast::<AppError>() {
            Ok(app) => app,
            Err(other) => AppError::Internal(format!("{:#}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let error = AppError::InvalidInput("bad lang".to_string());
        assert_eq!(error.to_string(), "Invalid input: bad lang");
        assert_eq!(error.error_code(), "invalid_input");
        assert_eq!(error.exit_code(), 1);

        let error = AppError::InvalidDataset("duplicate doctor_id: d1".to_string());
        assert_eq!(error.to_string(), "Invalid dataset: duplicate doctor_id: d1");
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_anyhow_roundtrip_keeps_variant() {
        let err: anyhow::Error = AppError::DataLoadFailed("doctors.json".into()).into();
        let app: AppError = err.into();
        assert_eq!(app.error_code(), "data_load_failed");

        let app: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(app.error_code(), "internal_error");
    }
}
