//! CLI mode implementation
//!
//! Provides command-line interface for the doctor-match tools

use clap::{Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default bind address for `serve`
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// doctor-match CLI
#[derive(Parser)]
#[command(name = "doctor-match")]
#[command(about = "Find and rank doctors by condition, specialty and filters", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding doctors.json and mapping.json
    #[arg(long, global = true, env = "DOCTOR_MATCH_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search doctors by condition, specialty or name
    Search(SearchArgs),
    /// Serve the search over HTTP
    Serve(ServeArgs),
}

/// Search tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug, Default)]
pub struct SearchArgs {
    /// Disease, symptom, specialty or free text
    #[arg(short = 'q', long)]
    #[schemars(description = "Disease, symptom, specialty or free text")]
    pub query: String,

    /// City (exact match)
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "City of a practice location (exact, case-insensitive)")]
    pub city: Option<String>,

    /// State (exact match)
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "State of a practice location (exact, case-insensitive)")]
    pub state: Option<String>,

    /// Payer code or payer name fragment
    #[arg(short = 'i', long)]
    #[serde(default)]
    #[schemars(description = "Payer code or payer name fragment")]
    pub insurance: Option<String>,

    /// Preferred spoken language (e.g. Chinese, English)
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Preferred spoken language (e.g. Chinese, English)")]
    pub language: Option<String>,

    /// Maximum number of results (default 20)
    #[arg(short = 'l', long, allow_hyphen_values = true)]
    #[serde(default)]
    #[schemars(description = "Maximum number of results (default 20)")]
    pub limit: Option<i64>,

    /// Number of ranked results to skip
    #[arg(short = 'o', long, allow_hyphen_values = true)]
    #[serde(default)]
    #[schemars(description = "Number of ranked results to skip (default 0)")]
    pub offset: Option<i64>,

    /// Advisory note language: en or zh
    #[arg(long)]
    #[serde(default)]
    #[schemars(description = "Advisory note language: 'en' (default) or 'zh'")]
    pub lang: Option<String>,

    /// Print the raw JSON response instead of markdown
    #[arg(long)]
    #[serde(default)]
    #[schemars(skip)]
    pub json: bool,
}

/// HTTP server arguments
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(short = 'b', long, env = "DOCTOR_MATCH_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,
}
