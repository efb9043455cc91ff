//! doctor-match MCP Server, HTTP API & CLI
//!
//! Three modes over one in-memory doctor directory:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: `search` runs a single query, `serve` starts the HTTP API
//!
//! Implements two tools:
//! - `search_doctors(query, ...)` - Rank doctors for a condition, specialty or name
//! - `health()` - Report liveness and catalog size

mod catalog;
mod cli;
mod error;
mod mcp;
mod search;
mod server;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use error::AppError;
use search::SearchEngine;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, MCP server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        run_cli_mode().await
    } else {
        run_mcp_mode().await
    }
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    // Explicit verbosity flags win over RUST_LOG
    if cli.quiet {
        init_tracing(EnvFilter::new("error"));
    } else if cli.verbose {
        init_tracing(EnvFilter::new("debug"));
    } else {
        init_tracing(default_filter());
    }

    let result = match cli.command {
        Some(Commands::Search(args)) => execute_search_cli(&cli.data_dir, args),
        Some(Commands::Serve(args)) => execute_serve_cli(&cli.data_dir, &args.bind).await,
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    match result {
        Ok(Some(output)) => {
            println!("{}", output);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Execute search command in CLI mode
fn execute_search_cli(data_dir: &Path, args: cli::SearchArgs) -> Result<Option<String>, AppError> {
    let engine = load_engine(data_dir)?;
    let tool_result = tools::search::execute_search(&engine, args)?;

    Ok(Some(
        tool_result
            .content
            .first()
            .map(|c| c.text.clone())
            .unwrap_or_default(),
    ))
}

/// Execute serve command in CLI mode
async fn execute_serve_cli(data_dir: &Path, bind: &str) -> Result<Option<String>, AppError> {
    let engine = load_engine(data_dir)?;
    server::serve(engine, bind).await?;
    Ok(None)
}

/// Run in MCP server mode
async fn run_mcp_mode() -> Result<()> {
    init_tracing(default_filter());

    info!("Starting doctor-match MCP Server");

    let cli = Cli::parse();
    let engine = load_engine(&cli.data_dir)?;

    mcp::handle_stdio(engine).await?;

    Ok(())
}

/// Load the catalog once and share it read-only
fn load_engine(data_dir: &Path) -> Result<Arc<SearchEngine>, AppError> {
    let catalog = catalog::load_catalog(data_dir)?;
    Ok(Arc::new(SearchEngine::new(Arc::new(catalog))))
}

/// RUST_LOG when set, `info` otherwise
fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr to keep stdout clean for results and JSON-RPC
fn init_tracing(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
