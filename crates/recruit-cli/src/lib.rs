//! Recruit CLI Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Command-line interface for loading candidate spreadsheets into an
//! applicant-tracking service.
//!
//! # Overview
//!
//! - **Import**: submit every row from the checkpoint onward (`recruit import`)
//! - **Status**: show the next row an import will start from (`recruit status`)
//! - **Reset**: move the checkpoint (`recruit reset`)
//! - **Preview**: print extracted records without submitting (`recruit preview`)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod resume;
pub mod submitter;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Args, Parser, Subcommand};
use recruit_ingest::DEFAULT_CURRENCY;
use std::path::PathBuf;

/// Recruit - candidate spreadsheet importer
#[derive(Parser, Debug)]
#[command(name = "recruit")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit candidates to the tracking service, resuming from the checkpoint
    Import(ImportArgs),

    /// Show the checkpoint of a database
    Status {
        /// Spreadsheet whose checkpoint to show
        database: PathBuf,
    },

    /// Overwrite the checkpoint of a database
    Reset {
        /// Spreadsheet whose checkpoint to reset
        database: PathBuf,

        /// Next data row to process
        #[arg(long, default_value_t = 1)]
        row: usize,
    },

    /// Print extracted records as JSON, starting at the checkpoint
    Preview {
        #[command(flatten)]
        source: SourceArgs,

        /// Maximum number of records to print
        #[arg(short = 'n', long, default_value_t = 10)]
        rows: usize,
    },
}

/// Which spreadsheet to read and how
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Spreadsheet with one candidate per row (.xlsx, .xls, .ods, .csv, .tsv)
    pub database: PathBuf,

    /// Zero-based sheet index
    #[arg(long, default_value_t = 0)]
    pub sheet: usize,

    /// The first row holds data, not column titles
    #[arg(long)]
    pub no_header: bool,

    /// Currency label appended to salaries
    #[arg(long, default_value = DEFAULT_CURRENCY)]
    pub currency: String,
}

/// Options of `recruit import`
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Personal API token
    #[arg(long, env = "RECRUIT_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Tracking service URL
    #[arg(long, env = "RECRUIT_API_URL", default_value = api::client::DEFAULT_API_URL)]
    pub api_url: String,

    /// Index of the account to import into, in the order the service lists them
    #[arg(long, default_value_t = 0)]
    pub account: usize,

    /// Directory searched for résumé files (defaults to the database's directory)
    #[arg(long)]
    pub resume_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "RECRUIT_API_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Extract and log records without contacting the service or saving the checkpoint
    #[arg(long)]
    pub dry_run: bool,
}
