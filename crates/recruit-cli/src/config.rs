//! Configuration management for the Recruit CLI
//!
//! Resolves command-line arguments (which clap may have filled from the
//! environment) into the settings one import run needs.

use crate::api::client::DEFAULT_API_TIMEOUT_SECS;
use crate::error::{CliError, Result};
use crate::{ImportArgs, SourceArgs};
use recruit_ingest::{candidate_fields, Checkpoint, Ingestor, RowExtractor};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for one `recruit import` run
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub database: PathBuf,
    pub sheet: usize,
    pub has_header: bool,
    pub currency: String,

    /// `None` only in dry-run mode
    pub token: Option<String>,
    pub api_url: String,
    pub account_index: usize,
    pub timeout: Duration,

    /// Where résumé files are looked up
    pub resume_dir: PathBuf,
    pub dry_run: bool,
}

impl ImportConfig {
    pub fn from_args(args: &ImportArgs) -> Result<Self> {
        let token = args
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        if token.is_none() && !args.dry_run {
            return Err(CliError::config(
                "API token missing. Pass --token or set RECRUIT_API_TOKEN",
            ));
        }

        let resume_dir = args
            .resume_dir
            .clone()
            .unwrap_or_else(|| database_dir(&args.source.database));

        Ok(Self {
            database: args.source.database.clone(),
            sheet: args.source.sheet,
            has_header: !args.source.no_header,
            currency: args.source.currency.clone(),
            token,
            api_url: args.api_url.clone(),
            account_index: args.account,
            timeout: Duration::from_secs(args.timeout_secs.unwrap_or(DEFAULT_API_TIMEOUT_SECS)),
            resume_dir,
            dry_run: args.dry_run,
        })
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        Checkpoint::path_for(&self.database)
    }

    pub fn ingestor(&self) -> Result<Ingestor> {
        ingestor(&self.currency, self.has_header, self.sheet)
    }
}

/// Directory holding the database file (`.` for a bare file name)
pub fn database_dir(database: &Path) -> PathBuf {
    match database.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Ingestor for the standard candidate layout
pub fn ingestor(currency: &str, has_header: bool, sheet: usize) -> Result<Ingestor> {
    let extractor = RowExtractor::new(candidate_fields(currency))?;
    Ok(Ingestor::new(extractor)
        .with_header(has_header)
        .with_sheet(sheet))
}

impl SourceArgs {
    pub fn ingestor(&self) -> Result<Ingestor> {
        ingestor(&self.currency, !self.no_header, self.sheet)
    }
}
