//! Recruit CLI - Main entry point

use clap::Parser;
use colored::Colorize;
use recruit_cli::config::ImportConfig;
use recruit_cli::{commands, Cli, Commands};
use recruit_common::logging::{init_logging, LogConfig, LogLevel};
use std::process;
use tracing::{error, warn};

fn main() {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let log_config = LogConfig::default()
        .with_level(level)
        .with_file_prefix("recruit");

    // Environment variables take precedence over flags
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _guard = init_logging(&log_config).ok();

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, "Failed to load .env file");
        }
    }

    if let Err(e) = execute_command(&cli) {
        error!(error = %e, "Command failed");
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn execute_command(cli: &Cli) -> recruit_cli::Result<()> {
    match &cli.command {
        Commands::Import(args) => {
            let config = ImportConfig::from_args(args)?;
            commands::import::run(&config).map(|_| ())
        }
        Commands::Status { database } => commands::status::run(database).map(|_| ()),
        Commands::Reset { database, row } => commands::reset::run(database, *row),
        Commands::Preview { source, rows } => commands::preview::run(source, *rows).map(|_| ()),
    }
}
