//! U3DEVLAB admin core - library for catalog logic, the admin flows and testing

pub mod admin;
pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod logging;
pub mod models;

use std::process::ExitCode;

use clap::Parser;

pub use client::ApiClient;
pub use config::AdminConfig;
pub use error::{AdminError, Result};

use crate::logging::config::LogSettings;

/// Run the admin CLI (used by main).
pub async fn run() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();
    let config = cli.config();

    // Guards MUST be held for the programme's lifetime; dropping them early
    // shuts down background log-writer threads and loses buffered log lines.
    let _log_guards = logging::init(&LogSettings {
        level: config.log_level,
        production: config.is_production(),
        directory: "logs".to_string(),
        console: !cli.quiet,
    });

    if config.is_production() && config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN is not set; write operations will likely be rejected");
    }

    match cli::execute(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "command failed");
            eprintln!("Error: {}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// The text an admin sees for a failed command.
pub fn user_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<AdminError>() {
        Some(admin) => admin.user_message(),
        None => format!("{:#}", error),
    }
}
