/*!
 * Logging Module
 * Centralized logging configuration and utilities
 */
pub mod config;
pub mod middleware;

use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use self::config::LogSettings;

/// Initialize the logging system.
///
/// The returned guards flush the background writers when dropped, so the
/// caller keeps them alive until the process exits.
pub fn init(settings: &LogSettings) -> Vec<WorkerGuard> {
    // Create log directory if it doesn't exist
    std::fs::create_dir_all(&settings.directory).ok();

    // File appender for all logs
    let file_appender = rolling::daily(&settings.directory, "admin.log");
    let (file_writer, file_guard) = non_blocking(file_appender);

    // File appender for errors only
    let error_appender = rolling::daily(&settings.directory, "error.log");
    let (error_writer, error_guard) = non_blocking(error_appender);

    // Console goes to stderr so command output on stdout stays clean
    let (console_writer, console_guard) = non_blocking(io::stderr());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.filter_directive()));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if settings.production {
        // JSON format for production
        let file_layer = fmt::layer()
            .json()
            .with_writer(file_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        let error_layer = fmt::layer()
            .json()
            .with_writer(error_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(tracing_subscriber::filter::LevelFilter::ERROR);

        let console_layer = settings.console.then(|| {
            fmt::layer()
                .json()
                .with_writer(console_writer)
                .with_target(false)
        });

        if let Err(e) = subscriber
            .with(file_layer)
            .with(error_layer)
            .with(console_layer)
            .try_init()
        {
            // tests and embedding callers may install their own subscriber first
            tracing::debug!(error = %e, "global subscriber already set, keeping it");
        }
    } else {
        // Pretty format for development
        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let error_layer = fmt::layer()
            .with_writer(error_writer)
            .with_target(true)
            .with_ansi(false)
            .with_filter(tracing_subscriber::filter::LevelFilter::ERROR);

        let console_layer = settings.console.then(|| {
            fmt::layer()
                .with_writer(console_writer)
                .with_target(true)
                .compact()
        });

        if let Err(e) = subscriber
            .with(file_layer)
            .with(error_layer)
            .with(console_layer)
            .try_init()
        {
            // tests and embedding callers may install their own subscriber first
            tracing::debug!(error = %e, "global subscriber already set, keeping it");
        }
    }

    tracing::debug!(
        level = %settings.level,
        production = settings.production,
        "logging initialized"
    );

    vec![file_guard, error_guard, console_guard]
}
