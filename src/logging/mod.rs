/*!
 * Logging Module
 * Centralized logging configuration and utilities
 */
pub mod middleware;

use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system: console plus a daily-rolling log file,
/// JSON format in production, pretty in development.
///
/// The returned guards must be held for the process lifetime; dropping them
/// shuts down the background writer threads and loses buffered lines.
pub fn init() -> Vec<WorkerGuard> {
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let is_production = environment == "production";

    std::fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", "app.log");
    let (file_writer, file_guard) = non_blocking(file_appender);
    let (console_writer, console_guard) = non_blocking(io::stdout());

    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| if is_production { "info" } else { "debug" }.to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "portfolio_builder={log_level},tower_http=debug,axum=debug"
        ))
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if is_production {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_writer(file_writer)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(fmt::layer().json().with_writer(console_writer).with_target(false))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_writer(file_writer).with_ansi(false))
            .with(fmt::layer().with_writer(console_writer).pretty())
            .init();
    }

    tracing::info!("Logging initialized for {} environment", environment);

    vec![file_guard, console_guard]
}
