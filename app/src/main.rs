//! Happy Kitty Score CLI
//!
//! Daily wellness checks, weight tracking and vet reports for cats.
//!
//! ## Architecture
//!
//! - CLI: argument parsing and output formatting (`cli`)
//! - Services: business logic on top of the scoring engine
//! - Repositories: local JSON file storage

mod cli;

use clap::Parser;
use happy_kitty_app::config::AppConfig;
use happy_kitty_app::error::AppError;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();
    let json = cli.json;

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => return report(AppError::Config(e.to_string()), json),
    };

    init_tracing(&config);

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        store = %config.storage.path().display(),
        in_memory = config.storage.in_memory,
        "Starting Happy Kitty Score"
    );

    match cli::run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err, json),
    }
}

/// Print an error for the user and turn it into an exit status
fn report(err: AppError, json: bool) -> ExitCode {
    info!(code = err.code(), "Command failed");
    if json {
        match serde_json::to_string_pretty(&err.to_response()) {
            Ok(body) => println!("{}", body),
            Err(_) => eprintln!("error: {}", err.user_message()),
        }
    } else {
        eprintln!("error: {}", err.user_message());
    }
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}

/// Initialize tracing/logging
///
/// Logs go to stderr so command output on stdout stays parseable.
fn init_tracing(config: &AppConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match &config.logging.filter {
            Some(filter) => filter.as_str().into(),
            None if AppConfig::is_production() => "happy_kitty_app=info".into(),
            None => "happy_kitty_app=debug".into(),
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config.logging.json || AppConfig::is_production() {
        // JSON logging for log aggregation
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
