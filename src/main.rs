//! vocab-helper - contextual vocabulary lookups
//!
//! Main entry point for the vocab-helper CLI.

mod app;
mod cli;
mod cmd_define;
mod cmd_options;
mod cmd_status;

use std::path::Path;

use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vocab_config::{ConfigLoader, ConfigValidator, LoggingConfig};

use crate::app::App;
use crate::cli::{Cli, Commands};

fn init_tracing(logging: &LoggingConfig, log_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));

    // Console output goes to stderr so stdout stays clean for results.
    let console = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr);

    let file = if logging.file {
        std::fs::create_dir_all(log_dir)?;
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("vocab-helper")
            .filename_suffix("log")
            .max_log_files(14)
            .build(log_dir)?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The guard flushes the file writer on drop; keep it for the whole run.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)?;
    let warnings = ConfigValidator::validate(&config).into_result()?;

    init_tracing(&config.logging, &config.storage.log_dir())?;
    for warning in warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }
    debug!(config = %cli.config.display(), "Configuration loaded");

    let app = App::open(config).await?;

    match cli.command {
        Commands::Init => cmd_define::handle_init(&app).await,
        Commands::Define {
            selection,
            page,
            occurrence,
        } => cmd_define::handle_define(&app, &selection, page, occurrence).await,
        Commands::Status { raw, json } => cmd_status::handle_status(&app, raw, json).await,
        Commands::Watch => cmd_status::handle_watch(&app).await,
        Commands::Options { action } => cmd_options::handle_options_command(&app, action).await,
    }
}
