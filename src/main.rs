//! tldw CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use tldw::cli::{commands, Cli, Output};
use tldw::orchestrator::{PipelineError, Stage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            report(&anyhow::Error::new(PipelineError::new(Stage::Startup, e)));
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let log_level = cli.log_level(&settings.general.log_level);
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tldw={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match commands::run_summarize(&cli, settings).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<PipelineError>() {
        Some(failure) => {
            Output::error(&failure.to_string());
            if let Some(hint) = failure.hint() {
                Output::hint(hint);
            }
        }
        None => Output::error(&format!("{:#}", err)),
    }
}
