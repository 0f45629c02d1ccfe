#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use clap::Parser;
use idk::{Cli, IdkError, app};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to install log subscriber: {e}");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Install default crypto provider for Rustls TLS.
    // This prevents the error: "could not automatically determine the process-level CryptoProvider"
    // when both aws-lc-rs and ring features are available (or neither is explicitly selected).
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match app::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(IdkError::Config(e)) => {
            tracing::error!(error = %e, "failed to load config");
            println!("Error running the script. Please try again!");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "exiting with failure");
            ExitCode::FAILURE
        }
    }
}
