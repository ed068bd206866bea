//! ZipLink client entry-point: wires settings, adapters, and the CLI shell.

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use client::inbound::cli::{Cli, run};
use client::settings::ClientSettings;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = ClientSettings::load_from_iter([OsString::from("ziplink")])
        .unwrap_or_else(|error| {
            warn!(error = %error, "settings load failed; using defaults");
            ClientSettings::default()
        });

    match run(cli, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
