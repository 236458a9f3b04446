// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Liftoff.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Liftoff - Entry point for the launcher binary
//!
//! Reads `launcher.json`, updates the game from its GitHub release feed when
//! needed and starts it.

use anyhow::Context;
use clap::Parser;
use liftoff::config::default_settings_path;
use liftoff::downloader::Downloader;
use liftoff::lock::InstallLock;
use liftoff::release::http_client;
use liftoff::{
    ConsoleStatus, GithubFeed, Installer, LauncherError, ProcessLauncher, RunOutcome,
    UpdateOrchestrator, load_settings,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "liftoff")]
#[command(about = "Keep a game up to date from GitHub Releases and launch it", long_about = None)]
struct Cli {
    /// Settings file (defaults to launcher.json next to this binary)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Directory holding `<owner>/<product>` instead of the user data directory
    #[arg(long)]
    install_root: Option<PathBuf>,

    /// Release API base URL
    #[arg(long)]
    api_base_url: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_directive = if cli.verbose { "liftoff=debug" } else { "liftoff=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            error!("{e:#}");
            e.downcast_ref::<LauncherError>()
                .map_or(ExitCode::FAILURE, LauncherError::exit_code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<RunOutcome> {
    let settings_path = match cli.settings {
        Some(path) => path,
        None => default_settings_path()?,
    };

    let mut settings = load_settings(&settings_path)
        .with_context(|| format!("Loading {}", settings_path.display()))?;
    if let Some(root) = cli.install_root {
        settings.install_root = Some(root);
    }
    if let Some(url) = cli.api_base_url {
        settings.api_base_url = url;
    }

    let layout = settings.layout()?;
    info!(
        "Starting {} launcher, install root {}",
        settings.product_name,
        layout.root.display()
    );

    // Held until the run ends so a second launcher waits for this update
    let _lock = InstallLock::acquire(&layout.lock_file).await?;

    let client = http_client(&settings)?;
    let feed = GithubFeed::new(client.clone(), &settings);
    let installer = Installer::from_settings(&settings, layout, Downloader::new(client));
    let orchestrator =
        UpdateOrchestrator::new(&settings, feed, installer, ProcessLauncher, ConsoleStatus);

    let outcome = orchestrator.run().await;
    if let RunOutcome::Launched {
        installed: Some(ref report),
    } = outcome
    {
        info!(
            "Updated to {} published {}",
            report.tag, report.published_at
        );
    }
    Ok(outcome)
}
