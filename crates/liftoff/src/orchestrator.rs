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

//! Check, update if needed, then launch

use crate::config::Settings;
use crate::error::{LauncherError, Result};
use crate::installer::{InstallReport, Installer};
use crate::launcher::{Launch, LaunchOutcome};
use crate::release::{ReleaseFeed, RemoteRelease};
use crate::resolver::{is_out_of_date, select_target};
use crate::status::StatusSink;
use crate::version_store::VersionStore;
use chrono::Utc;
use std::process::ExitCode;
use std::time::Duration;

/// How a launcher run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// The game was started; `installed` is set when this run updated it first
    Launched { installed: Option<InstallReport> },
    Failed(LauncherError),
}

impl RunOutcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Launched { .. } => ExitCode::SUCCESS,
            Self::Failed(e) => e.exit_code(),
        }
    }
}

#[derive(Debug)]
pub struct UpdateOrchestrator<F, L, S> {
    feed: F,
    installer: Installer,
    launcher: L,
    status: S,
    store: VersionStore,
    tag_prefix: String,
    step_delay: Duration,
    error_delay: Duration,
}

impl<F, L, S> UpdateOrchestrator<F, L, S>
where
    F: ReleaseFeed,
    L: Launch,
    S: StatusSink,
{
    pub fn new(settings: &Settings, feed: F, installer: Installer, launcher: L, status: S) -> Self {
        Self {
            store: VersionStore::new(&installer.layout().version_file),
            tag_prefix: settings.tag_prefix.clone(),
            step_delay: settings.step_delay(),
            error_delay: settings.error_delay(),
            feed,
            installer,
            launcher,
            status,
        }
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Run once. Errors are reported to the status sink and held on screen
    /// for the error delay before returning.
    pub async fn run(&self) -> RunOutcome {
        match self.run_steps().await {
            Ok(installed) => RunOutcome::Launched { installed },
            Err(e) => {
                tracing::error!("Launcher run failed: {e}");
                self.status.report(&e.status_line());
                tokio::time::sleep(self.error_delay).await;
                RunOutcome::Failed(e)
            }
        }
    }

    async fn run_steps(&self) -> Result<Option<InstallReport>> {
        self.step("checking local game").await;

        let installed = match self.store.read() {
            None => {
                tracing::info!("No local version record, installing");
                self.step("downloading").await;
                let target = self.fetch_target().await?;
                Some(self.install(&target).await?)
            }
            Some(record) => {
                let target = self.fetch_target().await?;
                if is_out_of_date(&record, &target) {
                    tracing::info!(
                        "Local version from {} is older than {} ({})",
                        record.version_published_at,
                        target.tag,
                        target
                            .published_at
                            .map_or_else(String::new, |p| p.to_rfc3339())
                    );
                    self.step("out of date").await;
                    Some(self.install(&target).await?)
                } else {
                    self.step("up to date").await;
                    None
                }
            }
        };

        self.step("launching...").await;
        let executable = &self.installer.layout().executable;
        match self.launcher.launch(executable)? {
            LaunchOutcome::Launched { pid } => {
                tracing::info!("Launched PID {pid}");
                Ok(installed)
            }
            LaunchOutcome::NotFound => Err(LauncherError::ExecutableMissing(executable.clone())),
        }
    }

    async fn fetch_target(&self) -> Result<RemoteRelease> {
        let releases = self.feed.fetch_releases().await?;
        select_target(&releases, Utc::now(), &self.tag_prefix)
            .cloned()
            .ok_or(LauncherError::NoEligibleRelease)
    }

    async fn install(&self, target: &RemoteRelease) -> Result<InstallReport> {
        self.step(&format!("live version: {}", target.display_name()))
            .await;
        let report = self.installer.install(target, &self.status).await?;
        self.step("done").await;
        Ok(report)
    }

    async fn step(&self, status: &str) {
        self.status.report(status);
        if !self.step_delay.is_zero() {
            tokio::time::sleep(self.step_delay).await;
        }
    }
}
