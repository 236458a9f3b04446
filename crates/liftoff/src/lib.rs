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

//! Liftoff - A self-updating game launcher
//!
//! On every start the launcher compares the locally installed version with the
//! release feed on GitHub, installs the matching release when the local copy is
//! stale or missing, and then starts the game.

pub mod archive;
pub mod config;
pub mod downloader;
pub mod error;
pub mod installer;
pub mod launcher;
pub mod lock;
pub mod orchestrator;
pub mod release;
pub mod resolver;
pub mod status;
pub mod version_store;

pub use config::{InstallLayout, InstallMode, Settings, load_settings};
pub use error::{LauncherError, Result};
pub use installer::{InstallReport, Installer};
pub use launcher::{Launch, LaunchOutcome, ProcessLauncher};
pub use orchestrator::{RunOutcome, UpdateOrchestrator};
pub use release::{GithubFeed, ReleaseFeed, RemoteAsset, RemoteRelease};
pub use status::{ConsoleStatus, ProgressSink, StatusSink};
pub use version_store::{VersionRecord, VersionStore};
