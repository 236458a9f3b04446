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

//! Error types for the launcher crate

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("config error: {0}")]
    Config(String),

    #[error("release fetch failed: {0}")]
    RemoteFetchFailed(String),

    #[error("live version not found")]
    NoEligibleRelease,

    #[error("download of {asset} failed: {reason}")]
    DownloadFailed { asset: String, reason: String },

    #[error("extraction of {asset} failed: {reason}")]
    ExtractionFailed { asset: String, reason: String },

    #[error("failed to write {}: {source}", .path.display())]
    FilesystemWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("local game not found")]
    ExecutableMissing(PathBuf),

    #[error("install lock error: {0}")]
    Lock(String),

    #[error("process error: {0}")]
    Process(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LauncherError {
    /// Wrap an I/O failure on `path` as a filesystem write error
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FilesystemWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Stable process exit code per error kind
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) => ExitCode::from(20),
            Self::RemoteFetchFailed(_) => ExitCode::from(30),
            Self::NoEligibleRelease => ExitCode::from(31),
            Self::DownloadFailed { .. } => ExitCode::from(32),
            Self::ExtractionFailed { .. } => ExitCode::from(33),
            Self::FilesystemWriteFailed { .. } => ExitCode::from(40),
            Self::Io(_) => ExitCode::from(41),
            Self::Lock(_) => ExitCode::from(42),
            Self::ExecutableMissing(_) => ExitCode::from(50),
            Self::Process(_) => ExitCode::from(51),
        }
    }

    /// Text shown on the status line, e.g. `error: live version not found`
    pub fn status_line(&self) -> String {
        format!("error: {}", self.to_string().to_lowercase())
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
