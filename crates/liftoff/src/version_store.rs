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

//! Persistence of the installed version record

use crate::error::{LauncherError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which remote version is installed locally, and when it was fetched
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub downloaded_at: DateTime<Utc>,
    pub version_published_at: DateTime<Utc>,
}

impl VersionRecord {
    pub fn new(downloaded_at: DateTime<Utc>, version_published_at: DateTime<Utc>) -> Self {
        Self {
            downloaded_at,
            version_published_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VersionStore {
    path: PathBuf,
}

impl VersionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record. Missing or unparseable files mean "nothing installed".
    pub fn read(&self) -> Option<VersionRecord> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No version record at {}", self.path.display());
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable version record {}: {e}",
                    self.path.display()
                );
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed version record {}: {e}",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Persist the record. Only call once an install has fully completed.
    pub fn write(&self, record: &VersionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| LauncherError::write_failed(parent, e))?;
        }

        let content = serde_json::to_string(record)
            .map_err(|e| LauncherError::write_failed(&self.path, std::io::Error::other(e)))?;

        // Atomic write
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, content)
            .map_err(|e| LauncherError::write_failed(&temp_path, e))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| LauncherError::write_failed(&self.path, e))?;

        tracing::debug!(
            "Version record written: published {}",
            record.version_published_at
        );
        Ok(())
    }
}
