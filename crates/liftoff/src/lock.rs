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

//! Cross-process lock serializing launcher runs for one installation

use crate::error::{LauncherError, Result};
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Exclusive lock on `<product>.lock`, released on drop
#[derive(Debug)]
pub struct InstallLock {
    file: File,
    path: PathBuf,
}

impl InstallLock {
    /// Wait until no other launcher holds the lock for this installation.
    pub async fn acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LauncherError::write_failed(parent, e))?;
        }

        let lock_path = path.to_path_buf();
        let file = tokio::task::spawn_blocking(move || -> Result<File> {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&lock_path)
                .map_err(|e| {
                    LauncherError::Lock(format!("Failed to open {}: {e}", lock_path.display()))
                })?;

            // Blocks while another launcher is updating
            FileExt::lock_exclusive(&file).map_err(|e| {
                LauncherError::Lock(format!("Failed to lock {}: {e}", lock_path.display()))
            })?;

            Ok(file)
        })
        .await
        .map_err(|e| LauncherError::Lock(format!("Lock task failed: {e}")))??;

        tracing::debug!("Acquired install lock {}", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstallLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!("Failed to unlock {}: {e}", self.path.display());
        }
    }
}
