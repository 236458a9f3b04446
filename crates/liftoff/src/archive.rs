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

//! Zip extraction into a staging directory

use crate::error::{LauncherError, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Extract `archive` into `dest` on the blocking pool.
///
/// Returns the number of files written. Entries whose names would land
/// outside `dest` fail the whole extraction.
pub async fn extract_zip(asset: &str, archive: &Path, dest: &Path) -> Result<usize> {
    let asset_name = asset.to_string();
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || extract_zip_blocking(&asset_name, &archive, &dest))
        .await
        .map_err(|e| LauncherError::ExtractionFailed {
            asset: asset.to_string(),
            reason: format!("Extraction task failed: {e}"),
        })?
}

fn extract_zip_blocking(asset: &str, archive: &Path, dest: &Path) -> Result<usize> {
    let failed = |reason: String| LauncherError::ExtractionFailed {
        asset: asset.to_string(),
        reason,
    };

    let file = File::open(archive)
        .map_err(|e| failed(format!("Cannot open {}: {e}", archive.display())))?;
    let mut zip =
        zip::ZipArchive::new(file).map_err(|e| failed(format!("Invalid archive: {e}")))?;

    std::fs::create_dir_all(dest).map_err(|e| LauncherError::write_failed(dest, e))?;

    let mut written = 0;
    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| failed(format!("Corrupt entry #{index}: {e}")))?;

        let relative: PathBuf = entry
            .enclosed_name()
            .ok_or_else(|| failed(format!("Entry escapes staging root: {}", entry.name())))?;
        let out_path = dest.join(&relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)
                .map_err(|e| LauncherError::write_failed(&out_path, e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LauncherError::write_failed(parent, e))?;
        }

        let mut out =
            File::create(&out_path).map_err(|e| LauncherError::write_failed(&out_path, e))?;
        std::io::copy(&mut entry, &mut out)
            .map_err(|e| failed(format!("Failed to inflate {}: {e}", relative.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode().map(|m| m & 0o777).filter(|m| *m != 0) {
                std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode))
                    .map_err(|e| LauncherError::write_failed(&out_path, e))?;
            }
        }

        tracing::trace!("Extracted {}", relative.display());
        written += 1;
    }

    tracing::debug!("Extracted {written} files from {asset}");
    Ok(written)
}
