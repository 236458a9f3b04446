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

//! Streaming asset downloader with percent progress

use crate::error::{LauncherError, Result};
use crate::release::RemoteAsset;
use crate::status::ProgressSink;
use futures_util::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Emits a percentage only when it differs from the last one emitted
struct PercentTracker {
    total: Option<u64>,
    received: u64,
    last: Option<u8>,
}

impl PercentTracker {
    fn new(total: Option<u64>) -> Self {
        Self {
            total: total.filter(|t| *t > 0),
            received: 0,
            last: None,
        }
    }

    #[allow(clippy::integer_division)]
    fn advance(&mut self, bytes: u64) -> Option<u8> {
        self.received += bytes;
        let total = self.total?;
        let percent = u8::try_from(self.received.min(total) * 100 / total).unwrap_or(100);
        if self.last == Some(percent) {
            return None;
        }
        self.last = Some(percent);
        Some(percent)
    }
}

#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Stream `asset` into `dest`, returning the number of bytes written.
    ///
    /// A partially written file is removed on failure.
    pub async fn download(
        &self,
        asset: &RemoteAsset,
        dest: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<u64> {
        let result = self.download_inner(asset, dest, progress).await;
        if result.is_err() && dest.exists() {
            let _ = tokio::fs::remove_file(dest).await;
        }
        result
    }

    async fn download_inner(
        &self,
        asset: &RemoteAsset,
        dest: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<u64> {
        let failed = |reason: String| LauncherError::DownloadFailed {
            asset: asset.name.clone(),
            reason,
        };

        tracing::debug!("Downloading {} from {}", asset.name, asset.download_url);

        let response = self
            .client
            .get(&asset.download_url)
            .send()
            .await
            .map_err(|e| failed(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(failed(format!(
                "Download failed with status: {}",
                response.status()
            )));
        }

        let mut tracker = PercentTracker::new(response.content_length().or(asset.size));
        if let Some(percent) = tracker.advance(0) {
            progress.on_progress(percent);
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LauncherError::write_failed(parent, e))?;
        }
        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| LauncherError::write_failed(dest, e))?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| failed(format!("Failed to read body: {e}")))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| LauncherError::write_failed(dest, e))?;

            if let Some(percent) = tracker.advance(chunk.len() as u64) {
                progress.on_progress(percent);
            }
        }

        file.flush()
            .await
            .map_err(|e| LauncherError::write_failed(dest, e))?;

        tracing::debug!("Downloaded {} ({} bytes)", asset.name, tracker.received);
        Ok(tracker.received)
    }
}
