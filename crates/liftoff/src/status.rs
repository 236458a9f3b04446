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

//! User-facing status reporting

use std::io::Write;

/// Receives one-line status updates, e.g. `downloading 42%`
pub trait StatusSink: Send + Sync {
    fn report(&self, status: &str);
}

/// Receives download progress in whole percent
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, percent: u8);
}

impl<F> ProgressSink for F
where
    F: Fn(u8) + Send + Sync,
{
    fn on_progress(&self, percent: u8) {
        self(percent);
    }
}

/// Forwards download progress to a status sink as `downloading N%`
pub struct DownloadProgress<'a> {
    sink: &'a dyn StatusSink,
}

impl<'a> DownloadProgress<'a> {
    pub fn new(sink: &'a dyn StatusSink) -> Self {
        Self { sink }
    }
}

impl ProgressSink for DownloadProgress<'_> {
    fn on_progress(&self, percent: u8) {
        self.sink.report(&format!("downloading {percent}%"));
    }
}

/// Prints each status on its own line to stdout
#[derive(Debug, Default)]
pub struct ConsoleStatus;

impl StatusSink for ConsoleStatus {
    fn report(&self, status: &str) {
        tracing::debug!(status, "status");
        let mut stdout = std::io::stdout().lock();
        // A closed stdout must not abort the launch
        let _ = writeln!(stdout, "{status}");
        let _ = stdout.flush();
    }
}
