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

//! Starting the installed executable

use crate::error::{LauncherError, Result};
use std::path::Path;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    Launched { pid: u32 },
    NotFound,
}

pub trait Launch: Send + Sync {
    /// Start `executable` without waiting for it to exit
    fn launch(&self, executable: &Path) -> Result<LaunchOutcome>;
}

/// Spawns the game as a detached child process
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl Launch for ProcessLauncher {
    fn launch(&self, executable: &Path) -> Result<LaunchOutcome> {
        if !executable.is_file() {
            tracing::warn!("Executable not found at {}", executable.display());
            return Ok(LaunchOutcome::NotFound);
        }

        tracing::info!("Starting {}", executable.display());

        let mut command = Command::new(executable);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if let Some(dir) = executable.parent() {
            command.current_dir(dir);
        }

        // Own process group so the game outlives the launcher's terminal session
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let child = command.spawn().map_err(|e| {
            LauncherError::Process(format!(
                "Failed to start {}: {e}",
                executable.display()
            ))
        })?;

        let pid = child.id();
        tracing::info!("Started {} (PID {pid})", executable.display());

        // Dropping the handle does not terminate the child
        drop(child);
        Ok(LaunchOutcome::Launched { pid })
    }
}
