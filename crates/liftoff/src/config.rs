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

//! Launcher settings and the install layout derived from them

use crate::error::{LauncherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

pub const SETTINGS_FILE: &str = "launcher.json";
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

fn default_version_file() -> String {
    "version.txt".to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_5() -> u64 {
    5
}

fn default_2000() -> u64 {
    2000
}

fn default_30() -> u64 {
    30
}

/// How staged files reach the installation directory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Prepare a complete sibling tree, then rename it over the install root
    ///
    /// Symlinks in the install are recreated on unix; elsewhere they fail the install.
    #[default]
    Swap,
    /// Move staged files into the install root one by one
    Merge,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Release feed owner (GitHub user or organisation)
    pub owner: String,

    /// Release feed repository
    pub repository: String,

    /// Human readable product name, also the install folder name
    pub product_name: String,

    /// Executable path relative to the install root
    pub executable: String,

    /// Only releases whose tag starts with this prefix belong to the product
    #[serde(default)]
    pub tag_prefix: String,

    /// Version record file name inside the install root
    #[serde(default = "default_version_file")]
    pub version_file: String,

    /// Overrides the per-user data directory as the parent of `<owner>/<product_name>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_root: Option<PathBuf>,

    /// Custom API base URL (overrides default GitHub API)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer token for private release feeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Directories regenerated by every version, cleared before new files land
    #[serde(default)]
    pub replace_dirs: Vec<String>,

    #[serde(default)]
    pub install_mode: InstallMode,

    /// Pause between status updates (milliseconds)
    #[serde(default = "default_5")]
    pub step_delay_ms: u64,

    /// How long an error stays on screen before exit (milliseconds)
    #[serde(default = "default_2000")]
    pub error_delay_ms: u64,

    #[serde(default = "default_30")]
    pub connect_timeout_secs: u64,
}

impl Settings {
    /// Minimal settings for a product, everything else defaulted
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        product_name: impl Into<String>,
        executable: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            product_name: product_name.into(),
            executable: executable.into(),
            tag_prefix: String::new(),
            version_file: default_version_file(),
            install_root: None,
            api_base_url: default_api_base_url(),
            token: None,
            replace_dirs: Vec::new(),
            install_mode: InstallMode::default(),
            step_delay_ms: 5,
            error_delay_ms: 2000,
            connect_timeout_secs: 30,
        }
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn error_delay(&self) -> Duration {
        Duration::from_millis(self.error_delay_ms)
    }

    /// User agent sent to the release feed, e.g. `RocketJumpUpdater`
    pub fn user_agent(&self) -> String {
        format!("{}Updater", self.product_name.replace(' ', ""))
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("owner", &self.owner),
            ("repository", &self.repository),
            ("product_name", &self.product_name),
            ("executable", &self.executable),
            ("version_file", &self.version_file),
        ] {
            if value.trim().is_empty() {
                return Err(LauncherError::Config(format!("{field} must not be empty")));
            }
        }

        ensure_relative("executable", &self.executable)?;
        ensure_relative("version_file", &self.version_file)?;
        for dir in &self.replace_dirs {
            ensure_relative("replace_dirs", dir)?;
        }

        if self.product_name.contains(['/', '\\']) || self.owner.contains(['/', '\\']) {
            return Err(LauncherError::Config(
                "owner and product_name must not contain path separators".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve where this product lives on disk
    pub fn layout(&self) -> Result<InstallLayout> {
        let base = match &self.install_root {
            Some(root) => root.clone(),
            None => dirs::data_dir().ok_or_else(|| {
                LauncherError::Config("Could not determine the user data directory".to_string())
            })?,
        };

        Ok(InstallLayout::new(
            base.join(&self.owner),
            &self.product_name,
            &self.executable,
            &self.version_file,
        ))
    }
}

fn ensure_relative(field: &str, value: &str) -> Result<()> {
    let path = Path::new(value);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(LauncherError::Config(format!(
            "{field} must be a relative path inside the install root: {value}"
        )));
    }
    Ok(())
}

/// Load settings from a JSON file and validate them
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        LauncherError::Config(format!("Failed to read {}: {e}", path.display()))
    })?;
    let settings: Settings = serde_json::from_str(&content)
        .map_err(|e| LauncherError::Config(format!("Failed to parse settings: {e}")))?;
    settings.validate()?;
    Ok(settings)
}

/// Default settings location: next to the launcher binary
pub fn default_settings_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| LauncherError::Config(format!("Cannot locate launcher binary: {e}")))?;
    Ok(exe.with_file_name(SETTINGS_FILE))
}

/// Filesystem locations used by one product installation.
///
/// The install root is `<base>/<owner>/<product_name>`; work directories are
/// siblings of it so they can be renamed over the root and never end up
/// inside the installed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    pub root: PathBuf,
    pub executable: PathBuf,
    pub version_file: PathBuf,
    pub staging: PathBuf,
    pub next: PathBuf,
    pub old: PathBuf,
    pub lock_file: PathBuf,
}

impl InstallLayout {
    pub fn new(parent: PathBuf, product_name: &str, executable: &str, version_file: &str) -> Self {
        let root = parent.join(product_name);
        Self {
            executable: root.join(executable),
            version_file: root.join(version_file),
            staging: parent.join(format!("{product_name}.staging")),
            next: parent.join(format!("{product_name}.next")),
            old: parent.join(format!("{product_name}.old")),
            lock_file: parent.join(format!("{product_name}.lock")),
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn rocket_jump() -> Settings {
        let mut settings =
            Settings::new("popcron", "games", "Rocket Jump", "RocketJump/RocketJump.exe");
        settings.tag_prefix = "rocketjump_".to_string();
        settings
    }

    #[test]
    fn test_defaults_from_minimal_json() {
        let json = r#"{
            "owner": "popcron",
            "repository": "games",
            "product_name": "Rocket Jump",
            "executable": "RocketJump/RocketJump.exe"
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.tag_prefix, "");
        assert_eq!(settings.version_file, "version.txt");
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.install_mode, InstallMode::Swap);
        assert_eq!(settings.step_delay_ms, 5);
        assert_eq!(settings.error_delay_ms, 2000);
        assert!(settings.token.is_none());
        assert!(settings.replace_dirs.is_empty());
    }

    #[test]
    fn test_install_mode_lowercase() {
        let mode: InstallMode = serde_json::from_str("\"merge\"").unwrap();
        assert_eq!(mode, InstallMode::Merge);
        assert_eq!(serde_json::to_string(&InstallMode::Swap).unwrap(), "\"swap\"");
    }

    #[test]
    fn test_user_agent_strips_spaces() {
        assert_eq!(rocket_jump().user_agent(), "RocketJumpUpdater");
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let mut settings = rocket_jump();
        settings.owner = "  ".to_string();
        assert!(matches!(settings.validate(), Err(LauncherError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_escaping_executable() {
        let mut settings = rocket_jump();
        settings.executable = "../outside.exe".to_string();
        assert!(settings.validate().is_err());

        settings.executable = "/usr/bin/game".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_escaping_replace_dir() {
        let mut settings = rocket_jump();
        settings.replace_dirs = vec!["RocketJump/../../etc".to_string()];
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_layout_paths() {
        let mut settings = rocket_jump();
        settings.install_root = Some(PathBuf::from("/games"));
        let layout = settings.layout().unwrap();

        assert_eq!(layout.root, PathBuf::from("/games/popcron/Rocket Jump"));
        assert_eq!(
            layout.executable,
            PathBuf::from("/games/popcron/Rocket Jump/RocketJump/RocketJump.exe")
        );
        assert_eq!(
            layout.version_file,
            PathBuf::from("/games/popcron/Rocket Jump/version.txt")
        );
        assert_eq!(layout.staging, PathBuf::from("/games/popcron/Rocket Jump.staging"));
        assert_eq!(layout.lock_file, PathBuf::from("/games/popcron/Rocket Jump.lock"));
        assert_eq!(layout.old, PathBuf::from("/games/popcron/Rocket Jump.old"));
    }

    #[test]
    fn test_load_settings_roundtrip() {
        let settings = rocket_jump();
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), serde_json::to_string_pretty(&settings).unwrap()).unwrap();

        let loaded = load_settings(temp_file.path()).unwrap();
        assert_eq!(loaded.owner, settings.owner);
        assert_eq!(loaded.repository, settings.repository);
        assert_eq!(loaded.product_name, settings.product_name);
        assert_eq!(loaded.executable, settings.executable);
        assert_eq!(loaded.tag_prefix, settings.tag_prefix);
    }

    #[test]
    fn test_load_settings_malformed() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "{ not json").unwrap();
        assert!(matches!(
            load_settings(temp_file.path()),
            Err(LauncherError::Config(_))
        ));
    }
}
