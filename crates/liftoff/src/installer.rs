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

//! Download, stage and apply a release to the installation directory.
//!
//! Every asset is downloaded and extracted into `<product>.staging` before
//! the installation is touched. In swap mode the new tree is assembled in
//! `<product>.next` and renamed over the install root; in merge mode staged
//! files are moved into the root one by one. The version record is written
//! last, so it only ever describes a completed install.

use crate::archive::extract_zip;
use crate::config::{InstallLayout, InstallMode, Settings};
use crate::downloader::Downloader;
use crate::error::{LauncherError, Result};
use crate::release::{RemoteAsset, RemoteRelease};
use crate::status::{DownloadProgress, StatusSink};
use crate::version_store::{VersionRecord, VersionStore};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Summary of a completed install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub tag: String,
    pub published_at: DateTime<Utc>,
    pub files_installed: usize,
}

#[derive(Debug, Clone)]
pub struct Installer {
    layout: InstallLayout,
    downloader: Downloader,
    store: VersionStore,
    mode: InstallMode,
    replace_dirs: Vec<String>,
}

impl Installer {
    pub fn new(layout: InstallLayout, downloader: Downloader) -> Self {
        Self {
            store: VersionStore::new(&layout.version_file),
            layout,
            downloader,
            mode: InstallMode::default(),
            replace_dirs: Vec::new(),
        }
    }

    pub fn from_settings(
        settings: &Settings,
        layout: InstallLayout,
        downloader: Downloader,
    ) -> Self {
        Self::new(layout, downloader)
            .with_mode(settings.install_mode)
            .with_replace_dirs(settings.replace_dirs.clone())
    }

    #[must_use]
    pub fn with_mode(mut self, mode: InstallMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_replace_dirs(mut self, replace_dirs: Vec<String>) -> Self {
        self.replace_dirs = replace_dirs;
        self
    }

    pub fn layout(&self) -> &InstallLayout {
        &self.layout
    }

    /// Install `target`, reporting progress to `status`.
    ///
    /// On error the version record is left as it was and, in swap mode,
    /// so is the installation directory.
    pub async fn install(
        &self,
        target: &RemoteRelease,
        status: &dyn StatusSink,
    ) -> Result<InstallReport> {
        let published_at = target.published_at.ok_or(LauncherError::NoEligibleRelease)?;

        tracing::info!(
            "Installing {} ({} assets, {:?} mode) into {}",
            target.tag,
            target.assets.len(),
            self.mode,
            self.layout.root.display()
        );

        self.prepare()?;

        let result = self.stage_and_apply(target, status).await;
        self.cleanup();
        let files_installed = result?;

        self.store.write(&VersionRecord::new(Utc::now(), published_at))?;

        tracing::info!("Installed {} ({files_installed} files)", target.tag);
        Ok(InstallReport {
            tag: target.tag.clone(),
            published_at,
            files_installed,
        })
    }

    /// Recover from an interrupted swap, drop stale work dirs, ensure the root exists
    fn prepare(&self) -> Result<()> {
        let layout = &self.layout;

        if !layout.root.exists() && layout.old.is_dir() {
            tracing::warn!("Restoring {} from interrupted swap", layout.root.display());
            std::fs::rename(&layout.old, &layout.root)
                .map_err(|e| LauncherError::write_failed(&layout.root, e))?;
        }

        for stale in [&layout.staging, &layout.next, &layout.old] {
            remove_path(stale)?;
        }

        std::fs::create_dir_all(&layout.root)
            .map_err(|e| LauncherError::write_failed(&layout.root, e))
    }

    async fn stage_and_apply(
        &self,
        target: &RemoteRelease,
        status: &dyn StatusSink,
    ) -> Result<usize> {
        let staged = self.stage(target, status).await?;

        status.report("installing");
        let plan = ApplyPlan {
            layout: self.layout.clone(),
            mode: self.mode,
            replace_dirs: self.replace_dirs.clone(),
            staged,
        };

        tokio::task::spawn_blocking(move || plan.run())
            .await
            .map_err(|e| LauncherError::Io(std::io::Error::other(e)))?
    }

    /// Download and extract every asset; the installation is not touched
    async fn stage(&self, target: &RemoteRelease, status: &dyn StatusSink) -> Result<Vec<PathBuf>> {
        let downloads = self.layout.staging.join("downloads");
        let extract_root = self.layout.staging.join("extract");
        let progress = DownloadProgress::new(status);
        let mut staged = Vec::with_capacity(target.assets.len());

        for (index, asset) in target.assets.iter().enumerate() {
            let archive = downloads.join(archive_file_name(index, asset));
            self.downloader.download(asset, &archive, &progress).await?;

            status.report("extracting");
            let dest = extract_root.join(index.to_string());
            extract_zip(&asset.name, &archive, &dest).await?;

            tokio::fs::remove_file(&archive)
                .await
                .map_err(|e| LauncherError::write_failed(&archive, e))?;
            staged.push(dest);
        }

        Ok(staged)
    }

    /// Remove work directories; failures here never fail the install
    fn cleanup(&self) {
        for dir in [&self.layout.staging, &self.layout.next] {
            if let Err(e) = remove_path(dir) {
                tracing::warn!("Failed to clean up {}: {e}", dir.display());
            }
        }
    }
}

fn archive_file_name(index: usize, asset: &RemoteAsset) -> String {
    Path::new(&asset.name)
        .file_name()
        .and_then(|n| n.to_str())
        .map_or_else(|| format!("asset-{index}.zip"), |n| format!("{index}-{n}"))
}

/// Filesystem half of an install, run on the blocking pool
struct ApplyPlan {
    layout: InstallLayout,
    mode: InstallMode,
    replace_dirs: Vec<String>,
    staged: Vec<PathBuf>,
}

impl ApplyPlan {
    fn run(self) -> Result<usize> {
        match self.mode {
            InstallMode::Merge => self.overlay(&self.layout.root),
            InstallMode::Swap => {
                copy_tree(&self.layout.root, &self.layout.next)?;
                let files = self.overlay(&self.layout.next)?;
                swap_into_place(&self.layout)?;
                Ok(files)
            }
        }
    }

    /// Clear every replace dir shipped by any asset, then merge assets in order
    fn overlay(&self, target: &Path) -> Result<usize> {
        let shipped = self
            .replace_dirs
            .iter()
            .filter(|dir| self.staged.iter().any(|staged| staged.join(dir).exists()));
        for dir in shipped {
            let existing = target.join(dir);
            tracing::debug!("Clearing {}", existing.display());
            remove_path(&existing)?;
        }

        let mut files = 0;
        for staged in &self.staged {
            files += merge_tree(staged, target)?;
        }
        Ok(files)
    }
}

/// `root -> old`, `next -> root`, then drop `old`
fn swap_into_place(layout: &InstallLayout) -> Result<()> {
    std::fs::rename(&layout.root, &layout.old)
        .map_err(|e| LauncherError::write_failed(&layout.old, e))?;

    if let Err(e) = std::fs::rename(&layout.next, &layout.root) {
        // Put the previous version back before reporting
        if let Err(restore) = std::fs::rename(&layout.old, &layout.root) {
            tracing::error!(
                "Failed to restore {} after aborted swap: {restore}",
                layout.root.display()
            );
        }
        return Err(LauncherError::write_failed(&layout.root, e));
    }

    if let Err(e) = std::fs::remove_dir_all(&layout.old) {
        tracing::warn!("Failed to remove {}: {e}", layout.old.display());
    }
    Ok(())
}

/// Move every file under `src` to the same relative path under `dst`
fn merge_tree(src: &Path, dst: &Path) -> Result<usize> {
    // Collect first: entries are moved out of `src` while merging
    let entries = WalkDir::new(src)
        .min_depth(1)
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| LauncherError::Io(e.into()))?;

    let mut files = 0;
    for entry in entries {
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let dest = dst.join(relative);

        if entry.file_type().is_dir() {
            if dest.exists() && !dest.is_dir() {
                remove_path(&dest)?;
            }
            std::fs::create_dir_all(&dest).map_err(|e| LauncherError::write_failed(&dest, e))?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LauncherError::write_failed(parent, e))?;
        }
        remove_path(&dest)?;
        move_file(entry.path(), &dest)?;
        tracing::trace!("Installed {}", relative.display());
        files += 1;
    }

    Ok(files)
}

/// Recursive copy of `src` into a fresh `dst`
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst).map_err(|e| LauncherError::write_failed(dst, e))?;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| LauncherError::Io(e.into()))?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let dest = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            std::fs::create_dir_all(&dest).map_err(|e| LauncherError::write_failed(&dest, e))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &dest)?;
        } else {
            std::fs::copy(entry.path(), &dest).map_err(|e| LauncherError::write_failed(&dest, e))?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let target = std::fs::read_link(src)?;
    std::os::unix::fs::symlink(target, dst).map_err(|e| LauncherError::write_failed(dst, e))
}

/// Symlinks are not reproduced off unix; fail the swap rather than drop them
#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    Err(LauncherError::write_failed(
        dst,
        std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            format!("cannot copy symlink {}", src.display()),
        ),
    ))
}

fn move_file(src: &Path, dst: &Path) -> Result<()> {
    if std::fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    // Different filesystem
    std::fs::copy(src, dst).map_err(|e| LauncherError::write_failed(dst, e))?;
    std::fs::remove_file(src).map_err(|e| LauncherError::write_failed(src, e))
}

/// Remove a file or directory tree; a missing path is not an error
fn remove_path(path: &Path) -> Result<()> {
    let result = match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path),
        Ok(_) => std::fs::remove_file(path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => Err(e),
    };
    result.map_err(|e| LauncherError::write_failed(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::tests::write_zip;
    use chrono::TimeZone;
    use mockito::{Mock, ServerGuard};
    use parking_lot::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl StatusSink for Recorder {
        fn report(&self, status: &str) {
            self.0.lock().push(status.to_string());
        }
    }

    struct Fixture {
        _temp: TempDir,
        layout: InstallLayout,
        server: ServerGuard,
    }

    impl Fixture {
        async fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let layout = InstallLayout::new(
                temp.path().join("popcron"),
                "Rocket Jump",
                "RocketJump/RocketJump.exe",
                "version.txt",
            );
            Self {
                _temp: temp,
                layout,
                server: mockito::Server::new_async().await,
            }
        }

        fn installer(&self, mode: InstallMode) -> Installer {
            Installer::new(self.layout.clone(), Downloader::new(reqwest::Client::new()))
                .with_mode(mode)
        }

        /// Serve a zip built from `entries` at `/dl/<name>`
        async fn serve_zip(&mut self, name: &str, entries: &[(&str, &str)]) -> (RemoteAsset, Mock) {
            let scratch = TempDir::new().unwrap();
            let path = scratch.path().join(name);
            write_zip(&path, entries);
            let bytes = std::fs::read(&path).unwrap();

            let mock = self
                .server
                .mock("GET", format!("/dl/{name}").as_str())
                .with_status(200)
                .with_body(bytes)
                .create_async()
                .await;
            let asset = RemoteAsset::new(name, format!("{}/dl/{name}", self.server.url()));
            (asset, mock)
        }

        fn read(&self, relative: &str) -> String {
            std::fs::read_to_string(self.layout.root.join(relative)).unwrap()
        }

        fn record(&self) -> Option<VersionRecord> {
            VersionStore::new(&self.layout.version_file).read()
        }

        fn assert_no_work_dirs(&self) {
            assert!(!self.layout.staging.exists(), "staging left behind");
            assert!(!self.layout.next.exists(), "next left behind");
            assert!(!self.layout.old.exists(), "old left behind");
        }
    }

    fn published() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn release_with(assets: Vec<RemoteAsset>) -> RemoteRelease {
        let mut release = RemoteRelease::new("rocketjump_1.1", Some(published()));
        release.assets = assets;
        release
    }

    #[tokio::test]
    async fn test_fresh_install_swap() {
        let mut fx = Fixture::new().await;
        let (asset, mock) = fx
            .serve_zip(
                "game.zip",
                &[
                    ("RocketJump/RocketJump.exe", "v1.1"),
                    ("RocketJump/Data/level1.dat", "level"),
                ],
            )
            .await;

        let status = Recorder::default();
        let report = fx
            .installer(InstallMode::Swap)
            .install(&release_with(vec![asset]), &status)
            .await
            .unwrap();

        assert_eq!(report.tag, "rocketjump_1.1");
        assert_eq!(report.published_at, published());
        assert_eq!(report.files_installed, 2);
        assert_eq!(fx.read("RocketJump/RocketJump.exe"), "v1.1");
        assert_eq!(fx.record().unwrap().version_published_at, published());
        fx.assert_no_work_dirs();

        let statuses = status.0.lock();
        assert!(statuses.iter().any(|s| s == "downloading 100%"));
        assert!(statuses.contains(&"extracting".to_string()));
        assert_eq!(statuses.last().map(String::as_str), Some("installing"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_reinstall_is_idempotent() {
        for mode in [InstallMode::Swap, InstallMode::Merge] {
            let mut fx = Fixture::new().await;
            let (asset, _mock) = fx
                .serve_zip("game.zip", &[("RocketJump/RocketJump.exe", "v1.1")])
                .await;
            let release = release_with(vec![asset]);
            let installer = fx.installer(mode);

            installer.install(&release, &Recorder::default()).await.unwrap();
            let first = fx.record().unwrap();
            installer.install(&release, &Recorder::default()).await.unwrap();

            assert_eq!(fx.read("RocketJump/RocketJump.exe"), "v1.1");
            assert_eq!(
                fx.record().unwrap().version_published_at,
                first.version_published_at
            );
            fx.assert_no_work_dirs();
        }
    }

    #[tokio::test]
    async fn test_existing_files_overwritten_and_extras_kept() {
        for mode in [InstallMode::Swap, InstallMode::Merge] {
            let mut fx = Fixture::new().await;
            std::fs::create_dir_all(fx.layout.root.join("RocketJump")).unwrap();
            std::fs::write(fx.layout.root.join("RocketJump/RocketJump.exe"), "v1.0").unwrap();
            std::fs::write(fx.layout.root.join("settings.ini"), "volume=3").unwrap();

            let (asset, _mock) = fx
                .serve_zip("game.zip", &[("RocketJump/RocketJump.exe", "v1.1")])
                .await;
            fx.installer(mode)
                .install(&release_with(vec![asset]), &Recorder::default())
                .await
                .unwrap();

            assert_eq!(fx.read("RocketJump/RocketJump.exe"), "v1.1");
            assert_eq!(fx.read("settings.ini"), "volume=3");
        }
    }

    #[tokio::test]
    async fn test_replace_dirs_cleared_only_when_shipped() {
        let mut fx = Fixture::new().await;
        std::fs::create_dir_all(fx.layout.root.join("RocketJump/Data")).unwrap();
        std::fs::create_dir_all(fx.layout.root.join("RocketJump/Mods")).unwrap();
        std::fs::write(fx.layout.root.join("RocketJump/Data/old.dat"), "old").unwrap();
        std::fs::write(fx.layout.root.join("RocketJump/Mods/mod.dat"), "mod").unwrap();

        let (asset, _mock) = fx
            .serve_zip(
                "game.zip",
                &[
                    ("RocketJump/RocketJump.exe", "v1.1"),
                    ("RocketJump/Data/new.dat", "new"),
                ],
            )
            .await;

        fx.installer(InstallMode::Swap)
            .with_replace_dirs(vec![
                "RocketJump/Data".to_string(),
                "RocketJump/Mods".to_string(),
            ])
            .install(&release_with(vec![asset]), &Recorder::default())
            .await
            .unwrap();

        assert!(!fx.layout.root.join("RocketJump/Data/old.dat").exists());
        assert_eq!(fx.read("RocketJump/Data/new.dat"), "new");
        // Not shipped by the release, so left alone
        assert_eq!(fx.read("RocketJump/Mods/mod.dat"), "mod");
    }

    #[tokio::test]
    async fn test_multi_asset_merge_in_order() {
        let mut fx = Fixture::new().await;
        let (base, _m1) = fx
            .serve_zip(
                "base.zip",
                &[
                    ("RocketJump/RocketJump.exe", "base"),
                    ("RocketJump/readme.txt", "base readme"),
                ],
            )
            .await;
        let (patch, _m2) = fx
            .serve_zip("patch.zip", &[("RocketJump/readme.txt", "patched readme")])
            .await;

        let report = fx
            .installer(InstallMode::Merge)
            .install(&release_with(vec![base, patch]), &Recorder::default())
            .await
            .unwrap();

        assert_eq!(report.files_installed, 3);
        assert_eq!(fx.read("RocketJump/RocketJump.exe"), "base");
        assert_eq!(fx.read("RocketJump/readme.txt"), "patched readme");
    }

    #[tokio::test]
    async fn test_replace_dir_shared_across_assets_keeps_all_files() {
        for mode in [InstallMode::Swap, InstallMode::Merge] {
            let mut fx = Fixture::new().await;
            std::fs::create_dir_all(fx.layout.root.join("RocketJump/Data")).unwrap();
            std::fs::write(fx.layout.root.join("RocketJump/Data/old.dat"), "old").unwrap();

            let (base, _m1) = fx
                .serve_zip("base.zip", &[("RocketJump/Data/a.dat", "a")])
                .await;
            let (patch, _m2) = fx
                .serve_zip("patch.zip", &[("RocketJump/Data/b.dat", "b")])
                .await;

            fx.installer(mode)
                .with_replace_dirs(vec!["RocketJump/Data".to_string()])
                .install(&release_with(vec![base, patch]), &Recorder::default())
                .await
                .unwrap();

            assert_eq!(fx.read("RocketJump/Data/a.dat"), "a", "{mode:?}");
            assert_eq!(fx.read("RocketJump/Data/b.dat"), "b", "{mode:?}");
            assert!(!fx.layout.root.join("RocketJump/Data/old.dat").exists(), "{mode:?}");
            assert_eq!(fx.record().unwrap().version_published_at, published());
            fx.assert_no_work_dirs();
        }
    }

    #[tokio::test]
    async fn test_download_failure_leaves_install_untouched() {
        for mode in [InstallMode::Swap, InstallMode::Merge] {
            let mut fx = Fixture::new().await;
            std::fs::create_dir_all(fx.layout.root.join("RocketJump")).unwrap();
            std::fs::write(fx.layout.root.join("RocketJump/RocketJump.exe"), "v1.0").unwrap();
            let previous = VersionRecord::new(
                Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            );
            VersionStore::new(&fx.layout.version_file)
                .write(&previous)
                .unwrap();

            let (good, _mock) = fx
                .serve_zip("game.zip", &[("RocketJump/RocketJump.exe", "v1.1")])
                .await;
            let _missing = fx
                .server
                .mock("GET", "/dl/extras.zip")
                .with_status(500)
                .create_async()
                .await;
            let broken =
                RemoteAsset::new("extras.zip", format!("{}/dl/extras.zip", fx.server.url()));

            let err = fx
                .installer(mode)
                .install(&release_with(vec![good, broken]), &Recorder::default())
                .await
                .unwrap_err();

            assert!(matches!(err, LauncherError::DownloadFailed { .. }));
            assert_eq!(fx.read("RocketJump/RocketJump.exe"), "v1.0");
            assert_eq!(fx.record(), Some(previous));
            fx.assert_no_work_dirs();
        }
    }

    #[tokio::test]
    async fn test_corrupt_asset_fails_extraction() {
        let mut fx = Fixture::new().await;
        let _mock = fx
            .server
            .mock("GET", "/dl/game.zip")
            .with_status(200)
            .with_body("definitely not a zip")
            .create_async()
            .await;
        let asset = RemoteAsset::new("game.zip", format!("{}/dl/game.zip", fx.server.url()));

        let err = fx
            .installer(InstallMode::Swap)
            .install(&release_with(vec![asset]), &Recorder::default())
            .await
            .unwrap_err();

        assert!(matches!(err, LauncherError::ExtractionFailed { .. }));
        assert!(fx.record().is_none());
        fx.assert_no_work_dirs();
    }

    #[tokio::test]
    async fn test_stale_work_dirs_removed() {
        let mut fx = Fixture::new().await;
        std::fs::create_dir_all(fx.layout.staging.join("downloads")).unwrap();
        std::fs::write(fx.layout.staging.join("downloads/junk.zip"), "junk").unwrap();
        std::fs::create_dir_all(fx.layout.next.join("RocketJump")).unwrap();
        std::fs::write(fx.layout.next.join("RocketJump/stale.txt"), "stale").unwrap();

        let (asset, _mock) = fx
            .serve_zip("game.zip", &[("RocketJump/RocketJump.exe", "v1.1")])
            .await;
        fx.installer(InstallMode::Swap)
            .install(&release_with(vec![asset]), &Recorder::default())
            .await
            .unwrap();

        assert!(!fx.layout.root.join("RocketJump/stale.txt").exists());
        fx.assert_no_work_dirs();
    }

    #[tokio::test]
    async fn test_interrupted_swap_is_recovered() {
        let mut fx = Fixture::new().await;
        std::fs::create_dir_all(fx.layout.old.join("RocketJump")).unwrap();
        std::fs::write(fx.layout.old.join("RocketJump/RocketJump.exe"), "v1.0").unwrap();

        let _missing = fx
            .server
            .mock("GET", "/dl/game.zip")
            .with_status(404)
            .create_async()
            .await;
        let asset = RemoteAsset::new("game.zip", format!("{}/dl/game.zip", fx.server.url()));

        let result = fx
            .installer(InstallMode::Swap)
            .install(&release_with(vec![asset]), &Recorder::default())
            .await;

        assert!(result.is_err());
        assert_eq!(fx.read("RocketJump/RocketJump.exe"), "v1.0");
        fx.assert_no_work_dirs();
    }

    #[test]
    fn test_archive_file_name_strips_directories() {
        let asset = RemoteAsset::new("../../evil.zip", "http://x");
        assert_eq!(archive_file_name(3, &asset), "3-evil.zip");

        let asset = RemoteAsset::new("..", "http://x");
        assert_eq!(archive_file_name(0, &asset), "asset-0.zip");
    }

    #[test]
    fn test_remove_path_missing_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        remove_path(&temp_dir.path().join("nope")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_tree_keeps_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("RocketJump.exe"), "v1.0").unwrap();
        std::os::unix::fs::symlink("RocketJump.exe", src.join("launch")).unwrap();

        let dst = temp_dir.path().join("dst");
        copy_tree(&src, &dst).unwrap();

        let link = dst.join("launch");
        assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_link(&link).unwrap(), Path::new("RocketJump.exe"));
        assert_eq!(std::fs::read_to_string(&link).unwrap(), "v1.0");
    }
}
