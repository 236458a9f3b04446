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

//! Fixtures shared by the end-to-end launcher scenarios

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use liftoff::downloader::Downloader;
use liftoff::release::http_client;
use liftoff::{
    GithubFeed, InstallLayout, Installer, Launch, LaunchOutcome, LauncherError, ReleaseFeed,
    RemoteRelease, Settings, StatusSink, UpdateOrchestrator, VersionRecord, VersionStore,
};
use mockito::{Mock, ServerGuard};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub const EXECUTABLE: &str = "RocketJump/RocketJump.exe";

/// Whole seconds `offset_secs` away from now, as the feed reports them
pub fn timestamp(offset_secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(Utc::now().timestamp() + offset_secs, 0).unwrap()
}

/// In-memory zip; names ending in `/` become directories
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, contents) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

/// Collects every status line in order
#[derive(Debug, Default)]
pub struct RecordingStatus(Mutex<Vec<String>>);

impl RecordingStatus {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.0.lock().iter().any(|l| l == line)
    }
}

impl StatusSink for RecordingStatus {
    fn report(&self, status: &str) {
        self.0.lock().push(status.to_string());
    }
}

/// Records launch requests instead of spawning processes
#[derive(Debug, Default)]
pub struct FakeLauncher(Mutex<Vec<PathBuf>>);

impl FakeLauncher {
    pub fn launches(&self) -> Vec<PathBuf> {
        self.0.lock().clone()
    }
}

impl Launch for FakeLauncher {
    fn launch(&self, executable: &Path) -> liftoff::Result<LaunchOutcome> {
        self.0.lock().push(executable.to_path_buf());
        if executable.is_file() {
            Ok(LaunchOutcome::Launched { pid: 1 })
        } else {
            Ok(LaunchOutcome::NotFound)
        }
    }
}

/// Feed double returning a fixed list
#[derive(Debug, Clone)]
pub struct StaticFeed(pub Vec<RemoteRelease>);

#[async_trait]
impl ReleaseFeed for StaticFeed {
    async fn fetch_releases(&self) -> liftoff::Result<Vec<RemoteRelease>> {
        Ok(self.0.clone())
    }
}

/// Feed double that is always unreachable
#[derive(Debug, Clone, Copy)]
pub struct FailingFeed;

#[async_trait]
impl ReleaseFeed for FailingFeed {
    async fn fetch_releases(&self) -> liftoff::Result<Vec<RemoteRelease>> {
        Err(LauncherError::RemoteFetchFailed(
            "connection refused".to_string(),
        ))
    }
}

pub type GithubOrchestrator = UpdateOrchestrator<GithubFeed, FakeLauncher, RecordingStatus>;

/// Temporary install root plus a mock GitHub server
pub struct TestEnv {
    pub temp: TempDir,
    pub server: ServerGuard,
    pub settings: Settings,
}

impl TestEnv {
    pub async fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let server = mockito::Server::new_async().await;

        let mut settings = Settings::new("popcron", "games", "Rocket Jump", EXECUTABLE);
        settings.tag_prefix = "rocketjump_".to_string();
        settings.install_root = Some(temp.path().to_path_buf());
        settings.api_base_url = server.url();
        settings.step_delay_ms = 0;
        settings.error_delay_ms = 0;

        Self {
            temp,
            server,
            settings,
        }
    }

    pub fn layout(&self) -> InstallLayout {
        self.settings.layout().unwrap()
    }

    pub fn asset_url(&self, name: &str) -> String {
        format!("{}/download/{name}", self.server.url())
    }

    /// Serve a zip asset built from `entries`, expected to be fetched once
    pub async fn serve_asset(&mut self, name: &str, entries: &[(&str, &str)]) -> Mock {
        self.serve_asset_expecting(name, entries, 1).await
    }

    pub async fn serve_asset_expecting(
        &mut self,
        name: &str,
        entries: &[(&str, &str)],
        hits: usize,
    ) -> Mock {
        self.server
            .mock("GET", format!("/download/{name}").as_str())
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_body(zip_bytes(entries))
            .expect(hits)
            .create_async()
            .await
    }

    /// GitHub release JSON for `tag` carrying the named assets
    pub fn release_json(
        &self,
        tag: &str,
        name: &str,
        published: DateTime<Utc>,
        assets: &[&str],
    ) -> Value {
        let assets: Vec<Value> = assets
            .iter()
            .map(|asset| {
                json!({
                    "name": asset,
                    "browser_download_url": self.asset_url(asset),
                })
            })
            .collect();
        json!({
            "tag_name": tag,
            "name": name,
            "published_at": published.to_rfc3339(),
            "assets": assets,
        })
    }

    /// Serve the release list endpoint
    pub async fn serve_releases(&mut self, releases: &[Value]) -> Mock {
        self.server
            .mock("GET", "/repos/popcron/games/releases")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(Value::Array(releases.to_vec()).to_string())
            .create_async()
            .await
    }

    pub fn installer(&self) -> Installer {
        let client = http_client(&self.settings).unwrap();
        Installer::from_settings(&self.settings, self.layout(), Downloader::new(client))
    }

    /// Orchestrator talking to the mock server
    pub fn github_orchestrator(&self) -> GithubOrchestrator {
        let client = http_client(&self.settings).unwrap();
        let feed = GithubFeed::new(client, &self.settings);
        self.orchestrator_with(feed)
    }

    pub fn orchestrator_with<F: ReleaseFeed>(
        &self,
        feed: F,
    ) -> UpdateOrchestrator<F, FakeLauncher, RecordingStatus> {
        UpdateOrchestrator::new(
            &self.settings,
            feed,
            self.installer(),
            FakeLauncher::default(),
            RecordingStatus::default(),
        )
    }

    /// Pretend a version published at `published` is already installed
    pub fn install_locally(&self, contents: &str, published: DateTime<Utc>) -> VersionRecord {
        let layout = self.layout();
        std::fs::create_dir_all(layout.executable.parent().unwrap()).unwrap();
        std::fs::write(&layout.executable, contents).unwrap();

        let record = VersionRecord::new(timestamp(-60), published);
        VersionStore::new(&layout.version_file)
            .write(&record)
            .unwrap();
        record
    }

    pub fn record(&self) -> Option<VersionRecord> {
        VersionStore::new(self.layout().version_file).read()
    }

    pub fn executable_contents(&self) -> Option<String> {
        std::fs::read_to_string(self.layout().executable).ok()
    }

    pub fn work_dirs_left(&self) -> Vec<PathBuf> {
        let layout = self.layout();
        [layout.staging, layout.next, layout.old]
            .into_iter()
            .filter(|p| p.exists())
            .collect()
    }
}
