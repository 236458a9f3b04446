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

//! Remote release feed: domain types and the GitHub Releases client

use crate::config::Settings;
use crate::error::{LauncherError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;

/// Downloadable archive attached to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAsset {
    pub name: String,
    pub download_url: String,
    /// Size reported by the feed, used when the download has no Content-Length
    pub size: Option<u64>,
}

impl RemoteAsset {
    pub fn new(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            download_url: download_url.into(),
            size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRelease {
    pub tag: String,
    pub name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub assets: Vec<RemoteAsset>,
}

impl RemoteRelease {
    pub fn new(tag: impl Into<String>, published_at: Option<DateTime<Utc>>) -> Self {
        Self {
            tag: tag.into(),
            name: None,
            published_at,
            assets: Vec::new(),
        }
    }

    pub fn with_asset(mut self, asset: RemoteAsset) -> Self {
        self.assets.push(asset);
        self
    }

    /// Name shown to the user, falling back to the tag
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.tag)
    }
}

/// Source of the release list for one product
#[async_trait]
pub trait ReleaseFeed: Send + Sync {
    async fn fetch_releases(&self) -> Result<Vec<RemoteRelease>>;
}

#[derive(Debug, Deserialize)]
struct GithubRelease {
    tag_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    assets: Vec<GithubAsset>,
}

#[derive(Debug, Deserialize)]
struct GithubAsset {
    name: String,
    browser_download_url: String,
    #[serde(default)]
    size: Option<u64>,
}

impl From<GithubRelease> for RemoteRelease {
    fn from(release: GithubRelease) -> Self {
        Self {
            tag: release.tag_name,
            name: release.name,
            published_at: release.published_at,
            assets: release
                .assets
                .into_iter()
                .map(|a| RemoteAsset {
                    name: a.name,
                    download_url: a.browser_download_url,
                    size: a.size,
                })
                .collect(),
        }
    }
}

/// Build the HTTP client shared by the feed and the downloader
pub fn http_client(settings: &Settings) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(settings.user_agent())
        .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .build()
        .map_err(|e| LauncherError::Config(format!("Failed to build HTTP client: {e}")))
}

/// GitHub Releases API client for `owner/repository`
#[derive(Debug, Clone)]
pub struct GithubFeed {
    client: reqwest::Client,
    base_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GithubFeed {
    pub fn new(client: reqwest::Client, settings: &Settings) -> Self {
        Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            owner: settings.owner.clone(),
            repo: settings.repository.clone(),
            token: settings.token.clone(),
        }
    }

    fn releases_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases?per_page=100",
            self.base_url, self.owner, self.repo
        )
    }
}

#[async_trait]
impl ReleaseFeed for GithubFeed {
    async fn fetch_releases(&self) -> Result<Vec<RemoteRelease>> {
        let url = self.releases_url();
        tracing::debug!("Fetching releases from {url}");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json");

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LauncherError::RemoteFetchFailed(format!("Request failed: {e}")))?;

        // Check rate limit
        if let Some(remaining) = response.headers().get("x-ratelimit-remaining")
            && let Ok(remaining_str) = remaining.to_str()
            && let Ok(remaining_int) = remaining_str.parse::<u32>()
            && remaining_int < 10
        {
            tracing::warn!("GitHub rate limit low: {remaining_int} remaining");
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(LauncherError::RemoteFetchFailed(format!(
                "GitHub API error {status}: {body}"
            )));
        }

        let releases: Vec<GithubRelease> = response.json().await.map_err(|e| {
            LauncherError::RemoteFetchFailed(format!("Failed to parse response: {e}"))
        })?;

        tracing::info!(
            "Fetched {} releases from {}/{}",
            releases.len(),
            self.owner,
            self.repo
        );
        Ok(releases.into_iter().map(RemoteRelease::from).collect())
    }
}
