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

//! Target release selection

use crate::release::RemoteRelease;
use crate::version_store::VersionRecord;
use chrono::{DateTime, Utc};

/// Whether a release is a candidate for this product at all
pub fn is_eligible(release: &RemoteRelease, tag_prefix: &str) -> bool {
    release.tag.starts_with(tag_prefix)
        && !release.assets.is_empty()
        && release.published_at.is_some()
}

/// Pick the eligible release published closest to `now`, in either direction.
///
/// Ties keep the release listed first in the feed.
pub fn select_target<'a>(
    releases: &'a [RemoteRelease],
    now: DateTime<Utc>,
    tag_prefix: &str,
) -> Option<&'a RemoteRelease> {
    let mut best: Option<(&RemoteRelease, i64)> = None;

    for release in releases {
        if !is_eligible(release, tag_prefix) {
            continue;
        }
        let Some(published_at) = release.published_at else {
            continue;
        };

        let distance = (now - published_at).num_milliseconds().abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((release, distance)),
        }
    }

    if let Some((release, distance)) = best {
        tracing::debug!(
            "Selected {} ({}ms from now) among {} releases",
            release.tag,
            distance,
            releases.len()
        );
    }

    best.map(|(release, _)| release)
}

/// The local install is stale when the target was published strictly later
pub fn is_out_of_date(record: &VersionRecord, target: &RemoteRelease) -> bool {
    target
        .published_at
        .is_some_and(|published_at| published_at > record.version_published_at)
}
