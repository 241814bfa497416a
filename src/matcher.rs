// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pairing web-standard encodings with platform encodings.
//!
//! First match wins: for each web entry the platform catalog is scanned in
//! order and the first entry whose alias set intersects is taken. The platform
//! catalog is stable-sorted by canonical name up front, so ties resolve the
//! same way no matter what order the registry listed its encodings in.

use crate::alias::EncodingAlias;

/// Result of matching one web-standard entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPair {
    pub web_name: String,
    pub platform_name: Option<String>,
}

impl MatchPair {
    pub fn is_matched(&self) -> bool {
        self.platform_name.is_some()
    }
}

/// Platform catalog prepared for first-match scanning.
#[derive(Debug, Clone)]
pub struct Matcher {
    platform: Vec<EncodingAlias>,
}

impl Matcher {
    pub fn new(platform: impl IntoIterator<Item = EncodingAlias>) -> Self {
        let mut platform: Vec<EncodingAlias> = platform.into_iter().collect();
        platform.sort_by(|a, b| a.canonical_name().cmp(b.canonical_name()));
        Self { platform }
    }

    /// Platform entries in scan order.
    pub fn platform(&self) -> &[EncodingAlias] {
        &self.platform
    }

    /// Canonical name of the first platform entry sharing a variant, if any.
    pub fn resolve(&self, web: &EncodingAlias) -> Option<&str> {
        self.platform
            .iter()
            .find(|candidate| web.intersects(candidate))
            .map(EncodingAlias::canonical_name)
    }

    /// Resolve every web entry, in web catalog order.
    pub fn match_all(&self, web: &[EncodingAlias]) -> Vec<MatchPair> {
        web.iter()
            .map(|entry| {
                let platform_name = self.resolve(entry).map(str::to_string);
                match &platform_name {
                    Some(platform) => tracing::debug!(
                        web = entry.canonical_name(),
                        platform = platform.as_str(),
                        "matched"
                    ),
                    None => tracing::warn!(web = entry.canonical_name(), "unable to match"),
                }
                MatchPair {
                    web_name: entry.canonical_name().to_string(),
                    platform_name,
                }
            })
            .collect()
    }
}

/// Match a web catalog against a platform catalog.
pub fn match_catalogs(web: &[EncodingAlias], platform: &[EncodingAlias]) -> Vec<MatchPair> {
    Matcher::new(platform.iter().cloned()).match_all(web)
}
