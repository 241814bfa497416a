// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build manifest: what happened to every catalog entry.
//!
//! Every web entry lands in exactly one of the four lists. Only `matched`
//! entries reach the artifact.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::derive::TablePolicy;
use crate::error::{EncmapError, Result};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchedEntry {
    pub name: String,
    pub platform_name: String,
    pub policy: TablePolicy,
    /// Table length
    pub entries: usize,
}

/// An entry that matched but carries no table.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEntry {
    pub name: String,
    pub platform_name: String,
    pub reason: String,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub matched: Vec<MatchedEntry>,
    pub unmatched: Vec<String>,
    /// UTF-8 entries: matched, deliberately untabulated
    pub excluded: Vec<SkippedEntry>,
    /// Derivation faults
    pub failed: Vec<SkippedEntry>,
}

impl BuildReport {
    /// Number of catalog entries accounted for.
    pub fn total(&self) -> usize {
        self.matched.len() + self.unmatched.len() + self.excluded.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn matched_entry(&self, name: &str) -> Option<&MatchedEntry> {
        self.matched.iter().find(|m| m.name == name)
    }
}

/// Write the report as pretty JSON.
pub fn write_report(report: &BuildReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|source| EncmapError::Write {
        path: path.to_path_buf(),
        source,
    })
}
