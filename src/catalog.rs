// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Catalog records and their JSON shape.
//!
//! The same record type is read from the web-standard list and written to the
//! artifact. On input only `name` and `aliases` matter; anything else present
//! (a platform name or tables from an earlier run) is ignored, since every
//! output record is built fresh by [`MappedEncoding::resolved`].

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alias::EncodingAlias;
use crate::error::{EncmapError, Result};

/// Parallel code point / byte sequence columns of one encoding.
///
/// `byte_sequences[i]` encodes `code_points[i]`. Lengths always agree; the
/// constructor and the deserializer both reject anything else.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "RawCodecTable")]
pub struct CodecTable {
    #[serde(rename = "codePoints")]
    code_points: Vec<u32>,
    #[serde(rename = "bytesForCodePoints")]
    byte_sequences: Vec<Vec<u8>>,
}

#[derive(Deserialize)]
struct RawCodecTable {
    #[serde(rename = "codePoints")]
    code_points: Vec<u32>,
    #[serde(rename = "bytesForCodePoints")]
    byte_sequences: Vec<Vec<u8>>,
}

impl TryFrom<RawCodecTable> for CodecTable {
    type Error = String;

    fn try_from(raw: RawCodecTable) -> std::result::Result<Self, Self::Error> {
        CodecTable::from_columns(raw.code_points, raw.byte_sequences)
    }
}

impl CodecTable {
    pub fn new() -> Self {
        Self {
            code_points: Vec::new(),
            byte_sequences: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            code_points: Vec::with_capacity(capacity),
            byte_sequences: Vec::with_capacity(capacity),
        }
    }

    /// Build from two columns, rejecting a length mismatch.
    pub fn from_columns(
        code_points: Vec<u32>,
        byte_sequences: Vec<Vec<u8>>,
    ) -> std::result::Result<Self, String> {
        if code_points.len() != byte_sequences.len() {
            return Err(format!(
                "codePoints has {} entries but bytesForCodePoints has {}",
                code_points.len(),
                byte_sequences.len()
            ));
        }
        Ok(Self {
            code_points,
            byte_sequences,
        })
    }

    pub fn push(&mut self, code_point: u32, bytes: Vec<u8>) {
        self.code_points.push(code_point);
        self.byte_sequences.push(bytes);
    }

    pub fn code_points(&self) -> &[u32] {
        &self.code_points
    }

    pub fn byte_sequences(&self) -> &[Vec<u8>] {
        &self.byte_sequences
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[u8])> + '_ {
        self.code_points
            .iter()
            .zip(&self.byte_sequences)
            .map(|(&cp, bytes)| (cp, bytes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.code_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_points.is_empty()
    }

    /// Byte sequence for a code point, if the table has one.
    ///
    /// Single-byte tables are in byte order, not code point order, so this is
    /// a linear scan.
    pub fn bytes_for(&self, code_point: u32) -> Option<&[u8]> {
        self.code_points
            .iter()
            .position(|&cp| cp == code_point)
            .map(|i| self.byte_sequences[i].as_slice())
    }
}

impl Default for CodecTable {
    fn default() -> Self {
        Self::new()
    }
}

/// One encoding as known to the web-standard list, optionally resolved.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", try_from = "RawMappedEncoding")]
pub struct MappedEncoding {
    /// Web-standard identifier
    pub name: String,
    pub aliases: Vec<String>,
    /// Platform registry identifier, set once matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
    #[serde(flatten)]
    pub table: Option<CodecTable>,
}

/// Wire shape of a record. The two table columns are read separately so a
/// half-present or ragged table is an error instead of a silent `None`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMappedEncoding {
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default, alias = "dotnet_name")]
    platform_name: Option<String>,
    #[serde(default)]
    code_points: Option<Vec<u32>>,
    #[serde(default, rename = "bytesForCodePoints")]
    byte_sequences: Option<Vec<Vec<u8>>>,
}

impl TryFrom<RawMappedEncoding> for MappedEncoding {
    type Error = String;

    fn try_from(raw: RawMappedEncoding) -> std::result::Result<Self, Self::Error> {
        let table = match (raw.code_points, raw.byte_sequences) {
            (Some(code_points), Some(bytes)) => Some(
                CodecTable::from_columns(code_points, bytes)
                    .map_err(|e| format!("{}: {}", raw.name, e))?,
            ),
            (None, None) => None,
            (Some(_), None) => {
                return Err(format!("{}: codePoints without bytesForCodePoints", raw.name))
            }
            (None, Some(_)) => {
                return Err(format!("{}: bytesForCodePoints without codePoints", raw.name))
            }
        };
        Ok(Self {
            name: raw.name,
            aliases: raw.aliases,
            platform_name: raw.platform_name,
            table,
        })
    }
}

impl MappedEncoding {
    /// An unresolved catalog entry.
    pub fn new<I, S>(name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
            platform_name: None,
            table: None,
        }
    }

    /// A fresh record carrying a derived table. The source entry is untouched.
    pub fn resolved(source: &MappedEncoding, platform_name: &str, table: CodecTable) -> Self {
        Self {
            name: source.name.clone(),
            aliases: source.aliases.clone(),
            platform_name: Some(platform_name.to_string()),
            table: Some(table),
        }
    }

    /// Alias set used for matching: the web name plus every listed alias.
    pub fn alias_set(&self) -> EncodingAlias {
        EncodingAlias::new(self.name.as_str(), &self.aliases)
    }

    /// True when the record survives the final filter.
    pub fn is_complete(&self) -> bool {
        self.platform_name.as_deref().is_some_and(|n| !n.is_empty()) && self.table.is_some()
    }
}

/// Parse a web-standard catalog from JSON text.
///
/// Names must be unique; matching and reporting are keyed on them.
pub fn parse_catalog(json: &str) -> Result<Vec<MappedEncoding>> {
    let entries: Vec<MappedEncoding> = serde_json::from_str(json)?;

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &entries {
        if !seen.insert(entry.name.as_str()) {
            return Err(EncmapError::DuplicateName(entry.name.clone()));
        }
    }

    // Anything pre-populated is recomputed, never trusted.
    Ok(entries
        .into_iter()
        .map(|e| MappedEncoding::new(e.name, e.aliases))
        .collect())
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<Vec<MappedEncoding>> {
    let content = fs::read_to_string(path).map_err(|source| EncmapError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&content)
}
