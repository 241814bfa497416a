// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact emission.
//!
//! The artifact is a single JavaScript statement binding the final table list
//! to a variable:
//!
//! ```text
//! let TEXT_ENCODINGS_RAW = [{"name":"windows-1252","aliases":[...],
//!     "platformName":"windows-1252","codePoints":[...],"bytesForCodePoints":[[...]]}, ...];
//! ```
//!
//! [`parse_artifact`] reads the same shape back so an emitted file can be
//! checked independently of the run that produced it.

pub mod verification;

use std::fs;
use std::path::Path;

use crate::catalog::MappedEncoding;
use crate::error::{EncmapError, Result};

pub use verification::{
    encoded_page, expected_text, page_file_name, render_index, write_verification_bundle,
};

/// A parsed artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub variable: String,
    pub entries: Vec<MappedEncoding>,
}

/// Reject names that would not parse as a `let` binding.
pub fn validate_variable(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        Ok(())
    } else {
        Err(EncmapError::InvalidVariable(name.to_string()))
    }
}

/// Render `let <variable> = <json>;` with compact JSON.
pub fn render_artifact(variable: &str, entries: &[MappedEncoding]) -> Result<String> {
    validate_variable(variable)?;
    let json = serde_json::to_string(entries)?;
    Ok(format!("let {} = {};", variable, json))
}

pub fn write_artifact(path: &Path, variable: &str, entries: &[MappedEncoding]) -> Result<()> {
    let content = render_artifact(variable, entries)?;
    fs::write(path, content).map_err(|source| EncmapError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse an artifact produced by [`render_artifact`].
pub fn parse_artifact(text: &str) -> Result<Artifact> {
    let malformed = |what: &str| EncmapError::MalformedArtifact(what.to_string());

    let rest = text
        .trim()
        .strip_prefix("let ")
        .ok_or_else(|| malformed("missing `let` binding"))?;
    let (variable, json) = rest
        .split_once('=')
        .ok_or_else(|| malformed("missing `=`"))?;
    let json = json
        .trim()
        .strip_suffix(';')
        .ok_or_else(|| malformed("missing trailing `;`"))?;

    let variable = variable.trim().to_string();
    validate_variable(&variable)?;

    let entries: Vec<MappedEncoding> = serde_json::from_str(json)?;
    Ok(Artifact { variable, entries })
}

pub fn load_artifact(path: &Path) -> Result<Artifact> {
    let text = fs::read_to_string(path).map_err(|source| EncmapError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_artifact(&text)
}
