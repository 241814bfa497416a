// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Two layers. [`EncmapError`] is for the collaborator boundary: reading the
//! catalog, writing the artifact, parsing an artifact back. Those are the only
//! faults allowed to stop a run. [`DeriveError`] is scoped to one encoding and
//! ends up in the build report; the batch keeps going.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncmapError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate encoding name in catalog: {0}")]
    DuplicateName(String),
    #[error("unknown platform encoding: {0}")]
    UnknownEncoding(String),
    #[error("malformed artifact: {0}")]
    MalformedArtifact(String),
    #[error("not a valid JavaScript identifier: {0:?}")]
    InvalidVariable(String),
}

pub type Result<T> = std::result::Result<T, EncmapError>;

/// A fault while deriving one encoding's table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
    #[error("platform registry has no codec for {0}")]
    NoCodec(String),
    #[error("byte 0x{byte:02X} decoded to {units} characters, expected exactly one")]
    DecodeWidth { byte: u8, units: usize },
    #[error("byte 0x{byte:02X} decoded to U+{code_point:04X}, which does not encode back")]
    NotReencodable { byte: u8, code_point: u32 },
    #[error("byte 0x{byte:02X} decoded to U+{code_point:04X}, which encodes back to {encoded:02X?}")]
    RoundTrip {
        byte: u8,
        code_point: u32,
        encoded: Vec<u8>,
    },
    #[error("no code point of the Basic Multilingual Plane is encodable")]
    EmptyTable,
}
