// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Independent checks over emitted tables.
//!
//! Nothing here calls into [`crate::derive`]. The checks go straight to the
//! registry's codecs, so a derivation bug cannot hide itself by being
//! consistent with its own output.
//!
//! | Check                           | Applies to          |
//! |---------------------------------|---------------------|
//! | [`check_entry_shape`]           | every entry         |
//! | [`check_single_byte_round_trip`]| single-byte tables  |
//! | [`check_multi_byte_redecode`]   | everything else     |

use std::collections::HashMap;

use thiserror::Error;

use crate::catalog::{CodecTable, MappedEncoding};
use crate::registry::{Codec, PlatformRegistry};

/// Per-entry cap on reported violations. A wrong table is usually wrong everywhere.
pub const MAX_VIOLATIONS_PER_ENTRY: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("no platform name")]
    MissingPlatformName,
    #[error("no codepoint/byte table")]
    MissingTable,
    #[error("platform registry has no codec for {0}")]
    UnknownEncoding(String),
    #[error("single-byte table has {0} entries, expected 256")]
    SingleByteLength(usize),
    #[error("entry {index} holds {bytes:02X?}, expected [{index:02X}]")]
    ByteOrder { index: usize, bytes: Vec<u8> },
    #[error("byte 0x{byte:02X} decodes to {decoded:?}, table says U+{code_point:04X}")]
    DecodeMismatch {
        byte: u8,
        code_point: u32,
        decoded: String,
    },
    #[error("byte 0x{byte:02X} does not survive decode and re-encode")]
    RoundTrip { byte: u8 },
    #[error("U+{code_point:04X}: {bytes:02X?} decodes to {decoded:?}")]
    Redecode {
        code_point: u32,
        bytes: Vec<u8>,
        decoded: String,
    },
    #[error("code points not strictly ascending at entry {0}")]
    Unordered(usize),
}

/// A violation attributed to one artifact entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryViolation {
    pub name: String,
    pub violation: Violation,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub checked: usize,
    pub violations: Vec<EntryViolation>,
}

impl VerificationReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations_for<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.name == name)
            .map(|v| &v.violation)
    }
}

/// Both-or-neither and non-empty platform name.
pub fn check_entry_shape(entry: &MappedEncoding) -> Result<(&str, &CodecTable), Violation> {
    let platform_name = entry
        .platform_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or(Violation::MissingPlatformName)?;
    let table = entry.table.as_ref().ok_or(Violation::MissingTable)?;
    Ok((platform_name, table))
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Entry `b` must be `[b]`, decode back to its code point, and re-encode to itself.
pub fn check_single_byte_round_trip(table: &CodecTable, codec: &dyn Codec) -> Vec<Violation> {
    if table.len() != 256 {
        return vec![Violation::SingleByteLength(table.len())];
    }

    let mut violations = Vec::new();
    for (index, (code_point, bytes)) in table.iter().enumerate() {
        if violations.len() >= MAX_VIOLATIONS_PER_ENTRY {
            break;
        }
        let byte = index as u8;
        if bytes != [byte] {
            violations.push(Violation::ByteOrder {
                index,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let decoded = codec.decode(bytes);
        let Some(ch) = single_char(&decoded).filter(|&ch| u32::from(ch) == code_point) else {
            violations.push(Violation::DecodeMismatch {
                byte,
                code_point,
                decoded,
            });
            continue;
        };

        if codec.encode_strict(ch).into_bytes().as_deref() != Some(bytes) {
            violations.push(Violation::RoundTrip { byte });
        }
    }
    violations
}

/// Every byte sequence decodes to exactly its code point; code points ascend.
pub fn check_multi_byte_redecode(table: &CodecTable, codec: &dyn Codec) -> Vec<Violation> {
    let mut violations = Vec::new();

    if let Some(index) = table
        .code_points()
        .windows(2)
        .position(|pair| pair[0] >= pair[1])
    {
        violations.push(Violation::Unordered(index + 1));
    }

    for (code_point, bytes) in table.iter() {
        if violations.len() >= MAX_VIOLATIONS_PER_ENTRY {
            break;
        }
        let decoded = codec.decode(bytes);
        if single_char(&decoded).map(u32::from) != Some(code_point) {
            violations.push(Violation::Redecode {
                code_point,
                bytes: bytes.to_vec(),
                decoded,
            });
        }
    }
    violations
}

/// Check every entry of an artifact against the registry.
pub fn verify_entries<R: PlatformRegistry + ?Sized>(
    entries: &[MappedEncoding],
    registry: &R,
) -> VerificationReport {
    let single_byte: HashMap<String, bool> = registry
        .list_encodings()
        .into_iter()
        .map(|info| (info.name().to_string(), info.is_single_byte))
        .collect();
    let mut report = VerificationReport::default();

    for entry in entries {
        report.checked += 1;
        let found = match check_entry_shape(entry) {
            Ok((platform_name, table)) => match registry.codec(platform_name) {
                Some(codec) if single_byte.get(platform_name) == Some(&true) => {
                    check_single_byte_round_trip(table, codec.as_ref())
                }
                Some(codec) => check_multi_byte_redecode(table, codec.as_ref()),
                None => vec![Violation::UnknownEncoding(platform_name.to_string())],
            },
            Err(violation) => vec![violation],
        };

        if found.is_empty() {
            tracing::debug!(name = entry.name.as_str(), "verified");
        }
        for violation in found {
            tracing::warn!(name = entry.name.as_str(), "{}", violation);
            report.violations.push(EntryViolation {
                name: entry.name.clone(),
                violation,
            });
        }
    }
    report
}
