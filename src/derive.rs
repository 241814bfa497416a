// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Codec table derivation.
//!
//! Given a matched pair, build the complete code point → byte sequence table
//! for the platform encoding. Exactly one policy applies per pair:
//!
//! | Policy          | Selected when                         | Iterates          |
//! |-----------------|---------------------------------------|-------------------|
//! | `SingleByte`    | platform reports single-byte          | bytes 0x00..=0xFF |
//! | `Utf8Excluded`  | web name contains "utf-8" (any case)  | nothing           |
//! | `MultiByte`     | otherwise                             | U+0000..=U+FFFF   |
//!
//! The single-byte policy decodes each byte and insists the result encodes
//! back to that same byte. A table that fails this check is never returned;
//! the encoding is reported as failed instead. The multi-byte policy treats
//! unmappable code points as routine and simply leaves them out.

use std::fmt;

use serde::Serialize;

use crate::catalog::CodecTable;
use crate::error::DeriveError;
use crate::registry::{Codec, EncodeOutcome, PlatformEncodingInfo, PlatformRegistry};

/// Last code point of the Basic Multilingual Plane.
pub const BMP_MAX: u32 = 0xFFFF;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TablePolicy {
    SingleByte,
    MultiByte,
    Utf8Excluded,
}

impl TablePolicy {
    /// Pick the policy for a web name / platform entry pair.
    ///
    /// Single-byte wins over the UTF-8 check; no UTF-8 flavour is single-byte.
    pub fn select(web_name: &str, platform: &PlatformEncodingInfo) -> Self {
        if platform.is_single_byte {
            TablePolicy::SingleByte
        } else if is_utf8_name(web_name) {
            TablePolicy::Utf8Excluded
        } else {
            TablePolicy::MultiByte
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TablePolicy::SingleByte => "single-byte",
            TablePolicy::MultiByte => "multi-byte",
            TablePolicy::Utf8Excluded => "utf8-excluded",
        }
    }
}

impl fmt::Display for TablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive substring test for "utf-8".
pub fn is_utf8_name(web_name: &str) -> bool {
    web_name.to_lowercase().contains("utf-8")
}

/// What derivation produced for one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derived {
    Table { policy: TablePolicy, table: CodecTable },
    /// Matched, but deliberately carries no table.
    Excluded,
}

/// Derives tables using codecs from a platform registry.
pub struct TableDeriver<'r, R: PlatformRegistry + ?Sized> {
    registry: &'r R,
}

impl<'r, R: PlatformRegistry + ?Sized> TableDeriver<'r, R> {
    pub fn new(registry: &'r R) -> Self {
        Self { registry }
    }

    pub fn derive(
        &self,
        web_name: &str,
        platform: &PlatformEncodingInfo,
    ) -> Result<Derived, DeriveError> {
        let policy = TablePolicy::select(web_name, platform);
        if policy == TablePolicy::Utf8Excluded {
            tracing::debug!(web = web_name, "UTF-8 needs no table; skipped");
            return Ok(Derived::Excluded);
        }

        let codec = self
            .registry
            .codec(platform.name())
            .ok_or_else(|| DeriveError::NoCodec(platform.name().to_string()))?;

        let table = match policy {
            TablePolicy::SingleByte => derive_single_byte(codec.as_ref())?,
            _ => derive_multi_byte(codec.as_ref())?,
        };

        tracing::debug!(
            web = web_name,
            platform = platform.name(),
            %policy,
            entries = table.len(),
            "derived table"
        );
        Ok(Derived::Table { policy, table })
    }
}

/// Single-byte policy: one entry per byte value, in byte order.
pub fn derive_single_byte(codec: &dyn Codec) -> Result<CodecTable, DeriveError> {
    let mut table = CodecTable::with_capacity(256);

    for byte in 0..=u8::MAX {
        let decoded = codec.decode(&[byte]);
        let mut chars = decoded.chars();
        let ch = match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => {
                return Err(DeriveError::DecodeWidth {
                    byte,
                    units: decoded.chars().count(),
                })
            }
        };

        let code_point = u32::from(ch);
        match codec.encode_strict(ch) {
            EncodeOutcome::Mapped(bytes) if bytes == [byte] => table.push(code_point, bytes),
            EncodeOutcome::Mapped(encoded) => {
                return Err(DeriveError::RoundTrip {
                    byte,
                    code_point,
                    encoded,
                })
            }
            EncodeOutcome::Unmappable => {
                return Err(DeriveError::NotReencodable { byte, code_point })
            }
        }
    }

    Ok(table)
}

/// Multi-byte policy: every encodable BMP code point, ascending.
///
/// Surrogates are not characters and are skipped like unmappable input.
/// So is any code point whose bytes decode to something else: some strict
/// encoders still substitute a lookalike (Shift_JIS sends U+00A5 to 0x5C).
/// An encoding that maps nothing at all is a fault, not an empty table.
pub fn derive_multi_byte(codec: &dyn Codec) -> Result<CodecTable, DeriveError> {
    let mut table = CodecTable::new();
    let mut skipped = 0usize;
    let mut substituted = 0usize;

    for ch in (0..=BMP_MAX).filter_map(char::from_u32) {
        match codec.encode_strict(ch) {
            EncodeOutcome::Mapped(bytes) if decodes_to(codec, &bytes, ch) => {
                table.push(u32::from(ch), bytes)
            }
            EncodeOutcome::Mapped(_) => substituted += 1,
            EncodeOutcome::Unmappable => skipped += 1,
        }
    }

    if table.is_empty() {
        return Err(DeriveError::EmptyTable);
    }
    tracing::trace!(
        mapped = table.len(),
        skipped,
        substituted,
        "multi-byte scan done"
    );
    Ok(table)
}

fn decodes_to(codec: &dyn Codec, bytes: &[u8], ch: char) -> bool {
    let decoded = codec.decode(bytes);
    let mut chars = decoded.chars();
    chars.next() == Some(ch) && chars.next().is_none()
}
