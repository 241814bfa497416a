// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Platform encoding registry.
//!
//! The table deriver never touches a codec library directly. It sees a
//! [`PlatformRegistry`] that lists encodings and hands out [`Codec`]s, which
//! keeps the derivation testable against scripted codecs (see
//! [`crate::testing`]) and lets the production registry live in one place.
//!
//! [`EncodingRsRegistry`] is the production registry, backed by `encoding_rs`.
//! It starts with the Unicode encodings and windows-1252 only; the legacy code
//! pages are enabled by an explicit [`EncodingRsRegistry::with_code_pages`]
//! call made once, before the catalog is listed.

use encoding_rs::{EncoderResult, Encoding};

use crate::alias::EncodingAlias;

/// Outcome of encoding one character with a strict encoder.
///
/// Unmappable input is a routine result, not an error: most of the BMP is
/// unmappable in any legacy code page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeOutcome {
    Mapped(Vec<u8>),
    Unmappable,
}

impl EncodeOutcome {
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            EncodeOutcome::Mapped(bytes) => Some(bytes),
            EncodeOutcome::Unmappable => None,
        }
    }
}

/// Encoder/decoder pair for one platform encoding.
pub trait Codec {
    /// Encode one character, reporting unmappable input instead of substituting.
    fn encode_strict(&self, ch: char) -> EncodeOutcome;

    /// Encode text, substituting whatever the codec substitutes. Used for the
    /// verification page framing only.
    fn encode_lossy(&self, text: &str) -> Vec<u8>;

    /// Decode bytes, replacing malformed input with U+FFFD.
    fn decode(&self, bytes: &[u8]) -> String;
}

/// One platform registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEncodingInfo {
    pub alias: EncodingAlias,
    pub is_single_byte: bool,
}

impl PlatformEncodingInfo {
    pub fn name(&self) -> &str {
        self.alias.canonical_name()
    }
}

/// Source of platform encodings and their codecs.
pub trait PlatformRegistry: Sync {
    fn list_encodings(&self) -> Vec<PlatformEncodingInfo>;

    /// Codec for a canonical name as returned by [`list_encodings`](Self::list_encodings).
    fn codec(&self, name: &str) -> Option<Box<dyn Codec + '_>>;

    /// Builds the whole listing; callers checking many names should list once.
    fn is_single_byte(&self, name: &str) -> bool {
        self.list_encodings()
            .iter()
            .any(|info| info.name() == name && info.is_single_byte)
    }
}

// ============================================================================
// ENCODING_RS REGISTRY
// ============================================================================

type Entry = (&'static Encoding, &'static str);

/// Unicode encodings plus windows-1252: available without code pages.
fn basic() -> Vec<Entry> {
    use encoding_rs::*;
    vec![
        (UTF_8, "Unicode (UTF-8)"),
        (UTF_16LE, "Unicode"),
        (UTF_16BE, "Unicode (Big-Endian)"),
        (WINDOWS_1252, "Western European (Windows)"),
    ]
}

/// Legacy code pages, enabled by [`EncodingRsRegistry::with_code_pages`].
fn code_pages() -> Vec<Entry> {
    use encoding_rs::*;
    vec![
        (IBM866, "Cyrillic (DOS)"),
        (ISO_8859_2, "Central European (ISO)"),
        (ISO_8859_3, "Latin 3 (ISO)"),
        (ISO_8859_4, "Baltic (ISO)"),
        (ISO_8859_5, "Cyrillic (ISO)"),
        (ISO_8859_6, "Arabic (ISO)"),
        (ISO_8859_7, "Greek (ISO)"),
        (ISO_8859_8, "Hebrew (ISO-Visual)"),
        (ISO_8859_8_I, "Hebrew (ISO-Logical)"),
        (ISO_8859_10, "Nordic (ISO)"),
        (ISO_8859_13, "Estonian (ISO)"),
        (ISO_8859_14, "Celtic (ISO)"),
        (ISO_8859_15, "Latin 9 (ISO)"),
        (ISO_8859_16, "Romanian (ISO)"),
        (KOI8_R, "Cyrillic (KOI8-R)"),
        (KOI8_U, "Cyrillic (KOI8-U)"),
        (MACINTOSH, "Western European (Mac)"),
        (WINDOWS_874, "Thai (Windows)"),
        (WINDOWS_1250, "Central European (Windows)"),
        (WINDOWS_1251, "Cyrillic (Windows)"),
        (WINDOWS_1253, "Greek (Windows)"),
        (WINDOWS_1254, "Turkish (Windows)"),
        (WINDOWS_1255, "Hebrew (Windows)"),
        (WINDOWS_1256, "Arabic (Windows)"),
        (WINDOWS_1257, "Baltic (Windows)"),
        (WINDOWS_1258, "Vietnamese (Windows)"),
        (X_MAC_CYRILLIC, "Cyrillic (Mac)"),
        (GBK, "Chinese Simplified (GBK)"),
        (GB18030, "Chinese Simplified (GB18030)"),
        (BIG5, "Chinese Traditional (Big5)"),
        (EUC_JP, "Japanese (EUC)"),
        (ISO_2022_JP, "Japanese (JIS)"),
        (SHIFT_JIS, "Japanese (Shift-JIS)"),
        (EUC_KR, "Korean (EUC)"),
        (REPLACEMENT, "Replacement"),
        (X_USER_DEFINED, "User Defined"),
    ]
}

/// Registry backed by `encoding_rs`.
#[derive(Debug, Clone)]
pub struct EncodingRsRegistry {
    entries: Vec<Entry>,
    code_pages: bool,
}

impl EncodingRsRegistry {
    /// Registry with the basic set only.
    pub fn new() -> Self {
        Self {
            entries: basic(),
            code_pages: false,
        }
    }

    /// Enable the legacy code pages. Idempotent.
    pub fn with_code_pages(mut self) -> Self {
        if !self.code_pages {
            self.entries.extend(code_pages());
            self.code_pages = true;
        }
        self
    }

    pub fn has_code_pages(&self) -> bool {
        self.code_pages
    }

    fn lookup(&self, name: &str) -> Option<&'static Encoding> {
        self.entries
            .iter()
            .find(|(encoding, _)| encoding.name() == name)
            .map(|(encoding, _)| *encoding)
    }
}

impl Default for EncodingRsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformRegistry for EncodingRsRegistry {
    fn list_encodings(&self) -> Vec<PlatformEncodingInfo> {
        self.entries
            .iter()
            .map(|&(encoding, display)| PlatformEncodingInfo {
                alias: EncodingAlias::new(encoding.name(), [display]),
                is_single_byte: encoding.is_single_byte(),
            })
            .collect()
    }

    fn codec(&self, name: &str) -> Option<Box<dyn Codec + '_>> {
        self.lookup(name)
            .map(|encoding| Box::new(EncodingRsCodec::new(encoding)) as Box<dyn Codec>)
    }

    fn is_single_byte(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(Encoding::is_single_byte)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Utf16 {
    Le,
    Be,
}

/// Codec over one `encoding_rs` encoding.
///
/// `encoding_rs` only encodes into ASCII-compatible encodings. UTF-16 is
/// serialized here from code units; anything else whose output encoding is
/// not itself (the `replacement` pseudo-encoding) cannot encode at all.
#[derive(Debug, Clone, Copy)]
pub struct EncodingRsCodec {
    encoding: &'static Encoding,
    utf16: Option<Utf16>,
}

impl EncodingRsCodec {
    pub fn new(encoding: &'static Encoding) -> Self {
        let utf16 = if encoding == encoding_rs::UTF_16LE {
            Some(Utf16::Le)
        } else if encoding == encoding_rs::UTF_16BE {
            Some(Utf16::Be)
        } else {
            None
        };
        Self { encoding, utf16 }
    }

    fn encode_utf16(order: Utf16, text: &str) -> Vec<u8> {
        text.encode_utf16()
            .flat_map(|unit| match order {
                Utf16::Le => unit.to_le_bytes(),
                Utf16::Be => unit.to_be_bytes(),
            })
            .collect()
    }
}

impl Codec for EncodingRsCodec {
    fn encode_strict(&self, ch: char) -> EncodeOutcome {
        let mut utf8 = [0u8; 4];
        let src: &str = ch.encode_utf8(&mut utf8);

        if let Some(order) = self.utf16 {
            return EncodeOutcome::Mapped(Self::encode_utf16(order, src));
        }
        if self.encoding.output_encoding() != self.encoding {
            return EncodeOutcome::Unmappable;
        }

        let mut encoder = self.encoding.new_encoder();
        let capacity = encoder
            .max_buffer_length_from_utf8_without_replacement(src.len())
            .unwrap_or(16);
        let mut dst = vec![0u8; capacity];
        // `last` flushes stateful encoders (ISO-2022-JP) back to ASCII.
        let (result, _read, written) =
            encoder.encode_from_utf8_without_replacement(src, &mut dst, true);

        match result {
            EncoderResult::InputEmpty => {
                dst.truncate(written);
                EncodeOutcome::Mapped(dst)
            }
            EncoderResult::Unmappable(_) => EncodeOutcome::Unmappable,
            EncoderResult::OutputFull => {
                tracing::error!(
                    encoding = self.encoding.name(),
                    code_point = ch as u32,
                    "encoder reported a full buffer of worst-case size"
                );
                EncodeOutcome::Unmappable
            }
        }
    }

    fn encode_lossy(&self, text: &str) -> Vec<u8> {
        match self.utf16 {
            Some(order) => Self::encode_utf16(order, text),
            None => self.encoding.encode(text).0.into_owned(),
        }
    }

    fn decode(&self, bytes: &[u8]) -> String {
        self.encoding
            .decode_without_bom_handling(bytes)
            .0
            .into_owned()
    }
}
