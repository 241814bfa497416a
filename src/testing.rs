// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation. It provides
//! a scripted registry so derivation edge cases (round-trip faults, empty
//! tables, ambiguous aliases) can be exercised without hunting for a real
//! codec that happens to misbehave the right way.

#![doc(hidden)]

use std::collections::HashMap;

use crate::alias::EncodingAlias;
use crate::catalog::MappedEncoding;
use crate::derive::BMP_MAX;
use crate::registry::{Codec, EncodeOutcome, PlatformEncodingInfo, PlatformRegistry};

/// Codec driven by explicit encode/decode maps.
#[derive(Debug, Clone, Default)]
pub struct FakeCodec {
    encode: HashMap<char, Vec<u8>>,
    decode: HashMap<Vec<u8>, String>,
}

impl FakeCodec {
    /// Latin-1: byte `b` is U+00`b` in both directions.
    pub fn single_byte_identity() -> Self {
        let mut codec = Self::default();
        for byte in 0..=u8::MAX {
            let ch = char::from(byte);
            codec.encode.insert(ch, vec![byte]);
            codec.decode.insert(vec![byte], ch.to_string());
        }
        codec
    }

    /// Multi-byte codec whose encoder is `f` over the BMP; the decoder is its inverse.
    pub fn multi_byte(f: impl Fn(u32) -> Option<Vec<u8>>) -> Self {
        let mut codec = Self::default();
        for ch in (0..=BMP_MAX).filter_map(char::from_u32) {
            if let Some(bytes) = f(u32::from(ch)) {
                codec.decode.insert(bytes.clone(), ch.to_string());
                codec.encode.insert(ch, bytes);
            }
        }
        codec
    }

    /// Override the encoder only.
    pub fn with_encoding(mut self, ch: char, bytes: Vec<u8>) -> Self {
        self.encode.insert(ch, bytes);
        self
    }

    /// Override the decoder only.
    pub fn with_decoding(mut self, bytes: Vec<u8>, text: &str) -> Self {
        self.decode.insert(bytes, text.to_string());
        self
    }

    /// Make a character unmappable.
    pub fn without(mut self, ch: char) -> Self {
        self.encode.remove(&ch);
        self
    }
}

impl Codec for FakeCodec {
    fn encode_strict(&self, ch: char) -> EncodeOutcome {
        match self.encode.get(&ch) {
            Some(bytes) => EncodeOutcome::Mapped(bytes.clone()),
            None => EncodeOutcome::Unmappable,
        }
    }

    fn encode_lossy(&self, text: &str) -> Vec<u8> {
        text.chars()
            .flat_map(|ch| self.encode.get(&ch).cloned().unwrap_or_else(|| vec![b'?']))
            .collect()
    }

    fn decode(&self, bytes: &[u8]) -> String {
        if let Some(text) = self.decode.get(bytes) {
            return text.clone();
        }
        bytes
            .iter()
            .map(|b| {
                self.decode
                    .get(std::slice::from_ref(b))
                    .cloned()
                    .unwrap_or_else(|| '\u{FFFD}'.to_string())
            })
            .collect()
    }
}

impl Codec for &FakeCodec {
    fn encode_strict(&self, ch: char) -> EncodeOutcome {
        (**self).encode_strict(ch)
    }

    fn encode_lossy(&self, text: &str) -> Vec<u8> {
        (**self).encode_lossy(text)
    }

    fn decode(&self, bytes: &[u8]) -> String {
        (**self).decode(bytes)
    }
}

/// Registry holding scripted codecs, listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FakeRegistry {
    entries: Vec<(PlatformEncodingInfo, FakeCodec)>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(
        mut self,
        name: &str,
        variants: &[&str],
        is_single_byte: bool,
        codec: FakeCodec,
    ) -> Self {
        let info = PlatformEncodingInfo {
            alias: EncodingAlias::new(name, variants),
            is_single_byte,
        };
        self.entries.push((info, codec));
        self
    }
}

impl PlatformRegistry for FakeRegistry {
    fn list_encodings(&self) -> Vec<PlatformEncodingInfo> {
        self.entries.iter().map(|(info, _)| info.clone()).collect()
    }

    fn codec(&self, name: &str) -> Option<Box<dyn Codec + '_>> {
        self.entries
            .iter()
            .find(|(info, _)| info.name() == name)
            .map(|(_, codec)| Box::new(codec) as Box<dyn Codec + '_>)
    }

    fn is_single_byte(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(info, _)| info.name() == name && info.is_single_byte)
    }
}

/// Create an unresolved catalog entry.
pub fn make_entry(name: &str, aliases: &[&str]) -> MappedEncoding {
    MappedEncoding::new(name, aliases.iter().copied())
}

/// ASCII plus a two-byte range over U+0100..=U+2FFF, with the euro sign left out.
pub fn legacy_dbcs() -> FakeCodec {
    FakeCodec::multi_byte(|cp| match cp {
        0x00..=0x7F => Some(vec![cp as u8]),
        0x20AC => None,
        0x100..=0x2FFF => Some(vec![0x80 | (cp >> 8) as u8, cp as u8]),
        _ => None,
    })
}
