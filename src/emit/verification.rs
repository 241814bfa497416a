// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Human-checkable verification pages.
//!
//! `index.html` is UTF-8 and shows, per encoding, the expected characters
//! rendered from `codePoints`, followed by an iframe of `<web-name>.html`.
//! That page declares the encoding's web name as its charset and carries the
//! raw `bytesForCodePoints` as its body, so a browser decoding it correctly
//! shows the same characters as the line above it.
//!
//! `<` is left out of both renderings, at the same positions, so the body
//! never opens a stray tag.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::MappedEncoding;
use crate::error::{EncmapError, Result};
use crate::registry::{Codec, PlatformRegistry};

pub const INDEX_FILE: &str = "index.html";

const SKIPPED: u32 = '<' as u32;

const INDEX_HEADER: &str = "<!doctype html>\r\n<html><head><meta http-equiv=\"Content-Type\" content=\"text/html;charset=utf-8\">\r\n<style> iframe { border: none; margin: 0; padding: 0; width: 100%; } </style></head><body>\r\n";

const INDEX_INTRO: &str = "<h1>Overview</h1>\r\n\
<p>Each section shows the expected characters, rendered from UTF-8, and below it an iframe \
holding the same table as raw bytes in the encoding under test. The two lines should match.</p>\r\n\
<p>Known differences: &lt; is never shown; a code point drawn as a box on one line may be a \
replacement diamond on the other; UTF-16 pages do not render as text.</p>\r\n";

const PAGE_FOOTER: &str = "</body></html>";

/// File name of an encoding's page inside the bundle.
pub fn page_file_name(entry: &MappedEncoding) -> String {
    let stem: String = entry
        .name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("{}.html", stem)
}

/// Expected rendering: every table code point in order, `<` left out.
///
/// Code points that are not scalar values show as U+FFFD.
pub fn expected_text(entry: &MappedEncoding) -> String {
    let Some(table) = &entry.table else {
        return String::new();
    };
    table
        .code_points()
        .iter()
        .filter(|&&cp| cp != SKIPPED)
        .map(|&cp| char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

fn page_header(entry: &MappedEncoding) -> String {
    format!(
        "<!doctype html>\r\n<html><head><meta http-equiv=\"Content-Type\" content=\"text/html;charset={}\">\r\n<style> body {{ margin: 0; padding: 0; }} </style></head>\r\n<body>",
        entry.name
    )
}

/// Raw bytes of an encoding's page.
///
/// Header and footer go through the encoding's own encoder; the body is the
/// table's byte sequences verbatim, skipping the entries for `<`.
pub fn encoded_page(entry: &MappedEncoding, codec: &dyn Codec) -> Vec<u8> {
    let mut bytes = codec.encode_lossy(&page_header(entry));
    if let Some(table) = &entry.table {
        for (cp, sequence) in table.iter() {
            if cp != SKIPPED {
                bytes.extend_from_slice(sequence);
            }
        }
    }
    bytes.extend(codec.encode_lossy(PAGE_FOOTER));
    bytes
}

/// The UTF-8 overview page.
pub fn render_index(entries: &[MappedEncoding]) -> String {
    let mut html = String::from(INDEX_HEADER);
    html.push_str(INDEX_INTRO);
    for entry in entries {
        html.push_str("<hr />\r\n");
        html.push_str(&format!(
            "<h2>Web name {} / platform name {}</h2>\r\n",
            entry.name,
            entry.platform_name.as_deref().unwrap_or("")
        ));
        html.push_str(&expected_text(entry));
        html.push_str("\r\n");
        html.push_str(&format!(
            "<iframe src=\"{}\"></iframe>\r\n\r\n",
            page_file_name(entry)
        ));
    }
    html.push_str(PAGE_FOOTER);
    html.push_str("\r\n");
    html
}

fn write_file(path: PathBuf, contents: &[u8]) -> Result<()> {
    fs::write(&path, contents).map_err(|source| EncmapError::Write { path, source })
}

/// Write `index.html` plus one page per entry into `dir`.
///
/// Returns the number of encoding pages written.
pub fn write_verification_bundle<R: PlatformRegistry + ?Sized>(
    dir: &Path,
    entries: &[MappedEncoding],
    registry: &R,
) -> Result<usize> {
    fs::create_dir_all(dir).map_err(|source| EncmapError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let platform_name = entry.platform_name.as_deref().unwrap_or_default();
        let codec = registry
            .codec(platform_name)
            .ok_or_else(|| EncmapError::UnknownEncoding(platform_name.to_string()))?;
        write_file(
            dir.join(page_file_name(entry)),
            &encoded_page(entry, codec.as_ref()),
        )?;
    }

    write_file(dir.join(INDEX_FILE), render_index(entries).as_bytes())?;
    tracing::debug!(pages = entries.len(), dir = %dir.display(), "verification bundle written");
    Ok(entries.len())
}
