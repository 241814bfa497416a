//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::path::PathBuf;

use encmap::build::{reconcile, BuildOptions, Reconciliation};
use encmap::catalog::{load_catalog, MappedEncoding};
use encmap::registry::EncodingRsRegistry;

// Re-export canonical test utilities from encmap::testing
pub use encmap::testing::{legacy_dbcs, make_entry, FakeCodec, FakeRegistry};

/// Directory containing the build fixtures.
pub const BUILD_FIXTURES_DIR: &str = "data/build-fixtures";

/// A catalog shaped like the MDN list: eight real encodings plus one made up.
pub const MDN_CATALOG: &str = "data/build-fixtures/valid/mdn_text_decodings.json";

pub fn fixture(path: &str) -> PathBuf {
    PathBuf::from(BUILD_FIXTURES_DIR).join(path)
}

pub fn full_registry() -> EncodingRsRegistry {
    EncodingRsRegistry::new().with_code_pages()
}

/// Reconcile the MDN fixture against the full registry.
pub fn reconcile_mdn() -> Reconciliation {
    let catalog = load_catalog(&PathBuf::from(MDN_CATALOG)).expect("Failed to load MDN fixture");
    reconcile(&catalog, &full_registry())
}

pub fn entry_named<'a>(entries: &'a [MappedEncoding], name: &str) -> Option<&'a MappedEncoding> {
    entries.iter().find(|e| e.name == name)
}

/// Build options writing into `output`, verification pages on.
pub fn mdn_options(output: PathBuf) -> BuildOptions {
    BuildOptions::new(MDN_CATALOG, output)
}

/// Assert the both-or-neither invariant and a non-empty platform name.
pub fn assert_complete(entry: &MappedEncoding) {
    let platform = entry.platform_name.as_deref().unwrap_or_default();
    assert!(!platform.is_empty(), "{} has no platform name", entry.name);
    let table = entry
        .table
        .as_ref()
        .unwrap_or_else(|| panic!("{} has no table", entry.name));
    assert_eq!(table.code_points().len(), table.byte_sequences().len());
}
