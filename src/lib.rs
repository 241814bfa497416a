//! Web encoding labels reconciled with a codec registry, baked into tables.
//!
//! Given the web-standard list of text encodings (name plus aliases), this
//! crate pairs each entry with a platform codec, derives its complete
//! code point → byte sequence table, and emits the surviving tables as a
//! single JavaScript artifact plus human-checkable HTML pages.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ catalog.rs  │────▶│  matcher.rs  │────▶│  derive.rs   │────▶│  emit/      │
//! │ (JSON in,   │     │ (alias-set   │     │ (single-byte,│     │ (artifact,  │
//! │  records)   │     │  first match)│     │  multi-byte, │     │  HTML pages)│
//! └─────────────┘     └──────────────┘     │  UTF-8 skip) │     └─────────────┘
//!        │                   ▲             └──────────────┘            │
//!        ▼                   │                    ▲                    ▼
//! ┌─────────────┐     ┌──────────────┐            │             ┌─────────────┐
//! │  alias.rs   │     │ registry.rs  │────────────┘             │  verify.rs  │
//! │ (case-folded│     │ (codecs via  │─────────────────────────▶│ (re-checks  │
//! │  variants)  │     │  encoding_rs)│                          │  artifacts) │
//! └─────────────┘     └──────────────┘                          └─────────────┘
//! ```
//!
//! `build/` drives the whole batch: match, derive in parallel, filter out
//! incomplete entries, write outputs.
//!
//! # Usage
//!
//! ```ignore
//! use encmap::build::{reconcile, platform_registry};
//! use encmap::catalog::load_catalog;
//!
//! let catalog = load_catalog(Path::new("mdn_text_decodings.json"))?;
//! let registry = platform_registry(true);
//! let result = reconcile(&catalog, &registry);
//!
//! let artifact = encmap::emit::render_artifact("TEXT_ENCODINGS_RAW", &result.mapped)?;
//! ```

pub mod alias;
pub mod build;
pub mod catalog;
pub mod derive;
pub mod emit;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod registry;
pub mod verify;

// Scripted registries for tests (always compiled, hidden from docs)
pub mod testing;

// Re-exports for public API
pub use alias::EncodingAlias;
pub use build::{reconcile, run_build, BuildOptions, BuildReport, Reconciliation};
pub use catalog::{load_catalog, parse_catalog, CodecTable, MappedEncoding};
pub use derive::{Derived, TableDeriver, TablePolicy};
pub use emit::{parse_artifact, render_artifact, Artifact};
pub use error::{DeriveError, EncmapError, Result};
pub use matcher::{match_catalogs, MatchPair, Matcher};
pub use registry::{
    Codec, EncodeOutcome, EncodingRsRegistry, PlatformEncodingInfo, PlatformRegistry,
};
pub use verify::{verify_entries, VerificationReport, Violation};
