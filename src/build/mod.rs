// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The batch pipeline: match, derive, filter, emit.
//!
//! [`reconcile`] is the pure core (no I/O). [`run_build`] wraps it with
//! catalog loading and writes the artifact, the report and the
//! verification bundle.

pub mod parallel;
pub mod report;

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

use crate::alias::EncodingAlias;
use crate::catalog::{load_catalog, MappedEncoding};
use crate::emit::{validate_variable, write_artifact, write_verification_bundle};
use crate::error::{EncmapError, Result};
use crate::matcher::Matcher;
use crate::registry::{EncodingRsRegistry, PlatformRegistry};

pub use parallel::{derive_all, derive_entry, EntryOutcome, Job};
pub use report::{write_report, BuildReport, MatchedEntry, SkippedEntry};

pub const DEFAULT_VARIABLE: &str = "TEXT_ENCODINGS_RAW";
pub const DEFAULT_ARTIFACT: &str = "encoders_data.js";
pub const VERIFICATION_DIR: &str = "verify_encodings";
pub const REPORT_FILE: &str = "report.json";

const UTF8_REASON: &str = "UTF-8 needs no table";

/// Build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Web-standard catalog (JSON)
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// JavaScript variable the artifact binds
    pub variable: String,
    /// Artifact file name inside `output_dir`
    pub artifact_name: String,
    /// Emit the verification bundle
    pub verification: bool,
    /// Enable the legacy code pages
    pub code_pages: bool,
}

impl BuildOptions {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            variable: DEFAULT_VARIABLE.to_string(),
            artifact_name: DEFAULT_ARTIFACT.to_string(),
            verification: true,
            code_pages: true,
        }
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifact_name)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE)
    }

    pub fn verification_dir(&self) -> PathBuf {
        self.output_dir.join(VERIFICATION_DIR)
    }
}

/// Final table list plus the account of every catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Complete records, in catalog order
    pub mapped: Vec<MappedEncoding>,
    pub report: BuildReport,
}

/// Paths written by [`run_build`].
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub reconciliation: Reconciliation,
    pub artifact: PathBuf,
    pub report_file: PathBuf,
    pub verification_dir: Option<PathBuf>,
}

/// The production registry, with or without code pages.
pub fn platform_registry(code_pages: bool) -> EncodingRsRegistry {
    let registry = EncodingRsRegistry::new();
    if code_pages {
        registry.with_code_pages()
    } else {
        registry
    }
}

/// Match every catalog entry, derive its table, and keep complete records.
pub fn reconcile<R: PlatformRegistry + ?Sized>(
    catalog: &[MappedEncoding],
    registry: &R,
) -> Reconciliation {
    reconcile_with(catalog, registry, |jobs| derive_all(registry, jobs))
}

fn reconcile_with<R, F>(catalog: &[MappedEncoding], registry: &R, derive: F) -> Reconciliation
where
    R: PlatformRegistry + ?Sized,
    F: FnOnce(&[Job<'_>]) -> Vec<EntryOutcome>,
{
    let platform = registry.list_encodings();
    let matcher = Matcher::new(platform.iter().map(|info| info.alias.clone()));

    let web: Vec<EncodingAlias> = catalog.iter().map(MappedEncoding::alias_set).collect();
    let pairs = matcher.match_all(&web);

    let jobs: Vec<Job<'_>> = catalog
        .iter()
        .zip(&pairs)
        .map(|(entry, pair)| {
            let info = pair
                .platform_name
                .as_deref()
                .and_then(|name| platform.iter().find(|info| info.name() == name));
            (entry, info)
        })
        .collect();

    collect_outcomes(derive(&jobs))
}

/// Fold outcomes into the final list and the report, preserving order.
fn collect_outcomes(outcomes: Vec<EntryOutcome>) -> Reconciliation {
    let mut report = BuildReport::default();
    let mut records = Vec::with_capacity(outcomes.len());

    for outcome in outcomes {
        match outcome {
            EntryOutcome::Mapped { record, policy } => {
                let platform_name = record.platform_name.clone().unwrap_or_default();
                let entries = record.table.as_ref().map_or(0, |t| t.len());
                tracing::info!(
                    web = record.name.as_str(),
                    platform = platform_name.as_str(),
                    %policy,
                    entries,
                    "mapped"
                );
                report.matched.push(MatchedEntry {
                    name: record.name.clone(),
                    platform_name,
                    policy,
                    entries,
                });
                records.push(record);
            }
            EntryOutcome::Unmatched { name } => report.unmatched.push(name),
            EntryOutcome::Excluded {
                name,
                platform_name,
            } => {
                tracing::info!(
                    web = name.as_str(),
                    platform = platform_name.as_str(),
                    "excluded: {}",
                    UTF8_REASON
                );
                report.excluded.push(SkippedEntry {
                    name,
                    platform_name,
                    reason: UTF8_REASON.to_string(),
                });
            }
            EntryOutcome::Failed {
                name,
                platform_name,
                error,
            } => {
                tracing::error!(
                    web = name.as_str(),
                    platform = platform_name.as_str(),
                    "derivation failed: {}",
                    error
                );
                report.failed.push(SkippedEntry {
                    name,
                    platform_name,
                    reason: error.to_string(),
                });
            }
        }
    }

    Reconciliation {
        mapped: retain_complete(records),
        report,
    }
}

/// Drop every record lacking a platform name or a table.
pub fn retain_complete(records: Vec<MappedEncoding>) -> Vec<MappedEncoding> {
    records.into_iter().filter(MappedEncoding::is_complete).collect()
}

/// Create a progress style for the derivation bar
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

#[cfg(feature = "parallel")]
fn reconcile_with_progress<R: PlatformRegistry + ?Sized>(
    catalog: &[MappedEncoding],
    registry: &R,
) -> Reconciliation {
    let pb = ProgressBar::new(catalog.len() as u64);
    pb.set_style(create_progress_style());
    pb.set_prefix("Deriving");
    pb.set_message("tables...");

    let reconciliation = reconcile_with(catalog, registry, |jobs| {
        parallel::derive_all_with_progress(registry, jobs, &pb)
    });
    pb.finish_with_message(format!("{} tables", reconciliation.mapped.len()));
    reconciliation
}

#[cfg(not(feature = "parallel"))]
fn reconcile_with_progress<R: PlatformRegistry + ?Sized>(
    catalog: &[MappedEncoding],
    registry: &R,
) -> Reconciliation {
    reconcile_with(catalog, registry, |jobs| {
        parallel::derive_all_with_progress(registry, jobs)
    })
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| EncmapError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Run the whole batch.
///
/// Only loading the catalog and writing outputs can fail; per-encoding
/// faults end up in the report.
pub fn run_build(options: &BuildOptions) -> Result<BuildOutput> {
    validate_variable(&options.variable)?;

    // 1. Load the web-standard catalog
    let catalog = load_catalog(&options.input)?;
    tracing::info!(entries = catalog.len(), input = %options.input.display(), "catalog loaded");

    // 2. Platform registry, bootstrapped once
    let registry = platform_registry(options.code_pages);

    // 3. Match, derive, filter
    let reconciliation = reconcile_with_progress(&catalog, &registry);

    // 4. Write outputs
    create_dir(&options.output_dir)?;

    let artifact = options.artifact_path();
    write_artifact(&artifact, &options.variable, &reconciliation.mapped)?;
    eprintln!("  ✓ {}", artifact.display());

    let report_file = options.report_path();
    write_report(&reconciliation.report, &report_file)?;
    eprintln!("  ✓ {}", report_file.display());

    let verification_dir = if options.verification {
        let dir = options.verification_dir();
        let pages = write_verification_bundle(&dir, &reconciliation.mapped, &registry)?;
        eprintln!("  ✓ {} ({} pages)", dir.display(), pages);
        Some(dir)
    } else {
        None
    };

    Ok(BuildOutput {
        reconciliation,
        artifact,
        report_file,
        verification_dir,
    })
}
