// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-encoding derivation across the catalog.
//!
//! No encoding's derivation reads another's state, so the batch is
//! embarrassingly parallel: `par_iter()` over matched pairs, collected back in
//! catalog order. A fault stays inside its own [`EntryOutcome`]; the batch
//! never stops early.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;

use crate::catalog::MappedEncoding;
use crate::derive::{Derived, TableDeriver, TablePolicy};
use crate::error::DeriveError;
use crate::registry::{PlatformEncodingInfo, PlatformRegistry};

/// A catalog entry and the platform entry it matched, if any.
pub type Job<'a> = (&'a MappedEncoding, Option<&'a PlatformEncodingInfo>);

/// What happened to one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Mapped {
        record: MappedEncoding,
        policy: TablePolicy,
    },
    Unmatched {
        name: String,
    },
    Excluded {
        name: String,
        platform_name: String,
    },
    Failed {
        name: String,
        platform_name: String,
        error: DeriveError,
    },
}

/// Derive one entry. The source record is never modified.
pub fn derive_entry<R: PlatformRegistry + ?Sized>(
    deriver: &TableDeriver<'_, R>,
    (entry, platform): Job<'_>,
) -> EntryOutcome {
    let Some(platform) = platform else {
        return EntryOutcome::Unmatched {
            name: entry.name.clone(),
        };
    };

    match deriver.derive(&entry.name, platform) {
        Ok(Derived::Table { policy, table }) => EntryOutcome::Mapped {
            record: MappedEncoding::resolved(entry, platform.name(), table),
            policy,
        },
        Ok(Derived::Excluded) => EntryOutcome::Excluded {
            name: entry.name.clone(),
            platform_name: platform.name().to_string(),
        },
        Err(error) => EntryOutcome::Failed {
            name: entry.name.clone(),
            platform_name: platform.name().to_string(),
            error,
        },
    }
}

/// Derive every job, preserving job order.
#[cfg(feature = "parallel")]
pub fn derive_all<R: PlatformRegistry + ?Sized>(
    registry: &R,
    jobs: &[Job<'_>],
) -> Vec<EntryOutcome> {
    let deriver = TableDeriver::new(registry);
    jobs.par_iter().map(|&job| derive_entry(&deriver, job)).collect()
}

/// Derive every job, preserving job order.
#[cfg(not(feature = "parallel"))]
pub fn derive_all<R: PlatformRegistry + ?Sized>(
    registry: &R,
    jobs: &[Job<'_>],
) -> Vec<EntryOutcome> {
    let deriver = TableDeriver::new(registry);
    jobs.iter().map(|&job| derive_entry(&deriver, job)).collect()
}

/// Derive every job in parallel with progress reporting.
#[cfg(feature = "parallel")]
pub fn derive_all_with_progress<R: PlatformRegistry + ?Sized>(
    registry: &R,
    jobs: &[Job<'_>],
    progress: &ProgressBar,
) -> Vec<EntryOutcome> {
    let deriver = TableDeriver::new(registry);
    jobs.par_iter()
        .map(|&job| {
            let outcome = derive_entry(&deriver, job);
            progress.set_message(job.0.name.clone());
            progress.inc(1);
            outcome
        })
        .collect()
}

/// Non-parallel fallback (no progress).
#[cfg(not(feature = "parallel"))]
pub fn derive_all_with_progress<R: PlatformRegistry + ?Sized>(
    registry: &R,
    jobs: &[Job<'_>],
) -> Vec<EntryOutcome> {
    derive_all(registry, jobs)
}
