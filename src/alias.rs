// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Case-folded alias sets.
//!
//! Both naming authorities describe an encoding as one canonical name plus a
//! loose bag of alternates ("cp1252", "Western European (Windows)", "latin1",
//! ...). Two entries denote the same encoding when their bags share at least
//! one string, ignoring case. Everything is folded once at construction so the
//! intersection test is a plain set lookup.

use std::collections::BTreeSet;

/// Immutable per-encoding bag of case-folded name variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingAlias {
    canonical_name: String,
    variants: BTreeSet<String>,
}

impl EncodingAlias {
    /// Build an alias set from a canonical name and any number of alternates.
    ///
    /// The canonical name is itself a variant. Empty and whitespace-only
    /// strings are dropped; surrounding whitespace is trimmed before folding.
    pub fn new<I, S>(canonical_name: impl Into<String>, alternates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let canonical_name = canonical_name.into();
        let variants = std::iter::once(canonical_name.as_str().to_owned())
            .chain(alternates.into_iter().map(|s| s.as_ref().to_owned()))
            .filter_map(|s| fold(&s))
            .collect();

        Self {
            canonical_name,
            variants,
        }
    }

    /// The identifier this alias set belongs to, with its original casing.
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// Folded variants in lexicographic order.
    pub fn variants(&self) -> impl Iterator<Item = &str> + '_ {
        self.variants.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Case-insensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        fold(name).is_some_and(|folded| self.variants.contains(&folded))
    }

    /// Non-empty intersection test. Probes the smaller set against the larger.
    pub fn intersects(&self, other: &EncodingAlias) -> bool {
        let (small, large) = if self.variants.len() <= other.variants.len() {
            (&self.variants, &other.variants)
        } else {
            (&other.variants, &self.variants)
        };
        small.iter().any(|v| large.contains(v))
    }
}

fn fold(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}
