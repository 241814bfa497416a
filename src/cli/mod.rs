// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the encmap command-line interface.
//!
//! Three subcommands: `build` to reconcile a catalog and emit the artifact,
//! `check` to re-verify an emitted artifact against the codecs, and
//! `registry` to list what the platform side knows about.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use encmap::build::{BuildOptions, DEFAULT_ARTIFACT, DEFAULT_VARIABLE};

#[derive(Parser)]
#[command(
    name = "encmap",
    about = "Reconciles web encoding labels with a codec registry and bakes codepoint-to-byte tables",
    version
)]
pub struct Cli {
    /// Log progress at info level (ENCMAP_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a web-standard catalog against the registry and emit tables
    Build(BuildArgs),

    /// Re-verify an emitted artifact against the registry's codecs
    Check {
        /// Path to the artifact (`let NAME = [...];`)
        artifact: PathBuf,

        /// Only the Unicode encodings and windows-1252; no legacy code pages
        #[arg(long)]
        basic_only: bool,
    },

    /// List the platform encodings
    Registry {
        /// Only the Unicode encodings and windows-1252; no legacy code pages
        #[arg(long)]
        basic_only: bool,
    },
}

#[derive(Args)]
pub struct BuildArgs {
    /// Web-standard catalog: JSON array of {name, aliases}
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for the artifact, report and verification pages
    #[arg(short, long)]
    pub output: PathBuf,

    /// JavaScript variable the artifact binds
    #[arg(long, default_value = DEFAULT_VARIABLE)]
    pub variable: String,

    /// Artifact file name inside the output directory
    #[arg(long, default_value = DEFAULT_ARTIFACT)]
    pub artifact: String,

    /// Skip the HTML verification pages
    #[arg(long)]
    pub no_verification: bool,

    /// Only the Unicode encodings and windows-1252; no legacy code pages
    #[arg(long)]
    pub basic_only: bool,
}

impl From<BuildArgs> for BuildOptions {
    fn from(args: BuildArgs) -> Self {
        BuildOptions {
            variable: args.variable,
            artifact_name: args.artifact,
            verification: !args.no_verification,
            code_pages: !args.basic_only,
            ..BuildOptions::new(args.input, args.output)
        }
    }
}
