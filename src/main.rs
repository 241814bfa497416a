// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;

use encmap::build::{platform_registry, run_build, BuildOptions};
use encmap::emit::load_artifact;
use encmap::logging::init_logging;
use encmap::registry::PlatformRegistry;
use encmap::verify::verify_entries;

mod cli;
use cli::{display, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build(args) => build(&BuildOptions::from(args)),
        Commands::Check {
            artifact,
            basic_only,
        } => check(&artifact, !basic_only),
        Commands::Registry { basic_only } => {
            let registry = platform_registry(!basic_only);
            display::print_registry(&registry.list_encodings());
            Ok(())
        }
    }
}

fn build(options: &BuildOptions) -> Result<()> {
    let output = run_build(options)
        .with_context(|| format!("build from {} failed", options.input.display()))?;
    display::print_build_summary(&output);
    Ok(())
}

fn check(artifact: &Path, code_pages: bool) -> Result<()> {
    let parsed = load_artifact(artifact)?;
    let registry = platform_registry(code_pages);
    let report = verify_entries(&parsed.entries, &registry);
    display::print_verification(&report);

    if !report.is_clean() {
        bail!(
            "{} violation(s) in {} ({} entries checked)",
            report.violations.len(),
            artifact.display(),
            report.checked
        );
    }
    println!("✅ {} entries verified", report.checked);
    Ok(())
}
