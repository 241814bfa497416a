// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display for the encmap CLI.
//!
//! Boxed summaries in OneDark or One Light depending on the terminal. Theme
//! comes from `ENCMAP_THEME` ("dark"/"light"), then `COLORFGBG`, then defaults
//! to dark. `NO_COLOR` and non-TTY stdout turn colors off entirely.

use std::sync::OnceLock;

use encmap::build::{BuildOutput, BuildReport};
use encmap::derive::TablePolicy;
use encmap::registry::PlatformEncodingInfo;
use encmap::verify::VerificationReport;

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn parse_theme(explicit: Option<&str>, colorfgbg: Option<&str>) -> Theme {
    if let Some(theme) = explicit {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": background 7 and up (except 8) is light
    if let Some(bg) = colorfgbg
        .and_then(|v| v.split(';').next_back())
        .and_then(|bg| bg.parse::<u8>().ok())
    {
        if bg >= 7 && bg != 8 {
            return Theme::Light;
        }
    }

    Theme::Dark
}

fn detect_theme() -> Theme {
    parse_theme(
        std::env::var("ENCMAP_THEME").ok().as_deref(),
        std::env::var("COLORFGBG").ok().as_deref(),
    )
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, skipping ANSI escapes
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

fn border(s: &str) -> String {
    themed(GRAY, &[], s)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    println!(
        "{}{}{}",
        border("│"),
        pad_right(content, BOX_WIDTH),
        border("│")
    );
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("├"),
        label_part,
        border(&format!("{}┤", "─".repeat(remaining)))
    );
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded policy badge
pub fn policy_badge(policy: TablePolicy) -> String {
    let label = match policy {
        TablePolicy::SingleByte => "SBCS",
        TablePolicy::MultiByte => "MBCS",
        TablePolicy::Utf8Excluded => "UTF8",
    };
    let badge = format!("[{}]", label);
    match policy {
        TablePolicy::SingleByte => themed(GREEN, &[], &badge),
        TablePolicy::MultiByte => themed(BLUE, &[], &badge),
        TablePolicy::Utf8Excluded => themed(GRAY, &[], &badge),
    }
}

fn count_line(label: &str, count: usize, color_fn: fn() -> String) -> String {
    let value = if count == 0 {
        themed(GRAY, &[], "0")
    } else {
        themed(color_fn, &[BOLD], &count.to_string())
    };
    format!("  {} {}", pad_right(label, 12), value)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SUMMARIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn print_report(report: &BuildReport) {
    section_top("MATCHED");
    for entry in &report.matched {
        row(&format!(
            "  {} {} {} {}",
            policy_badge(entry.policy),
            pad_right(&truncate(&entry.name, 22), 22),
            pad_right(&themed(GRAY, &[], &truncate(&entry.platform_name, 22)), 22),
            themed(MAGENTA, &[], &format!("{:>6} entries", entry.entries))
        ));
    }
    if !report.excluded.is_empty() {
        section_mid("EXCLUDED");
        for entry in &report.excluded {
            row(&format!(
                "  {} {}",
                pad_right(&truncate(&entry.name, 22), 22),
                themed(GRAY, &[], &truncate(&entry.reason, 44))
            ));
        }
    }
    if !report.failed.is_empty() {
        section_mid("FAILED");
        for entry in &report.failed {
            row(&format!(
                "  {} {}",
                themed(RED, &[BOLD], &pad_right(&truncate(&entry.name, 22), 22)),
                truncate(&entry.reason, 46)
            ));
        }
    }
    if !report.unmatched.is_empty() {
        section_mid("UNMATCHED");
        for name in &report.unmatched {
            row(&format!("  {}", themed(YELLOW, &[], &truncate(name, 66))));
        }
    }
    section_mid("TOTALS");
    row(&count_line("matched", report.matched.len(), GREEN));
    row(&count_line("excluded", report.excluded.len(), BLUE));
    row(&count_line("failed", report.failed.len(), RED));
    row(&count_line("unmatched", report.unmatched.len(), YELLOW));
    section_bot();
}

pub fn print_build_summary(output: &BuildOutput) {
    println!();
    print_report(&output.reconciliation.report);
    println!();
    println!(
        "✅ {} tables → {}",
        output.reconciliation.mapped.len(),
        output.artifact.display()
    );
    if let Some(dir) = &output.verification_dir {
        println!("   open {} to compare renderings", dir.join("index.html").display());
    }
}

pub fn print_verification(report: &VerificationReport) {
    section_top("CHECK");
    row(&count_line("entries", report.checked, CYAN));
    row(&count_line("violations", report.violations.len(), RED));
    if !report.is_clean() {
        section_mid("VIOLATIONS");
        for v in &report.violations {
            row(&format!(
                "  {} {}",
                themed(RED, &[BOLD], &pad_right(&truncate(&v.name, 18), 18)),
                truncate(&v.violation.to_string(), 50)
            ));
        }
    }
    section_bot();
}

pub fn print_registry(encodings: &[PlatformEncodingInfo]) {
    section_top("PLATFORM ENCODINGS");
    for info in encodings {
        let kind = if info.is_single_byte {
            themed(GREEN, &[], "single")
        } else {
            themed(BLUE, &[], "multi ")
        };
        let variants: Vec<&str> = info
            .alias
            .variants()
            .filter(|v| *v != info.name().to_lowercase())
            .collect();
        row(&format!(
            "  {} {} {}",
            pad_right(&themed(CYAN, &[BOLD], info.name()), 16),
            kind,
            themed(GRAY, &[], &truncate(&variants.join(", "), 46))
        ));
    }
    section_bot();
}
