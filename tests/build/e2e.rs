//! End-to-end tests for the build workflow.

use std::fs;

use encmap::build::{run_build, BuildOptions, REPORT_FILE, VERIFICATION_DIR};
use encmap::derive::TablePolicy;
use encmap::emit::load_artifact;
use encmap::error::EncmapError;
use encmap::verify::verify_entries;
use tempfile::TempDir;

use crate::common::{
    assert_complete, entry_named, fixture, full_registry, mdn_options, reconcile_mdn,
};

#[test]
fn test_reconcile_mdn_fixture() {
    let result = reconcile_mdn();
    let report = &result.report;

    assert_eq!(report.total(), 9);
    assert_eq!(report.unmatched, vec!["x-klingon"]);
    assert_eq!(report.excluded.len(), 1);
    assert_eq!(report.excluded[0].name, "UTF-8");
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "ISO-8859-3");
    assert!(report.failed[0].reason.contains("0xA5"));

    let names: Vec<&str> = result.mapped.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["IBM866", "windows-1252", "GBK", "Shift_JIS", "EUC-KR", "UTF-16LE"]
    );
    result.mapped.iter().for_each(assert_complete);
}

#[test]
fn test_windows_1252_scenario() {
    let result = reconcile_mdn();
    let entry = entry_named(&result.mapped, "windows-1252").unwrap();
    let table = entry.table.as_ref().unwrap();

    assert_eq!(entry.platform_name.as_deref(), Some("windows-1252"));
    assert_eq!(table.len(), 256);
    assert_eq!(table.code_points()[0x41], 0x41);
    assert_eq!(table.byte_sequences()[0x41], vec![0x41]);

    let matched = result.report.matched_entry("windows-1252").unwrap();
    assert_eq!(matched.policy, TablePolicy::SingleByte);
}

#[test]
fn test_utf16_table_covers_bmp_scalars() {
    let result = reconcile_mdn();
    let entry = entry_named(&result.mapped, "UTF-16LE").unwrap();
    let table = entry.table.as_ref().unwrap();
    assert_eq!(table.len(), 0x10000 - 0x800);
    assert_eq!(table.bytes_for(0x20AC), Some(&[0xAC, 0x20][..]));
}

#[test]
fn test_run_build_e2e_basic() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let result = run_build(&mdn_options(output_path.clone()));
    assert!(result.is_ok(), "Build should succeed: {:?}", result.err());

    let artifact = fs::read_to_string(output_path.join("encoders_data.js")).unwrap();
    assert!(artifact.starts_with("let TEXT_ENCODINGS_RAW = [{"));
    assert!(artifact.ends_with("}];"));
    assert!(output_path.join(REPORT_FILE).exists());

    let pages = output_path.join(VERIFICATION_DIR);
    assert!(pages.join("index.html").exists());
    assert!(pages.join("Shift_JIS.html").exists());
    assert!(!pages.join("UTF-8.html").exists());
    assert!(!pages.join("x-klingon.html").exists());
}

#[test]
fn test_run_build_e2e_artifact_checks_clean() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_build(&mdn_options(temp_dir.path().to_path_buf())).unwrap();

    let artifact = load_artifact(&output.artifact).unwrap();
    assert_eq!(artifact.variable, "TEXT_ENCODINGS_RAW");
    assert_eq!(artifact.entries, output.reconciliation.mapped);

    let report = verify_entries(&artifact.entries, &full_registry());
    assert_eq!(report.checked, 6);
    assert!(report.is_clean(), "violations: {:?}", report.violations);

    // Shift_JIS encodes U+00A5 as the backslash byte; that entry is left out.
    let shift_jis = entry_named(&artifact.entries, "Shift_JIS").unwrap();
    assert!(shift_jis.table.as_ref().unwrap().bytes_for(0xA5).is_none());
}

#[test]
fn test_run_build_e2e_custom_variable_no_pages() {
    let temp_dir = TempDir::new().unwrap();
    let options = BuildOptions {
        variable: "ENCODINGS".to_string(),
        artifact_name: "enc.js".to_string(),
        verification: false,
        ..mdn_options(temp_dir.path().to_path_buf())
    };

    let output = run_build(&options).unwrap();
    assert!(output.verification_dir.is_none());
    assert!(!temp_dir.path().join(VERIFICATION_DIR).exists());

    let artifact = fs::read_to_string(temp_dir.path().join("enc.js")).unwrap();
    assert!(artifact.starts_with("let ENCODINGS = "));
}

#[test]
fn test_run_build_e2e_basic_only() {
    let temp_dir = TempDir::new().unwrap();
    let options = BuildOptions {
        code_pages: false,
        ..mdn_options(temp_dir.path().to_path_buf())
    };

    let output = run_build(&options).unwrap();
    let names: Vec<&str> = output
        .reconciliation
        .mapped
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, vec!["windows-1252", "UTF-16LE"]);
    assert!(output
        .reconciliation
        .report
        .unmatched
        .contains(&"Shift_JIS".to_string()));
}

#[test]
fn test_run_build_e2e_report_contents() {
    let temp_dir = TempDir::new().unwrap();
    run_build(&mdn_options(temp_dir.path().to_path_buf())).unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp_dir.path().join(REPORT_FILE)).unwrap())
            .unwrap();
    assert_eq!(report["unmatched"][0], "x-klingon");
    assert_eq!(report["excluded"][0]["platformName"], "UTF-8");
    assert_eq!(report["failed"][0]["name"], "ISO-8859-3");
    assert_eq!(report["matched"][0]["policy"], "single-byte");
}

#[test]
fn test_run_build_e2e_missing_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let options = BuildOptions::new(temp_dir.path().join("nope.json"), temp_dir.path());

    let result = run_build(&options);
    assert!(matches!(result, Err(EncmapError::Read { .. })));
    assert!(!temp_dir.path().join("encoders_data.js").exists());
}

#[test]
fn test_run_build_e2e_invalid_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let options = BuildOptions::new(fixture("invalid/not_an_array.json"), temp_dir.path());

    let err = run_build(&options).unwrap_err();
    assert!(
        err.to_string().contains("JSON"),
        "Error should mention JSON: {}",
        err
    );
}

#[test]
fn test_run_build_e2e_rejects_bad_variable() {
    let temp_dir = TempDir::new().unwrap();
    let options = BuildOptions {
        variable: "not valid".to_string(),
        ..mdn_options(temp_dir.path().to_path_buf())
    };
    assert!(matches!(
        run_build(&options),
        Err(EncmapError::InvalidVariable(_))
    ));
}

#[test]
fn test_verification_page_skips_less_than() {
    let temp_dir = TempDir::new().unwrap();
    run_build(&mdn_options(temp_dir.path().to_path_buf())).unwrap();

    let page = fs::read(temp_dir.path().join(VERIFICATION_DIR).join("windows-1252.html")).unwrap();
    let body_start = page
        .windows(6)
        .position(|w| w == b"<body>")
        .unwrap()
        + 6;
    let body_end = page.len() - b"</body></html>".len();
    let body = &page[body_start..body_end];

    assert_eq!(body.len(), 255);
    assert!(!body.contains(&b'<'));
    // Everything after '<' shifts down by one.
    assert_eq!(body[0x3B], 0x3B);
    assert_eq!(body[0x3C], 0x3D);
}
