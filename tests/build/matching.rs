//! Tests for matching web names against the real registry.

use encmap::alias::EncodingAlias;
use encmap::catalog::load_catalog;
use encmap::matcher::Matcher;
use encmap::registry::{EncodingRsRegistry, PlatformRegistry};

use crate::common::{full_registry, MDN_CATALOG};

fn platform_matcher(registry: &EncodingRsRegistry) -> Matcher {
    Matcher::new(registry.list_encodings().into_iter().map(|info| info.alias))
}

#[test]
fn test_mdn_catalog_pairs() {
    let catalog = load_catalog(MDN_CATALOG.as_ref()).unwrap();
    let web: Vec<EncodingAlias> = catalog.iter().map(|e| e.alias_set()).collect();
    let pairs = platform_matcher(&full_registry()).match_all(&web);

    let resolved: Vec<(&str, Option<&str>)> = pairs
        .iter()
        .map(|p| (p.web_name.as_str(), p.platform_name.as_deref()))
        .collect();
    assert_eq!(
        resolved,
        vec![
            ("UTF-8", Some("UTF-8")),
            ("IBM866", Some("IBM866")),
            ("ISO-8859-3", Some("ISO-8859-3")),
            ("windows-1252", Some("windows-1252")),
            ("GBK", Some("GBK")),
            ("Shift_JIS", Some("Shift_JIS")),
            ("EUC-KR", Some("EUC-KR")),
            ("UTF-16LE", Some("UTF-16LE")),
            ("x-klingon", None),
        ]
    );
}

#[test]
fn test_basic_registry_leaves_code_pages_unmatched() {
    let web = vec![
        EncodingAlias::new("windows-1252", ["cp1252"]),
        EncodingAlias::new("Shift_JIS", ["sjis"]),
    ];
    let pairs = platform_matcher(&EncodingRsRegistry::new()).match_all(&web);
    assert!(pairs[0].is_matched());
    assert!(!pairs[1].is_matched());
}

#[test]
fn test_display_name_is_a_variant() {
    // Only the display name links these two.
    let web = vec![EncodingAlias::new("x-western", ["Western European (Windows)"])];
    let pairs = platform_matcher(&EncodingRsRegistry::new()).match_all(&web);
    assert_eq!(pairs[0].platform_name.as_deref(), Some("windows-1252"));
}

#[test]
fn test_platform_scan_is_sorted() {
    let matcher = platform_matcher(&full_registry());
    let names: Vec<&str> = matcher.platform().iter().map(|a| a.canonical_name()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}
