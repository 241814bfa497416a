//! Tests for catalog loading.

use encmap::catalog::load_catalog;
use encmap::error::EncmapError;

use crate::common::{fixture, MDN_CATALOG};

#[test]
fn test_load_mdn_catalog() {
    let catalog = load_catalog(MDN_CATALOG.as_ref()).unwrap();
    assert_eq!(catalog.len(), 9);
    assert_eq!(catalog[0].name, "UTF-8");
    assert_eq!(catalog[8].name, "x-klingon");
    assert!(catalog.iter().all(|e| e.platform_name.is_none() && e.table.is_none()));
}

#[test]
fn test_alias_sets_include_the_name() {
    let catalog = load_catalog(MDN_CATALOG.as_ref()).unwrap();
    let gbk = catalog[4].alias_set();
    assert!(gbk.contains("gbk"));
    assert!(gbk.contains("X-GBK"));
    assert_eq!(gbk.len(), 5);
}

#[test]
fn test_legacy_fields_are_ignored() {
    let catalog = load_catalog(&fixture("valid/legacy_fields.json")).unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(catalog.iter().all(|e| e.platform_name.is_none()));
    assert!(catalog.iter().all(|e| e.table.is_none()));
}

#[test]
fn test_missing_catalog() {
    let result = load_catalog(&fixture("valid/does_not_exist.json"));
    match result {
        Err(EncmapError::Read { path, .. }) => {
            assert!(path.ends_with("does_not_exist.json"));
        }
        other => panic!("Expected Read error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_names_rejected() {
    let result = load_catalog(&fixture("invalid/duplicate_names.json"));
    assert!(matches!(result, Err(EncmapError::DuplicateName(name)) if name == "GBK"));
}

#[test]
fn test_catalog_must_be_an_array() {
    let result = load_catalog(&fixture("invalid/not_an_array.json"));
    let err = result.unwrap_err();
    assert!(matches!(err, EncmapError::Json(_)));
    assert!(err.to_string().contains("invalid catalog JSON"));
}
