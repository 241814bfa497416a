//! Tests for table derivation against real codecs.

use encmap::derive::{derive_multi_byte, Derived, TableDeriver, TablePolicy};
use encmap::error::DeriveError;
use encmap::registry::{PlatformEncodingInfo, PlatformRegistry};
use encmap::verify::check_multi_byte_redecode;

use crate::common::{full_registry, legacy_dbcs, FakeCodec, FakeRegistry};

fn info(registry: &impl PlatformRegistry, name: &str) -> PlatformEncodingInfo {
    registry
        .list_encodings()
        .into_iter()
        .find(|i| i.name() == name)
        .unwrap_or_else(|| panic!("{} not in registry", name))
}

fn derive(web_name: &str, platform_name: &str) -> Result<Derived, DeriveError> {
    let registry = full_registry();
    let platform = info(&registry, platform_name);
    TableDeriver::new(&registry).derive(web_name, &platform)
}

#[test]
fn test_every_real_single_byte_table_is_in_byte_order() {
    let registry = full_registry();
    let deriver = TableDeriver::new(&registry);

    for platform in registry.list_encodings().iter().filter(|i| i.is_single_byte) {
        match deriver.derive(platform.name(), platform) {
            Ok(Derived::Table { policy, table }) => {
                assert_eq!(policy, TablePolicy::SingleByte);
                assert_eq!(table.len(), 256, "{}", platform.name());
                for (i, bytes) in table.byte_sequences().iter().enumerate() {
                    assert_eq!(bytes, &vec![i as u8], "{}", platform.name());
                }
            }
            // Encodings with unassigned bytes cannot round-trip.
            Err(DeriveError::NotReencodable { code_point, .. }) => {
                assert_eq!(code_point, 0xFFFD, "{}", platform.name());
            }
            other => panic!("{}: unexpected {:?}", platform.name(), other),
        }
    }
}

#[test]
fn test_ibm866_table() {
    let Derived::Table { table, .. } = derive("IBM866", "IBM866").unwrap() else {
        panic!("Expected a table");
    };
    // 0x80 is CYRILLIC CAPITAL LETTER A
    assert_eq!(table.code_points()[0x80], 0x0410);
    assert_eq!(table.code_points()[0x41], 0x41);
}

#[test]
fn test_gbk_multi_byte_table() {
    let Derived::Table { policy, table } = derive("GBK", "GBK").unwrap() else {
        panic!("Expected a table");
    };
    assert_eq!(policy, TablePolicy::MultiByte);
    assert_eq!(table.bytes_for(0x4E2D), Some(&[0xD6, 0xD0][..]));
    assert_eq!(table.bytes_for(0x41), Some(&[0x41][..]));
    assert!(table.code_points().windows(2).all(|w| w[0] < w[1]));
    assert!(table.code_points().iter().all(|&cp| cp <= 0xFFFF));
}

#[test]
fn test_shift_jis_skips_unmappable() {
    let Derived::Table { table, .. } = derive("Shift_JIS", "Shift_JIS").unwrap() else {
        panic!("Expected a table");
    };
    // Hangul has no Shift_JIS encoding.
    assert!(table.bytes_for(0xAC00).is_none());
    assert_eq!(table.bytes_for(0x3042), Some(&[0x82, 0xA0][..]));
}

#[test]
fn test_every_real_multi_byte_table_redecodes_exactly() {
    let registry = full_registry();

    for platform in registry.list_encodings().iter().filter(|i| !i.is_single_byte) {
        let codec = registry.codec(platform.name()).unwrap();
        match derive_multi_byte(codec.as_ref()) {
            Ok(table) => {
                let violations = check_multi_byte_redecode(&table, codec.as_ref());
                assert!(violations.is_empty(), "{}: {:?}", platform.name(), violations);
            }
            Err(DeriveError::EmptyTable) => assert_eq!(platform.name(), "replacement"),
            Err(other) => panic!("{}: unexpected {:?}", platform.name(), other),
        }
    }
}

#[test]
fn test_iso_2022_jp_halfwidth_katakana_left_out() {
    let registry = full_registry();
    let codec = registry.codec("ISO-2022-JP").unwrap();
    let table = derive_multi_byte(codec.as_ref()).unwrap();

    // Halfwidth katakana come back fullwidth.
    assert!(table.bytes_for(0xFF61).is_none());
    assert!(table.bytes_for(0x3042).is_some());
}

#[test]
fn test_utf8_always_excluded() {
    assert_eq!(derive("UTF-8", "UTF-8").unwrap(), Derived::Excluded);
    assert_eq!(derive("utf-8", "UTF-8").unwrap(), Derived::Excluded);
}

#[test]
fn test_replacement_has_no_table() {
    assert_eq!(
        derive("replacement", "replacement"),
        Err(DeriveError::EmptyTable)
    );
}

#[test]
fn test_euro_gap_in_legacy_codec() {
    let registry = FakeRegistry::new().with_encoding("dbcs", &[], false, legacy_dbcs());
    let codec = registry.codec("dbcs").unwrap();
    let table = derive_multi_byte(codec.as_ref()).unwrap();

    assert!(table.bytes_for(0x20AC).is_none());
    let position = table
        .code_points()
        .iter()
        .position(|&cp| cp == 0x20AB)
        .unwrap();
    assert_eq!(table.code_points()[position + 1], 0x20AD);
}

#[test]
fn test_single_byte_decode_width_fault() {
    // Byte 0x80 decodes to two characters.
    let codec = FakeCodec::single_byte_identity().with_decoding(vec![0x80], "ab");
    let registry = FakeRegistry::new().with_encoding("wide", &[], true, codec);
    let platform = info(&registry, "wide");

    assert_eq!(
        TableDeriver::new(&registry).derive("wide", &platform),
        Err(DeriveError::DecodeWidth {
            byte: 0x80,
            units: 2
        })
    );
}
