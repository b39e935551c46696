//! End-to-end reader → writer roundtrip over the nested/whitespace
//! example, replacing every number with a literal `0` along the way to
//! prove tokens survive a full document walk without the reader/writer
//! needing to agree on a document model.

use az_json::{JsonTokenKind, Reader, Writer};
use az_test_support::NESTED_ROUNDTRIP_DOCUMENT;

fn canonicalize(source: &[u8]) -> String {
    let mut reader = Reader::new(source);
    let mut buffer = [0u8; 256];
    let mut writer = Writer::new(&mut buffer);

    loop {
        match reader.next_token().unwrap() {
            JsonTokenKind::None => break,
            JsonTokenKind::BeginObject => writer.begin_object().unwrap(),
            JsonTokenKind::EndObject => writer.end_object().unwrap(),
            JsonTokenKind::BeginArray => writer.begin_array().unwrap(),
            JsonTokenKind::EndArray => writer.end_array().unwrap(),
            JsonTokenKind::PropertyName => {
                writer
                    .property_name(std::str::from_utf8(reader.current().slice()).unwrap())
                    .unwrap();
            }
            JsonTokenKind::String => {
                writer
                    .string(std::str::from_utf8(reader.current().slice()).unwrap())
                    .unwrap();
            }
            JsonTokenKind::Number => writer.number_raw("0").unwrap(),
            JsonTokenKind::True => writer.bool(true).unwrap(),
            JsonTokenKind::False => writer.bool(false).unwrap(),
            JsonTokenKind::Null => writer.null().unwrap(),
        }
    }

    std::str::from_utf8(writer.get_written()).unwrap().to_string()
}

#[test]
fn nested_document_canonicalizes_with_numbers_zeroed() {
    let out = canonicalize(NESTED_ROUNDTRIP_DOCUMENT.as_bytes());
    assert_eq!(out, r#"{"a":[true,{"b":[{}]},0]}"#);
}

#[test]
fn nesting_depth_63_succeeds_64_overflows() {
    let mut within = "[".repeat(63);
    within.push_str(&"]".repeat(63));
    let mut reader = Reader::new(within.as_bytes());
    loop {
        match reader.next_token() {
            Ok(JsonTokenKind::None) => break,
            Ok(_) => continue,
            Err(err) => panic!("unexpected error at depth 63: {err:?}"),
        }
    }

    let mut over = "[".repeat(64);
    over.push_str(&"]".repeat(64));
    let mut reader = Reader::new(over.as_bytes());
    let mut saw_overflow = false;
    loop {
        match reader.next_token() {
            Ok(JsonTokenKind::None) => break,
            Ok(_) => continue,
            Err(az_json::JsonError::NestingOverflow) => {
                saw_overflow = true;
                break;
            }
            Err(other) => panic!("expected NestingOverflow, got {other:?}"),
        }
    }
    assert!(saw_overflow);
}
