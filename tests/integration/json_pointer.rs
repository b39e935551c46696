//! JSON Pointer resolution through an escaped key (`2/00` encoded as
//! `2~100` per RFC 6901), and the sibling-skipping behavior that lets it
//! avoid fully tokenizing subtrees it doesn't need.

use az_json::{parse_by_pointer, JsonTokenKind};
use az_test_support::{POINTER_ESCAPED_KEY_DOCUMENT, POINTER_ESCAPED_KEY_PATH};

#[test]
fn resolves_through_an_escaped_object_key() {
    let token = parse_by_pointer(
        POINTER_ESCAPED_KEY_DOCUMENT.as_bytes(),
        POINTER_ESCAPED_KEY_PATH,
    )
    .unwrap();
    assert_eq!(token.kind, JsonTokenKind::False);
}

#[test]
fn missing_path_is_item_not_found() {
    let err = parse_by_pointer(POINTER_ESCAPED_KEY_DOCUMENT.as_bytes(), "/responses/missing")
        .unwrap_err();
    assert_eq!(err, az_json::JsonError::ItemNotFound);
}

#[test]
fn array_index_segment_resolves_an_element() {
    let doc = br#"{"items":[10,20,30]}"#;
    let token = parse_by_pointer(doc, "/items/2").unwrap();
    assert_eq!(token.kind, JsonTokenKind::Number);
    assert_eq!(token.slice(), b"30");
}
