//! RFC 6901 JSON Pointer resolution (spec §4.3), layered entirely on top of
//! the [`Reader`]: no separate document model is built, so an object whose
//! matching property is never visited is never fully tokenized.

use crate::error::JsonError;
use crate::reader::Reader;
use crate::token::{JsonToken, JsonTokenKind};

/// Resolves `pointer` against `document`, returning the token the pointer
/// names. The empty pointer `""` resolves to the whole document (its root
/// value's first token).
pub fn parse_by_pointer<'a>(
    document: &'a [u8],
    pointer: &str,
) -> Result<JsonToken<'a>, JsonError> {
    let mut reader = Reader::new(document);
    reader.next_token()?;
    if pointer.is_empty() {
        return Ok(reader.current());
    }
    let rest = pointer.strip_prefix('/').ok_or(JsonError::ItemNotFound)?;
    for raw_segment in rest.split('/') {
        let segment = unescape(raw_segment)?;
        match reader.current().kind {
            JsonTokenKind::BeginObject => descend_object(&mut reader, &segment)?,
            JsonTokenKind::BeginArray => descend_array(&mut reader, &segment)?,
            _ => return Err(JsonError::ItemNotFound),
        }
    }
    Ok(reader.current())
}

fn descend_object(reader: &mut Reader<'_>, key: &str) -> Result<(), JsonError> {
    loop {
        match reader.next_token()? {
            JsonTokenKind::EndObject => return Err(JsonError::ItemNotFound),
            JsonTokenKind::PropertyName => {
                let matched = decode_json_string(reader.current().slice) == key;
                let value_kind = reader.next_token()?;
                if matched {
                    return Ok(());
                }
                if value_kind.is_container_start() {
                    reader.skip_children()?;
                }
            }
            _ => return Err(JsonError::InvalidState),
        }
    }
}

fn descend_array(reader: &mut Reader<'_>, segment: &str) -> Result<(), JsonError> {
    let index: usize = segment.parse().map_err(|_| JsonError::ItemNotFound)?;
    reader.next_token()?;
    for i in 0..=index {
        if reader.current().kind == JsonTokenKind::EndArray {
            return Err(JsonError::ItemNotFound);
        }
        if i == index {
            return Ok(());
        }
        next_sibling(reader)?;
    }
    unreachable!("loop always returns or errors before exhausting 0..=index")
}

fn next_sibling(reader: &mut Reader<'_>) -> Result<JsonTokenKind, JsonError> {
    reader.skip_children()?;
    reader.next_token()
}

/// Decodes `~1` to `/` and `~0` to `~`, per RFC 6901 §4. A bare trailing
/// `~` or a `~` followed by anything other than `0`/`1` is a malformed
/// pointer, not literal text.
fn unescape(segment: &str) -> Result<String, JsonError> {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.char_indices();
    while let Some((offset, c)) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '0')) => out.push('~'),
            Some((_, '1')) => out.push('/'),
            _ => return Err(JsonError::UnexpectedChar { offset }),
        }
    }
    Ok(out)
}

/// Decodes a raw (unexpanded) JSON string token slice so it can be compared
/// byte-for-byte against a pointer segment, per spec §4.3's requirement
/// that decoding applies to the object key as well as the pointer segment.
/// Malformed escapes fall back to the literal bytes rather than failing —
/// the reader already rejected truly malformed JSON before this point.
fn decode_json_string(raw: &[u8]) -> String {
    let text = match std::str::from_utf8(raw) {
        Ok(t) => t,
        Err(_) => return String::from_utf8_lossy(raw).into_owned(),
    };
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => out.push_str(&hex),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
