//! Streaming, zero-copy JSON tokenizer (spec §4.1), ported from the
//! recursive-descent scanner in
//! `original_source/sdk/core/core/src/az_json_parser.c` and flattened into a
//! single `next_token` call per lexical element (matching the newer
//! `az_json_reader` shape exercised by
//! `original_source/sdk/core/az_core/test/test_az_json.c`, which expects
//! `BeginObject`, `PropertyName`, `String`, `EndObject` as four independent
//! tokens rather than one combined "member" record).

use az_core::{ContainerKind, NestingStack};

use crate::error::JsonError;
use crate::token::{JsonToken, JsonTokenKind};

/// What kind of lexeme `next_token` is allowed to produce next. Driven
/// entirely by grammar position, not by the nesting stack alone, so that
/// "value required" (after a comma) and "value or close" (right after an
/// opening bracket) are distinguished — trailing commas are rejected the
/// same way the original scanner rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// The single top-level value; EOF here (no non-whitespace bytes) is a
    /// clean `Eof`, not an error recovering from malformed input.
    DocumentValue,
    /// Just entered an object: next is `"` (a property name) or `}`.
    ObjectStart,
    /// Just entered an array: next is a value or `]`.
    ArrayStart,
    /// Just read a property name: next must be `:`.
    Colon,
    /// After `:`, or after `,` inside an array: a value is required.
    Value,
    /// After `,` inside an object: a property name is required (no close).
    PropertyName,
    /// After a value inside an object: `,` or `}`.
    CommaOrCloseObject,
    /// After a value inside an array: `,` or `]`.
    CommaOrCloseArray,
    /// The top-level value is complete; only trailing whitespace is legal.
    Done,
}

/// A single-pass, forward-only JSON tokenizer over a caller-owned byte slice.
///
/// `Clone`/`Copy` because every field is a plain position/state value with
/// no owned allocation — cloning gives an independent cursor over the same
/// `source`, which callers use to hand out a reader positioned at a single
/// value (e.g. `get_next_component_property`'s `value_reader`) without
/// re-tokenizing from the start.
#[derive(Clone, Copy)]
pub struct Reader<'a> {
    source: &'a [u8],
    pos: usize,
    stack: NestingStack,
    expect: Expect,
    current: JsonToken<'a>,
    sticky_error: Option<JsonError>,
}

impl<'a> Reader<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Reader {
            source,
            pos: 0,
            stack: NestingStack::new(),
            expect: Expect::DocumentValue,
            current: JsonToken::NONE,
            sticky_error: None,
        }
    }

    pub const fn current(&self) -> JsonToken<'a> {
        self.current
    }

    /// The byte offset into `source` just past the most recently produced
    /// token. Lets a caller carve out a sub-slice spanning a whole value
    /// (e.g. a container from its `Begin*` token through the matching
    /// `End*` reached via `skip_children`) without re-tokenizing it.
    pub const fn byte_offset(&self) -> usize {
        self.pos
    }

    /// Current container nesting depth: 0 at the document root, incremented
    /// on each `Begin*` already consumed. Lets a caller track its own
    /// position within the grammar (e.g. "am I reading a root-level
    /// property or one inside a nested object") without re-deriving it from
    /// token sequences.
    pub fn depth(&self) -> u32 {
        self.stack.depth()
    }

    /// Advance to the next structural or value token.
    pub fn next_token(&mut self) -> Result<JsonTokenKind, JsonError> {
        if let Some(err) = self.sticky_error {
            return Err(err);
        }
        let result = self.advance();
        if let Err(err) = result {
            self.sticky_error = Some(err);
        }
        result
    }

    /// If the current token is `BeginObject`/`BeginArray`, consume tokens
    /// until the matching close, leaving the reader positioned on it.
    /// A no-op for any other current token kind.
    pub fn skip_children(&mut self) -> Result<(), JsonError> {
        if !self.current.kind.is_container_start() {
            return Ok(());
        }
        let mut depth: i64 = 1;
        loop {
            let kind = self.next_token()?;
            if kind.is_container_start() {
                depth += 1;
            } else if matches!(kind, JsonTokenKind::EndObject | JsonTokenKind::EndArray) {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
    }

    fn advance(&mut self) -> Result<JsonTokenKind, JsonError> {
        match self.expect {
            Expect::DocumentValue => self.read_value(Expect::DocumentValue),
            Expect::ObjectStart => self.read_object_start(),
            Expect::ArrayStart => self.read_array_start(),
            Expect::Colon => self.read_colon_then_value(),
            Expect::Value => self.read_value(Expect::Value),
            Expect::PropertyName => self.read_property_name(),
            Expect::CommaOrCloseObject => self.read_comma_or_close(ContainerKind::Object),
            Expect::CommaOrCloseArray => self.read_comma_or_close(ContainerKind::Array),
            Expect::Done => self.read_trailing(),
        }
    }

    fn read_trailing(&mut self) -> Result<JsonTokenKind, JsonError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(JsonError::Eof),
            Some(_) => Err(JsonError::UnexpectedChar { offset: self.pos }),
        }
    }

    fn read_object_start(&mut self) -> Result<JsonTokenKind, JsonError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(JsonError::Eof),
            Some(b'}') => self.close_container(JsonTokenKind::EndObject),
            Some(b'"') => self.read_property_name(),
            Some(c) => Err(self.unexpected(c)),
        }
    }

    fn read_array_start(&mut self) -> Result<JsonTokenKind, JsonError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(JsonError::Eof),
            Some(b']') => self.close_container(JsonTokenKind::EndArray),
            _ => self.read_value(Expect::ArrayStart),
        }
    }

    fn read_property_name(&mut self) -> Result<JsonTokenKind, JsonError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'"') => {
                self.advance_pos(1);
                let slice = self.read_string_body()?;
                self.set_current(JsonTokenKind::PropertyName, slice);
                self.expect = Expect::Colon;
                Ok(JsonTokenKind::PropertyName)
            }
            None => Err(JsonError::Eof),
            Some(c) => Err(self.unexpected(c)),
        }
    }

    fn read_colon_then_value(&mut self) -> Result<JsonTokenKind, JsonError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b':') => {
                self.advance_pos(1);
                self.skip_whitespace();
                self.read_value(Expect::Colon)
            }
            None => Err(JsonError::Eof),
            Some(c) => Err(self.unexpected(c)),
        }
    }

    fn read_comma_or_close(
        &mut self,
        container: ContainerKind,
    ) -> Result<JsonTokenKind, JsonError> {
        self.skip_whitespace();
        let close = match container {
            ContainerKind::Object => b'}',
            ContainerKind::Array => b']',
        };
        match self.peek() {
            Some(b',') => {
                self.advance_pos(1);
                self.skip_whitespace();
                match container {
                    ContainerKind::Object => self.read_property_name(),
                    ContainerKind::Array => self.read_value(Expect::Value),
                }
            }
            Some(c) if c == close => {
                let kind = match container {
                    ContainerKind::Object => JsonTokenKind::EndObject,
                    ContainerKind::Array => JsonTokenKind::EndArray,
                };
                self.close_container(kind)
            }
            None => Err(JsonError::Eof),
            Some(c) => Err(self.unexpected(c)),
        }
    }

    fn close_container(&mut self, kind: JsonTokenKind) -> Result<JsonTokenKind, JsonError> {
        let start = self.pos;
        self.advance_pos(1);
        self.stack.pop().map_err(|_| JsonError::InvalidState)?;
        self.set_current(kind, &self.source[start..self.pos]);
        self.expect = match self.stack.last() {
            None => Expect::Done,
            Some(ContainerKind::Object) => Expect::CommaOrCloseObject,
            Some(ContainerKind::Array) => Expect::CommaOrCloseArray,
        };
        Ok(kind)
    }

    /// Parses a value at the current position. `from` tells us what grammar
    /// position we're in, which only matters for picking the right "what's
    /// next" transition after a scalar (containers always transition to
    /// their own `*Start` regardless of `from`).
    fn read_value(&mut self, from: Expect) -> Result<JsonTokenKind, JsonError> {
        self.skip_whitespace();
        let c = match self.peek() {
            Some(c) => c,
            None => return Err(JsonError::Eof),
        };
        let kind = match c {
            b'{' => {
                self.advance_pos(1);
                self.stack
                    .push(ContainerKind::Object)
                    .map_err(|_| JsonError::NestingOverflow)?;
                self.set_current(JsonTokenKind::BeginObject, &self.source[self.pos - 1..self.pos]);
                self.expect = Expect::ObjectStart;
                return Ok(JsonTokenKind::BeginObject);
            }
            b'[' => {
                self.advance_pos(1);
                self.stack
                    .push(ContainerKind::Array)
                    .map_err(|_| JsonError::NestingOverflow)?;
                self.set_current(JsonTokenKind::BeginArray, &self.source[self.pos - 1..self.pos]);
                self.expect = Expect::ArrayStart;
                return Ok(JsonTokenKind::BeginArray);
            }
            b'"' => {
                self.advance_pos(1);
                let slice = self.read_string_body()?;
                self.set_current(JsonTokenKind::String, slice);
                JsonTokenKind::String
            }
            b'-' | b'0'..=b'9' => {
                let slice = self.read_number_body()?;
                self.set_current(JsonTokenKind::Number, slice);
                JsonTokenKind::Number
            }
            b't' => {
                self.read_literal(b"true")?;
                JsonTokenKind::True
            }
            b'f' => {
                self.read_literal(b"false")?;
                JsonTokenKind::False
            }
            b'n' => {
                self.read_literal(b"null")?;
                JsonTokenKind::Null
            }
            c => return Err(self.unexpected(c)),
        };
        self.expect = match from {
            Expect::DocumentValue => Expect::Done,
            Expect::Colon => match self.stack.last() {
                None => Expect::Done,
                Some(ContainerKind::Object) => Expect::CommaOrCloseObject,
                Some(ContainerKind::Array) => Expect::CommaOrCloseArray,
            },
            Expect::ArrayStart | Expect::Value => match self.stack.last() {
                None => Expect::Done,
                Some(ContainerKind::Object) => Expect::CommaOrCloseObject,
                Some(ContainerKind::Array) => Expect::CommaOrCloseArray,
            },
            _ => unreachable!("read_value only entered from value positions"),
        };
        Ok(kind)
    }

    fn read_literal(&mut self, literal: &'static [u8]) -> Result<(), JsonError> {
        let start = self.pos;
        for &expected in literal {
            match self.source.get(self.pos) {
                Some(&b) if b == expected => self.advance_pos(1),
                Some(&b) => return Err(self.unexpected(b)),
                None => return Err(JsonError::Eof),
            }
        }
        self.current.slice = &self.source[start..self.pos];
        Ok(())
    }

    /// Caller has already consumed the opening `"`. Scans to the matching
    /// unescaped closing quote, validating escape sequences, and returns the
    /// slice between the quotes (escapes not decoded, per spec §4.1).
    fn read_string_body(&mut self) -> Result<&'a [u8], JsonError> {
        let start = self.pos;
        loop {
            match self.source.get(self.pos) {
                None => return Err(JsonError::Eof),
                Some(b'"') => {
                    let slice = &self.source[start..self.pos];
                    self.advance_pos(1);
                    return Ok(slice);
                }
                Some(b'\\') => {
                    self.advance_pos(1);
                    match self.source.get(self.pos) {
                        None => return Err(JsonError::Eof),
                        Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => {
                            self.advance_pos(1);
                        }
                        Some(b'u') => {
                            self.advance_pos(1);
                            for _ in 0..4 {
                                match self.source.get(self.pos) {
                                    Some(&c) if c.is_ascii_hexdigit() => self.advance_pos(1),
                                    Some(&c) => return Err(self.unexpected(c)),
                                    None => return Err(JsonError::Eof),
                                }
                            }
                        }
                        Some(&c) => return Err(self.unexpected(c)),
                    }
                }
                Some(_) => self.advance_pos(1),
            }
        }
    }

    /// Matches `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?` and returns
    /// the raw slice (spec §4.1/§9: numbers are never converted in the core).
    fn read_number_body(&mut self) -> Result<&'a [u8], JsonError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.advance_pos(1);
        }
        match self.peek() {
            Some(b'0') => self.advance_pos(1),
            Some(b'1'..=b'9') => {
                self.advance_pos(1);
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.advance_pos(1);
                }
            }
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(JsonError::Eof),
        }
        if self.peek() == Some(b'.') {
            self.advance_pos(1);
            match self.peek() {
                Some(b'0'..=b'9') => {
                    while matches!(self.peek(), Some(b'0'..=b'9')) {
                        self.advance_pos(1);
                    }
                }
                Some(c) => return Err(self.unexpected(c)),
                None => return Err(JsonError::Eof),
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.advance_pos(1);
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.advance_pos(1);
            }
            match self.peek() {
                Some(b'0'..=b'9') => {
                    while matches!(self.peek(), Some(b'0'..=b'9')) {
                        self.advance_pos(1);
                    }
                }
                Some(c) => return Err(self.unexpected(c)),
                None => return Err(JsonError::Eof),
            }
        }
        Ok(&self.source[start..self.pos])
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.advance_pos(1);
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn advance_pos(&mut self, n: usize) {
        self.pos += n;
    }

    fn unexpected(&self, _c: u8) -> JsonError {
        JsonError::UnexpectedChar { offset: self.pos }
    }

    fn set_current(&mut self, kind: JsonTokenKind, slice: &'a [u8]) {
        self.current = JsonToken::new(kind, slice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<JsonTokenKind> {
        let mut reader = Reader::new(src.as_bytes());
        let mut out = Vec::new();
        loop {
            match reader.next_token() {
                Ok(kind) => out.push(kind),
                Err(JsonError::Eof) => break,
                Err(e) => panic!("unexpected error {e:?} after {out:?}"),
            }
        }
        out
    }

    #[test]
    fn empty_input_is_eof() {
        let mut reader = Reader::new(b"");
        assert_eq!(reader.next_token(), Err(JsonError::Eof));
    }

    #[test]
    fn whitespace_only_is_eof() {
        let mut reader = Reader::new(b"   \t\n\r  ");
        assert_eq!(reader.next_token(), Err(JsonError::Eof));
    }

    #[test]
    fn simple_object_sequence() {
        let kinds = tokens(r#"{"a":"Hello world!"}"#);
        assert_eq!(
            kinds,
            vec![
                JsonTokenKind::BeginObject,
                JsonTokenKind::PropertyName,
                JsonTokenKind::String,
                JsonTokenKind::EndObject,
            ]
        );
    }

    #[test]
    fn nested_roundtrip_shape() {
        let kinds = tokens(r#"{ "a" : [ true, { "b": [{}]}, 15 ] }"#);
        assert_eq!(
            kinds,
            vec![
                JsonTokenKind::BeginObject,
                JsonTokenKind::PropertyName,
                JsonTokenKind::BeginArray,
                JsonTokenKind::True,
                JsonTokenKind::BeginObject,
                JsonTokenKind::PropertyName,
                JsonTokenKind::BeginArray,
                JsonTokenKind::BeginObject,
                JsonTokenKind::EndObject,
                JsonTokenKind::EndArray,
                JsonTokenKind::EndObject,
                JsonTokenKind::Number,
                JsonTokenKind::EndArray,
                JsonTokenKind::EndObject,
            ]
        );
    }

    #[test]
    fn depth_63_succeeds_64_overflows() {
        let mut src = "[".repeat(63);
        let mut reader = Reader::new(src.as_bytes());
        for _ in 0..63 {
            assert_eq!(reader.next_token(), Ok(JsonTokenKind::BeginArray));
        }
        src.push('[');
        let mut reader2 = Reader::new(src.as_bytes());
        for _ in 0..63 {
            assert_eq!(reader2.next_token(), Ok(JsonTokenKind::BeginArray));
        }
        assert_eq!(reader2.next_token(), Err(JsonError::NestingOverflow));
    }

    #[test]
    fn unterminated_string_is_eof() {
        let mut reader = Reader::new(br#""abc"#);
        assert_eq!(reader.next_token(), Err(JsonError::Eof));
    }

    #[test]
    fn short_unicode_escape_is_unexpected_char() {
        let mut reader = Reader::new(br#""\uFFF""#);
        assert!(matches!(
            reader.next_token(),
            Err(JsonError::UnexpectedChar { .. })
        ));
    }

    #[test]
    fn large_exponent_number_tokenizes() {
        let mut reader = Reader::new(b"1e309");
        assert_eq!(reader.next_token(), Ok(JsonTokenKind::Number));
        assert_eq!(reader.current().slice, b"1e309");
    }

    #[test]
    fn poisoned_reader_repeats_error() {
        let mut reader = Reader::new(b"");
        assert_eq!(reader.next_token(), Err(JsonError::Eof));
        assert_eq!(reader.next_token(), Err(JsonError::Eof));
    }

    #[test]
    fn trailing_garbage_after_top_level_value_is_unexpected_char() {
        let mut reader = Reader::new(b"true false");
        assert_eq!(reader.next_token(), Ok(JsonTokenKind::True));
        assert!(matches!(
            reader.next_token(),
            Err(JsonError::UnexpectedChar { .. })
        ));
    }

    #[test]
    fn skip_children_skips_to_matching_close() {
        let mut reader = Reader::new(br#"{"a":[1,2,3]}"#);
        assert_eq!(reader.next_token(), Ok(JsonTokenKind::BeginObject));
        assert_eq!(reader.next_token(), Ok(JsonTokenKind::PropertyName));
        assert_eq!(reader.next_token(), Ok(JsonTokenKind::BeginArray));
        reader.skip_children().unwrap();
        assert_eq!(reader.current().kind, JsonTokenKind::EndArray);
        assert_eq!(reader.next_token(), Ok(JsonTokenKind::EndObject));
    }

    #[test]
    fn trailing_comma_in_object_is_rejected() {
        let mut reader = Reader::new(br#"{"a":1,}"#);
        assert_eq!(reader.next_token(), Ok(JsonTokenKind::BeginObject));
        assert_eq!(reader.next_token(), Ok(JsonTokenKind::PropertyName));
        assert_eq!(reader.next_token(), Ok(JsonTokenKind::Number));
        assert!(matches!(
            reader.next_token(),
            Err(JsonError::UnexpectedChar { .. })
        ));
    }
}
