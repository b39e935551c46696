//! Streaming, allocation-free JSON writer over a caller-owned destination
//! span (spec §4.2), mirroring the reader's structural bookkeeping: the same
//! `az_core::NestingStack` tracks container depth, and the same separator
//! rules (comma before every item but the first, colon after a property
//! name) are enforced by a small "what comes next" flag rather than scanning
//! already-written bytes.

use az_core::{ContainerKind, NestingStack};

use crate::error::JsonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Nothing written yet, or the previous write completed the single
    /// top-level value: another top-level write is a caller error.
    DocumentValue,
    ObjectFirstPropertyOrClose,
    ObjectPropertyOrClose,
    PropertyColon,
    ArrayFirstValueOrClose,
    ArrayValueOrClose,
    Done,
}

/// Writes JSON tokens into `destination`, advancing a cursor; never grows
/// the buffer. On `InsufficientSpanSize` the cursor is left exactly where it
/// was before the failed call (spec §4.2: "written prefix unchanged").
pub struct Writer<'a> {
    destination: &'a mut [u8],
    written: usize,
    stack: NestingStack,
    expect: Expect,
}

impl<'a> Writer<'a> {
    pub fn new(destination: &'a mut [u8]) -> Self {
        Writer {
            destination,
            written: 0,
            stack: NestingStack::new(),
            expect: Expect::DocumentValue,
        }
    }

    /// The bytes written so far.
    pub fn get_written(&self) -> &[u8] {
        &self.destination[..self.written]
    }

    pub fn begin_object(&mut self) -> Result<(), JsonError> {
        self.with_rollback(|w| {
            w.before_value()?;
            w.put(b"{")?;
            w.stack.push(ContainerKind::Object)?;
            w.expect = Expect::ObjectFirstPropertyOrClose;
            Ok(())
        })
    }

    pub fn end_object(&mut self) -> Result<(), JsonError> {
        match self.expect {
            Expect::ObjectFirstPropertyOrClose | Expect::ObjectPropertyOrClose => {}
            _ => return Err(JsonError::InvalidState),
        }
        self.put(b"}")?;
        self.stack.pop().map_err(|_| JsonError::InvalidState)?;
        self.expect = self.after_close();
        Ok(())
    }

    pub fn begin_array(&mut self) -> Result<(), JsonError> {
        self.with_rollback(|w| {
            w.before_value()?;
            w.put(b"[")?;
            w.stack.push(ContainerKind::Array)?;
            w.expect = Expect::ArrayFirstValueOrClose;
            Ok(())
        })
    }

    pub fn end_array(&mut self) -> Result<(), JsonError> {
        match self.expect {
            Expect::ArrayFirstValueOrClose | Expect::ArrayValueOrClose => {}
            _ => return Err(JsonError::InvalidState),
        }
        self.put(b"]")?;
        self.stack.pop().map_err(|_| JsonError::InvalidState)?;
        self.expect = self.after_close();
        Ok(())
    }

    pub fn property_name(&mut self, name: &str) -> Result<(), JsonError> {
        self.with_rollback(|w| {
            match w.expect {
                Expect::ObjectFirstPropertyOrClose => {}
                Expect::ObjectPropertyOrClose => w.put(b",")?,
                _ => return Err(JsonError::InvalidState),
            }
            w.write_escaped_string(name)?;
            w.put(b":")?;
            w.expect = Expect::PropertyColon;
            Ok(())
        })
    }

    pub fn string(&mut self, value: &str) -> Result<(), JsonError> {
        self.with_rollback(|w| {
            w.before_value()?;
            w.write_escaped_string(value)?;
            w.after_value();
            Ok(())
        })
    }

    pub fn bool(&mut self, value: bool) -> Result<(), JsonError> {
        self.with_rollback(|w| {
            w.before_value()?;
            w.put(if value { b"true" } else { b"false" })?;
            w.after_value();
            Ok(())
        })
    }

    pub fn null(&mut self) -> Result<(), JsonError> {
        self.with_rollback(|w| {
            w.before_value()?;
            w.put(b"null")?;
            w.after_value();
            Ok(())
        })
    }

    pub fn int32(&mut self, value: i32) -> Result<(), JsonError> {
        let mut buf = itoa_buf();
        let text = format_i32(value, &mut buf);
        self.number_raw(text)
    }

    /// Writes `raw` verbatim as a number token. The caller is responsible
    /// for `raw` being a syntactically valid JSON number; this never
    /// validates or reformats it (spec §4.2/Design Note 9.1).
    pub fn number_raw(&mut self, raw: &str) -> Result<(), JsonError> {
        self.raw_value(raw)
    }

    /// Writes `raw` verbatim as a value, with no quoting or escaping. Used
    /// for embedding an already-serialized JSON fragment (an object, array,
    /// or number) that the caller assembled elsewhere; the caller is
    /// responsible for `raw` being syntactically valid JSON.
    pub fn raw_value(&mut self, raw: &str) -> Result<(), JsonError> {
        self.with_rollback(|w| {
            w.before_value()?;
            w.put(raw.as_bytes())?;
            w.after_value();
            Ok(())
        })
    }

    /// Snapshots `self.written` before running `f` and restores it if `f`
    /// fails, so a separator comma committed early in `f` (spec §4.2/§8:
    /// "written prefix unchanged on failure") never survives a later
    /// failure in the same call.
    fn with_rollback(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<(), JsonError>,
    ) -> Result<(), JsonError> {
        let start = self.written;
        match f(self) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.written = start;
                Err(e)
            }
        }
    }

    fn before_value(&mut self) -> Result<(), JsonError> {
        match self.expect {
            Expect::DocumentValue => Ok(()),
            Expect::PropertyColon => Ok(()),
            Expect::ArrayFirstValueOrClose => Ok(()),
            Expect::ArrayValueOrClose => self.put(b","),
            _ => Err(JsonError::InvalidState),
        }
    }

    fn after_value(&mut self) {
        self.expect = match self.stack.last() {
            None => Expect::Done,
            Some(ContainerKind::Object) => Expect::ObjectPropertyOrClose,
            Some(ContainerKind::Array) => Expect::ArrayValueOrClose,
        };
    }

    fn after_close(&self) -> Expect {
        match self.stack.last() {
            None => Expect::Done,
            Some(ContainerKind::Object) => Expect::ObjectPropertyOrClose,
            Some(ContainerKind::Array) => Expect::ArrayValueOrClose,
        }
    }

    fn put(&mut self, bytes: &[u8]) -> Result<(), JsonError> {
        let end = self
            .written
            .checked_add(bytes.len())
            .ok_or(JsonError::InsufficientSpanSize)?;
        if end > self.destination.len() {
            return Err(JsonError::InsufficientSpanSize);
        }
        self.destination[self.written..end].copy_from_slice(bytes);
        self.written = end;
        Ok(())
    }

    fn write_escaped_string(&mut self, value: &str) -> Result<(), JsonError> {
        let start = self.written;
        if let Err(e) = self.try_write_escaped_string(value) {
            self.written = start;
            return Err(e);
        }
        Ok(())
    }

    fn try_write_escaped_string(&mut self, value: &str) -> Result<(), JsonError> {
        self.put(b"\"")?;
        for c in value.chars() {
            match c {
                '"' => self.put(b"\\\"")?,
                '\\' => self.put(b"\\\\")?,
                '\u{8}' => self.put(b"\\b")?,
                '\u{c}' => self.put(b"\\f")?,
                '\n' => self.put(b"\\n")?,
                '\r' => self.put(b"\\r")?,
                '\t' => self.put(b"\\t")?,
                c if (c as u32) < 0x20 => {
                    let mut buf = [0u8; 6];
                    let hex = write_unicode_escape(c as u32, &mut buf);
                    self.put(hex)?;
                }
                c => {
                    let mut buf = [0u8; 4];
                    self.put(c.encode_utf8(&mut buf).as_bytes())?;
                }
            }
        }
        self.put(b"\"")
    }
}

fn write_unicode_escape(code: u32, buf: &mut [u8; 6]) -> &[u8] {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    buf[0] = b'\\';
    buf[1] = b'u';
    buf[2] = HEX[((code >> 12) & 0xF) as usize];
    buf[3] = HEX[((code >> 8) & 0xF) as usize];
    buf[4] = HEX[((code >> 4) & 0xF) as usize];
    buf[5] = HEX[(code & 0xF) as usize];
    buf
}

fn itoa_buf() -> [u8; 11] {
    [0u8; 11]
}

fn format_i32(value: i32, buf: &mut [u8; 11]) -> &str {
    use std::io::Write as _;
    let mut cursor = &mut buf[..];
    write!(cursor, "{value}").expect("i32 always fits in an 11-byte buffer");
    let remaining = cursor.len();
    let written = buf.len() - remaining;
    std::str::from_utf8(&buf[..written]).expect("only ASCII digits and '-' were written")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_object_roundtrip_shape() {
        let mut buf = [0u8; 64];
        let mut writer = Writer::new(&mut buf);
        writer.begin_object().unwrap();
        writer.property_name("a").unwrap();
        writer.string("Hello world!").unwrap();
        writer.end_object().unwrap();
        assert_eq!(writer.get_written(), br#"{"a":"Hello world!"}"#);
    }

    #[test]
    fn nested_array_and_object() {
        let mut buf = [0u8; 128];
        let mut writer = Writer::new(&mut buf);
        writer.begin_array().unwrap();
        writer.int32(1).unwrap();
        writer.begin_object().unwrap();
        writer.property_name("x").unwrap();
        writer.bool(true).unwrap();
        writer.end_object().unwrap();
        writer.null().unwrap();
        writer.end_array().unwrap();
        assert_eq!(writer.get_written(), br#"[1,{"x":true},null]"#);
    }

    #[test]
    fn insufficient_span_leaves_prefix_unchanged() {
        let mut buf = [0u8; 4];
        let mut writer = Writer::new(&mut buf);
        writer.begin_object().unwrap();
        let err = writer.property_name("longer-than-buffer");
        assert_eq!(err, Err(JsonError::InsufficientSpanSize));
        assert_eq!(writer.get_written(), b"{");
    }

    #[test]
    fn insufficient_span_on_second_element_leaves_committed_comma_out() {
        let mut buf = [0u8; 6];
        let mut writer = Writer::new(&mut buf);
        writer.begin_array().unwrap();
        writer.int32(1).unwrap();
        assert_eq!(writer.get_written(), b"[1");
        let err = writer.string("too long for the rest of the buffer");
        assert_eq!(err, Err(JsonError::InsufficientSpanSize));
        assert_eq!(writer.get_written(), b"[1");
    }

    #[test]
    fn string_escaping_covers_control_chars_and_quote() {
        let mut buf = [0u8; 64];
        let mut writer = Writer::new(&mut buf);
        writer.string("a\"b\\c\td\u{1}").unwrap();
        assert_eq!(writer.get_written(), br#""a\"b\\c\td\u0001""#);
    }

    #[test]
    fn top_level_scalar_then_second_write_is_invalid_state() {
        let mut buf = [0u8; 16];
        let mut writer = Writer::new(&mut buf);
        writer.int32(42).unwrap();
        assert_eq!(writer.bool(true), Err(JsonError::InvalidState));
    }

    #[test]
    fn trailing_comma_never_emitted_before_close() {
        let mut buf = [0u8; 32];
        let mut writer = Writer::new(&mut buf);
        writer.begin_array().unwrap();
        writer.end_array().unwrap();
        assert_eq!(writer.get_written(), b"[]");
    }
}
