//! Raw-text-to-number conversion, kept separate from the token stream
//! itself (Design Note 9.1): the reader and writer never touch an FPU or
//! allocate to move a number in or out, so a caller that only needs to
//! relay a number untouched pays nothing for this module.

use crate::error::JsonError;

/// Parses a JSON number token's raw text as `i64`. Fails on fractional or
/// exponent parts, or on overflow.
pub fn as_i64(raw: &[u8]) -> Result<i64, JsonError> {
    let text = std::str::from_utf8(raw).map_err(|_| JsonError::UnexpectedChar { offset: 0 })?;
    text.parse()
        .map_err(|_| JsonError::UnexpectedChar { offset: 0 })
}

/// Parses a JSON number token's raw text as `u64`. Fails on a leading `-`,
/// a fractional or exponent part, or overflow.
pub fn as_u64(raw: &[u8]) -> Result<u64, JsonError> {
    let text = std::str::from_utf8(raw).map_err(|_| JsonError::UnexpectedChar { offset: 0 })?;
    text.parse()
        .map_err(|_| JsonError::UnexpectedChar { offset: 0 })
}

/// Parses a JSON number token's raw text as `f64`, accepting the full
/// grammar (fraction, exponent). `1e309` parses to `f64::INFINITY` rather
/// than failing — the core tokenizer already accepted it (spec §8); this
/// conversion is the opt-in step where IEEE-754 overflow rules apply.
pub fn as_f64(raw: &[u8]) -> Result<f64, JsonError> {
    let text = std::str::from_utf8(raw).map_err(|_| JsonError::UnexpectedChar { offset: 0 })?;
    text.parse()
        .map_err(|_| JsonError::UnexpectedChar { offset: 0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_text_parses_exactly() {
        assert_eq!(as_i64(b"-42").unwrap(), -42);
        assert_eq!(as_u64(b"42").unwrap(), 42);
    }

    #[test]
    fn fractional_text_rejected_for_integer_conversion() {
        assert!(as_i64(b"4.2").is_err());
    }

    #[test]
    fn large_exponent_converts_to_infinity_not_an_error() {
        assert_eq!(as_f64(b"1e309").unwrap(), f64::INFINITY);
    }

    #[test]
    fn negative_text_rejected_for_unsigned_conversion() {
        assert!(as_u64(b"-1").is_err());
    }
}
