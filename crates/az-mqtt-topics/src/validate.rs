use crate::error::TopicError;
use crate::tokens::parse_format;

/// A valid format: contains no `+`/`#`, no empty level (`//`), no trailing
/// `/`, no unknown `{...}` token, and every `{` has a matching `}`.
pub fn validate_format(format: &str) -> Result<(), TopicError> {
    if format.contains('+') || format.contains('#') {
        return Err(TopicError::InvalidFormat);
    }
    if format.contains("//") {
        return Err(TopicError::InvalidFormat);
    }
    if format.ends_with('/') {
        return Err(TopicError::InvalidFormat);
    }
    parse_format(format)?;
    Ok(())
}
