use az_core::{Facility, ResultCode};
use thiserror::Error;

/// Errors from topic format substitution, extraction, and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TopicError {
    /// A recognized token's value was not supplied.
    #[error("missing value for a token in the topic format")]
    InvalidArg,
    /// A `{...}` token name isn't one of the six recognized tokens.
    #[error("unrecognized token in topic format")]
    UnknownToken,
    /// A `{` has no matching `}` (or vice versa).
    #[error("malformed topic format: unbalanced braces")]
    MalformedFormat,
    /// The format contains `+`/`#`, an empty level, or a trailing slash.
    #[error("topic format failed validation")]
    InvalidFormat,
    /// The received topic didn't match the format: a literal segment
    /// differed, or an extracted token didn't equal the caller-supplied
    /// value.
    #[error("received topic did not match the expected format")]
    Mismatch,
}

impl ResultCode for TopicError {
    fn facility(&self) -> Facility {
        Facility::Mqtt
    }

    fn code(&self) -> u32 {
        match self {
            TopicError::InvalidArg => 1,
            TopicError::UnknownToken => 2,
            TopicError::MalformedFormat => 3,
            TopicError::InvalidFormat => 4,
            TopicError::Mismatch => 5,
        }
    }
}
