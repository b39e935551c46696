use az_core::{Facility, ResultCode};
use az_json::JsonError;
use thiserror::Error;

/// Errors from the IoT Hub / DPS / PnP topic and payload codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// A received topic didn't match any recognized template.
    #[error("topic did not match the expected template")]
    TopicNoMatch,
    /// A required JSON field was absent and no fallback applies.
    #[error("required payload field not found")]
    ItemNotFound,
    /// A payload field had the wrong shape (e.g. `status` not a string).
    #[error("malformed payload field")]
    UnexpectedChar,
    /// The destination buffer was too small for a formatted topic/payload.
    #[error("destination buffer too small")]
    InsufficientSpanSize,
    /// Underlying JSON parsing failure while reading a payload.
    #[error("json error while parsing payload: {0}")]
    Json(#[from] JsonError),
}

impl ResultCode for ProtocolError {
    fn facility(&self) -> Facility {
        match self {
            ProtocolError::TopicNoMatch => Facility::Mqtt,
            ProtocolError::ItemNotFound | ProtocolError::UnexpectedChar => Facility::Core,
            ProtocolError::InsufficientSpanSize => Facility::Core,
            ProtocolError::Json(_) => Facility::Json,
        }
    }

    fn code(&self) -> u32 {
        match self {
            ProtocolError::TopicNoMatch => 1,
            ProtocolError::ItemNotFound => 2,
            ProtocolError::UnexpectedChar => 3,
            ProtocolError::InsufficientSpanSize => 4,
            ProtocolError::Json(_) => 5,
        }
    }
}
