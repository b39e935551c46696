use az_core::{Facility, NestingError, ResultCode};
use thiserror::Error;

/// Errors shared by the JSON reader, writer, and pointer resolver.
///
/// One enum per crate, following the teacher's `DbError`/`UplinkError`
/// convention, rather than threading `az_core::CoreError` everywhere — most
/// of these variants carry JSON-specific context (byte offsets) that a bare
/// `CoreError` can't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JsonError {
    /// A lexical mismatch: malformed literal, bad escape, stray character.
    /// Per spec §9's Open Question resolution, this is used for any lexical
    /// problem — `InvalidState` is reserved for caller misuse only.
    #[error("unexpected character at offset {offset}")]
    UnexpectedChar { offset: usize },
    /// Input ended before a complete token (or the whole document) could be
    /// produced.
    #[error("unexpected end of input")]
    Eof,
    /// Container nesting exceeded `az_core::MAX_NESTING_DEPTH`.
    #[error("json nesting depth exceeded")]
    NestingOverflow,
    /// The reader/writer was asked to do something inconsistent with its
    /// current state — not a lexical problem, a caller contract violation
    /// (e.g. `property_name` outside an object, calling `next_token` again
    /// after the document is already complete).
    #[error("invalid reader/writer state")]
    InvalidState,
    /// The reader has already produced the terminal token for the document
    /// and further advancement was requested.
    #[error("reader already reached the end of its document")]
    ReaderDone,
    /// The destination span passed to the writer is too small for the next
    /// token; the writer's cursor is left unchanged.
    #[error("destination span too small")]
    InsufficientSpanSize,
    /// A JSON Pointer did not resolve to any location in the document.
    #[error("json pointer did not resolve to a value")]
    ItemNotFound,
}

impl From<NestingError> for JsonError {
    fn from(_: NestingError) -> Self {
        JsonError::NestingOverflow
    }
}

impl ResultCode for JsonError {
    fn facility(&self) -> Facility {
        match self {
            JsonError::UnexpectedChar { .. } | JsonError::Eof | JsonError::ItemNotFound => {
                Facility::Core
            }
            JsonError::InsufficientSpanSize => Facility::Core,
            JsonError::NestingOverflow | JsonError::InvalidState | JsonError::ReaderDone => {
                Facility::Json
            }
        }
    }

    fn code(&self) -> u32 {
        match self {
            JsonError::UnexpectedChar { .. } => 1,
            JsonError::Eof => 2,
            JsonError::ItemNotFound => 3,
            JsonError::InsufficientSpanSize => 4,
            JsonError::NestingOverflow => 5,
            JsonError::InvalidState => 6,
            JsonError::ReaderDone => 7,
        }
    }
}
