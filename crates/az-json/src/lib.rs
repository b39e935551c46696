//! Zero-copy, zero-allocation-core JSON reader, writer, and pointer
//! resolver (spec §4.1–§4.3). Numbers are kept as raw text throughout the
//! reader and writer; [`number`] is the opt-in conversion step.

mod error;
mod number;
mod pointer;
mod reader;
mod token;
mod writer;

pub use error::JsonError;
pub use pointer::parse_by_pointer;
pub use reader::Reader;
pub use token::{JsonToken, JsonTokenKind};
pub use writer::Writer;

pub mod numbers {
    pub use crate::number::{as_f64, as_i64, as_u64};
}
