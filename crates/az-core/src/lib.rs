//! Shared primitives for the embedded Azure device protocol crates: the
//! facility/code result taxonomy and the container-nesting tracker used
//! by both the JSON reader and writer. Byte spans are expressed directly
//! as ordinary lifetime-bound `&[u8]`/`&str` slices rather than a custom
//! span type — see `DESIGN.md`, "az-core".

mod error;
mod facility;
mod nesting;

pub use error::{CoreError, PlatformError};
pub use facility::{Facility, ResultCode};
pub use nesting::{ContainerKind, NestingError, NestingStack, MAX_NESTING_DEPTH};
