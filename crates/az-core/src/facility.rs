//! The facility/code result taxonomy shared across the workspace (spec §6/§7).
//!
//! Each crate defines its own error enum (mirroring the teacher's one
//! `DbError`/`UplinkError` per module convention) rather than funneling every
//! failure through one giant enum. `ResultCode` lets a caller holding any of
//! those concrete errors still classify it into the abstract facility/code
//! pair the original SDK's `az_result` packs into a single 32-bit value.

use std::fmt;

/// One of the result facilities named in spec §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facility {
    Core,
    Platform,
    Json,
    Http,
    Mqtt,
    Iot,
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facility::Core => "core",
            Facility::Platform => "platform",
            Facility::Json => "json",
            Facility::Http => "http",
            Facility::Mqtt => "mqtt",
            Facility::Iot => "iot",
        };
        f.write_str(name)
    }
}

/// Implemented by every crate's error enum so it can report where it sits in
/// the facility/code taxonomy without the crates sharing one error type.
pub trait ResultCode {
    fn facility(&self) -> Facility;
    /// A small, stable, per-variant code. Not guaranteed to match the
    /// original SDK's numeric values — only the facility grouping is part of
    /// the contract described by spec §6.
    fn code(&self) -> u32;

    fn failed(&self) -> bool {
        true
    }
}
