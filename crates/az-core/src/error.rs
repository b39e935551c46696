use thiserror::Error;

use crate::facility::{Facility, ResultCode};

/// Core-facility errors shared by callers that aren't specific to JSON,
/// topics, or the RPC HFSM (spec §6's `Core` facility list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("operation canceled")]
    Canceled,
    #[error("invalid argument")]
    InvalidArg,
    #[error("insufficient span size")]
    InsufficientSpanSize,
    #[error("not implemented")]
    NotImplemented,
    #[error("item not found")]
    ItemNotFound,
    #[error("unexpected character")]
    UnexpectedChar,
    #[error("end of input")]
    Eof,
    #[error("not supported")]
    NotSupported,
}

impl ResultCode for CoreError {
    fn facility(&self) -> Facility {
        Facility::Core
    }

    fn code(&self) -> u32 {
        match self {
            CoreError::Canceled => 1,
            CoreError::InvalidArg => 2,
            CoreError::InsufficientSpanSize => 3,
            CoreError::NotImplemented => 4,
            CoreError::ItemNotFound => 5,
            CoreError::UnexpectedChar => 6,
            CoreError::Eof => 7,
            CoreError::NotSupported => 8,
        }
    }
}

/// Platform-facility errors. The core never raises these itself — they're
/// surfaced to the core only when a platform shim call fails (spec §6) — but
/// the enum lives here so `az-hfsm`/`az-rpc-server` can pass them through a
/// pipeline's `Error` event without depending on a platform crate that does
/// not exist in this workspace (the platform layer is an external
/// collaborator per spec §1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("out of memory")]
    OutOfMemory,
    #[error("resource unavailable")]
    ResourceUnavailable,
    #[error("permission denied")]
    Permission,
    #[error("mutex busy")]
    MutexBusy,
    #[error("deadlock detected")]
    Deadlock,
    #[error("reinitialization")]
    Reinitialization,
}

impl ResultCode for PlatformError {
    fn facility(&self) -> Facility {
        Facility::Platform
    }

    fn code(&self) -> u32 {
        match self {
            PlatformError::OutOfMemory => 1,
            PlatformError::ResourceUnavailable => 2,
            PlatformError::Permission => 3,
            PlatformError::MutexBusy => 4,
            PlatformError::Deadlock => 5,
            PlatformError::Reinitialization => 6,
        }
    }
}
