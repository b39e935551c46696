//! RPC response status codes, shared by the command server and the
//! invoker/client. Modeled on HTTP status semantics (spec §4.7) rather
//! than MQTT reason codes — the wire format already carries these as a
//! plain decimal user property, not a CONNACK-style reason byte.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcStatus {
    Ok = 200,
    BadRequest = 400,
    NotFound = 404,
    Timeout = 408,
    ServerError = 500,
}

impl RpcStatus {
    pub const fn code(self) -> u16 {
        self as u16
    }

    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            200 => Some(RpcStatus::Ok),
            400 => Some(RpcStatus::BadRequest),
            404 => Some(RpcStatus::NotFound),
            408 => Some(RpcStatus::Timeout),
            500 => Some(RpcStatus::ServerError),
            _ => None,
        }
    }

    pub const fn is_failed(self) -> bool {
        !matches!(self, RpcStatus::Ok)
    }
}

/// `true` for any code that isn't `200`, including codes this crate
/// doesn't otherwise recognize (an invoker should treat an unknown code
/// as a failure rather than silently succeeding).
pub fn status_failed(code: u16) -> bool {
    code != RpcStatus::Ok.code()
}
