//! SAS token resource-string construction. Stops short of signing: the
//! HMAC-SHA256 step stays external per the crypto-primitives exclusion, but
//! building the resource URI the caller hands to that external routine is
//! in scope (supplemented from the original hub client family).

/// `{hostname}/devices/{device_id}` — the resource URI a caller
/// URL-encodes and signs to produce a SAS token.
pub fn device_resource_uri(hostname: &str, device_id: &str) -> String {
    format!("{hostname}/devices/{device_id}")
}
