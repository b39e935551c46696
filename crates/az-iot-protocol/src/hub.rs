//! IoT Hub C2D, Direct Methods, and Device Twin topics, ported from
//! `original_source/sdk/iot/hub/src/az_iot_hub_client_methods.c` (Methods)
//! and the Device Twin usage demonstrated in
//! `original_source/sdk/iot/hub/samples/twin/src/paho_iot_hub_twin_example.c`.

use crate::error::ProtocolError;

/// A parsed Direct Method invocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodRequest<'a> {
    pub request_id: &'a str,
    pub method_name: &'a str,
    pub payload: &'a [u8],
}

/// A parsed Device Twin response or desired-properties push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwinResponse<'a> {
    pub response_type: TwinResponseType,
    pub request_id: Option<&'a str>,
    pub status: Option<u16>,
    pub version: Option<i64>,
    pub payload: &'a [u8],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwinResponseType {
    Get,
    ReportedAck,
    DesiredPatch,
}

const C2D_SUB_SUFFIX: &str = "#";

/// `devices/{device_id}/messages/devicebound/#`
pub fn c2d_subscribe_topic(device_id: &str) -> String {
    format!("devices/{device_id}/messages/devicebound/{C2D_SUB_SUFFIX}")
}

/// `devices/{device_id}/messages/events/` plus an optional URL-encoded
/// property bag suffix (supplemented from the original hub client family;
/// not in spec.md's distilled topic table, which covers C2D/Methods/Twin
/// only).
pub fn telemetry_publish_topic(device_id: &str, properties: &[(&str, &str)]) -> String {
    let mut topic = format!("devices/{device_id}/messages/events/");
    for (i, (key, value)) in properties.iter().enumerate() {
        topic.push(if i == 0 { '?' } else { '&' });
        url_encode_into(&mut topic, key);
        topic.push('=');
        url_encode_into(&mut topic, value);
    }
    topic
}

fn url_encode_into(out: &mut String, value: &str) {
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
}

/// `$iothub/methods/POST/#`
pub const fn methods_subscribe_topic() -> &'static str {
    "$iothub/methods/POST/#"
}

/// `$iothub/methods/res/{status}/?$rid={request_id}`
pub fn methods_response_topic(status: u16, request_id: &str) -> String {
    format!("$iothub/methods/res/{status}/?$rid={request_id}")
}

/// Parses `$iothub/methods/POST/{method_name}/?$rid={request_id}`.
pub fn parse_method_request<'a>(
    topic: &'a str,
    payload: &'a [u8],
) -> Result<MethodRequest<'a>, ProtocolError> {
    let rest = topic
        .strip_prefix("$iothub/methods/POST/")
        .ok_or(ProtocolError::TopicNoMatch)?;
    let (method_name, query) = rest.split_once("/?$rid=").ok_or(ProtocolError::TopicNoMatch)?;
    if method_name.is_empty() || query.is_empty() {
        return Err(ProtocolError::TopicNoMatch);
    }
    Ok(MethodRequest {
        request_id: query,
        method_name,
        payload,
    })
}

/// `$iothub/twin/res/#`
pub const fn twin_response_subscribe_topic() -> &'static str {
    "$iothub/twin/res/#"
}

/// `$iothub/twin/PATCH/properties/desired/#`
pub const fn twin_desired_subscribe_topic() -> &'static str {
    "$iothub/twin/PATCH/properties/desired/#"
}

/// `$iothub/twin/GET/?$rid={request_id}`
pub fn twin_get_publish_topic(request_id: &str) -> String {
    format!("$iothub/twin/GET/?$rid={request_id}")
}

/// `$iothub/twin/PATCH/properties/reported/?$rid={request_id}`
pub fn twin_patch_reported_publish_topic(request_id: &str) -> String {
    format!("$iothub/twin/PATCH/properties/reported/?$rid={request_id}")
}

/// Parses either a `$iothub/twin/res/{status}/?$rid={id}[&$version={v}]`
/// response or an unsolicited `$iothub/twin/PATCH/properties/desired/?$version={v}`
/// push.
///
/// A GET response and a reported-properties-patch ack share the exact same
/// `$iothub/twin/res/...` topic shape, so the wire alone can't tell them
/// apart — the caller must track which kind of request it sent under
/// `request_id` and pass it as `reported_patch_request_id` when that's the
/// one outstanding. `None` (or a non-matching id) is read as a GET ack.
pub fn parse_twin_topic<'a>(
    topic: &'a str,
    payload: &'a [u8],
    reported_patch_request_id: Option<&str>,
) -> Result<TwinResponse<'a>, ProtocolError> {
    if let Some(rest) = topic.strip_prefix("$iothub/twin/res/") {
        let (status_str, query) = rest.split_once("/?").ok_or(ProtocolError::TopicNoMatch)?;
        let status: u16 = status_str
            .parse()
            .map_err(|_| ProtocolError::TopicNoMatch)?;
        let request_id = find_query_value(query, "$rid");
        let version = find_query_value(query, "$version").and_then(|v| v.parse().ok());
        let response_type = match request_id {
            Some(id) if Some(id) == reported_patch_request_id => TwinResponseType::ReportedAck,
            _ => TwinResponseType::Get,
        };
        return Ok(TwinResponse {
            response_type,
            request_id,
            status: Some(status),
            version,
            payload,
        });
    }
    if let Some(rest) = topic.strip_prefix("$iothub/twin/PATCH/properties/desired/?") {
        let version = find_query_value(rest, "$version").and_then(|v| v.parse().ok());
        return Ok(TwinResponse {
            response_type: TwinResponseType::DesiredPatch,
            request_id: None,
            status: None,
            version,
            payload,
        });
    }
    Err(ProtocolError::TopicNoMatch)
}

/// Finds `key=value` in an `&`-delimited query string, stopping each value
/// at the next `&`.
pub(crate) fn find_query_value<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix(key).and_then(|v| v.strip_prefix('=')) {
            return Some(value);
        }
    }
    None
}
