//! Device Provisioning Service registration topics and payloads, ported
//! from `original_source/sdk/iot/provisioning/src/az_iot_provisioning_client.c`.

use az_json::{JsonTokenKind, Reader, Writer};

use crate::error::ProtocolError;
use crate::hub::find_query_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    Assigning,
    Assigned,
    Failed,
    Unassigned,
    Disabled,
}

impl OperationStatus {
    fn from_text(text: &str) -> Result<Self, ProtocolError> {
        match text {
            "assigning" => Ok(OperationStatus::Assigning),
            "assigned" => Ok(OperationStatus::Assigned),
            "failed" => Ok(OperationStatus::Failed),
            "unassigned" => Ok(OperationStatus::Unassigned),
            "disabled" => Ok(OperationStatus::Disabled),
            _ => Err(ProtocolError::UnexpectedChar),
        }
    }
}

/// `$dps/registrations/res/#`
pub const fn register_subscribe_topic() -> &'static str {
    "$dps/registrations/res/#"
}

/// `$dps/registrations/PUT/iotdps-register/?$rid=1`
pub const fn register_publish_topic() -> &'static str {
    "$dps/registrations/PUT/iotdps-register/?$rid=1"
}

/// `$dps/registrations/GET/iotdps-get-operationstatus/?$rid=1&operationId={operation_id}`
pub fn query_publish_topic(operation_id: &str) -> String {
    format!("$dps/registrations/GET/iotdps-get-operationstatus/?$rid=1&operationId={operation_id}")
}

/// The status/`retry-after=` portion of a `$dps/registrations/res/{status}/?$rid=1[&retry-after=N]`
/// response topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpsResponseTopic {
    pub status: u16,
    pub retry_after_seconds: u32,
}

pub fn parse_response_topic(topic: &str) -> Result<DpsResponseTopic, ProtocolError> {
    let rest = topic
        .strip_prefix("$dps/registrations/res/")
        .ok_or(ProtocolError::TopicNoMatch)?;
    let (status_str, query) = rest.split_once('/').ok_or(ProtocolError::TopicNoMatch)?;
    let status: u16 = status_str
        .parse()
        .map_err(|_| ProtocolError::TopicNoMatch)?;
    let query = query.strip_prefix('?').unwrap_or(query);
    let retry_after_seconds = find_query_value(query, "retry-after")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    Ok(DpsResponseTopic {
        status,
        retry_after_seconds,
    })
}

/// The parsed body of a DPS registration status payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpsRegisterResponse<'a> {
    pub operation_id: Option<&'a str>,
    pub operation_status: Option<OperationStatus>,
    pub assigned_hub_hostname: Option<&'a str>,
    pub device_id: Option<&'a str>,
    pub error_message_from_state: Option<&'a str>,
    pub last_updated_time_utc: Option<&'a str>,
    pub error_code: Option<u32>,
    pub error_tracking_id: Option<&'a str>,
    pub error_message: Option<&'a str>,
    pub error_timestamp: Option<&'a str>,
}

/// Parses the DPS registration status payload: top-level `operationId`,
/// `status`, `errorCode`, `trackingId`, `message`, `timestampUtc`, plus the
/// nested `registrationState` object's `assignedHub`, `deviceId`,
/// `errorMessage`, `lastUpdatedDateTimeUtc`.
///
/// If `operationId`+`status` aren't both present and no `errorCode` was
/// found either, this is `ItemNotFound`; if `errorCode` was found but
/// `status` wasn't, `operation_status` falls back to `Failed` rather than
/// erroring (ported from `_az_iot_provisioning_client_parse_payload`).
pub fn parse_registration_payload(payload: &[u8]) -> Result<DpsRegisterResponse<'_>, ProtocolError> {
    let mut reader = Reader::new(payload);
    if reader.next_token()? != JsonTokenKind::BeginObject {
        return Err(ProtocolError::UnexpectedChar);
    }

    let mut operation_id = None;
    let mut status_text: Option<&str> = None;
    let mut assigned_hub_hostname = None;
    let mut device_id = None;
    let mut error_message_from_state = None;
    let mut last_updated_time_utc = None;
    let mut error_code = None;
    let mut error_tracking_id = None;
    let mut error_message = None;
    let mut error_timestamp = None;

    loop {
        match reader.next_token()? {
            JsonTokenKind::EndObject => break,
            JsonTokenKind::PropertyName => {
                let name = std::str::from_utf8(reader.current().slice)
                    .map_err(|_| ProtocolError::UnexpectedChar)?;
                match name {
                    "operationId" => {
                        reader.next_token()?;
                        operation_id = Some(as_str(&reader)?);
                    }
                    "status" => {
                        reader.next_token()?;
                        status_text = Some(as_str(&reader)?);
                    }
                    "errorCode" => {
                        reader.next_token()?;
                        error_code = Some(
                            az_json::numbers::as_u64(reader.current().slice)
                                .map_err(|_| ProtocolError::UnexpectedChar)? as u32,
                        );
                    }
                    "trackingId" => {
                        reader.next_token()?;
                        error_tracking_id = Some(as_str(&reader)?);
                    }
                    "message" => {
                        reader.next_token()?;
                        error_message = Some(as_str(&reader)?);
                    }
                    "timestampUtc" => {
                        reader.next_token()?;
                        error_timestamp = Some(as_str(&reader)?);
                    }
                    "registrationState" => {
                        let kind = reader.next_token()?;
                        if kind == JsonTokenKind::BeginObject {
                            parse_registration_state(
                                &mut reader,
                                &mut assigned_hub_hostname,
                                &mut device_id,
                                &mut error_message_from_state,
                                &mut last_updated_time_utc,
                            )?;
                        }
                    }
                    _ => {
                        let kind = reader.next_token()?;
                        if kind.is_container_start() {
                            reader.skip_children()?;
                        }
                    }
                }
            }
            _ => return Err(ProtocolError::UnexpectedChar),
        }
    }

    let operation_status = match status_text {
        Some(text) => Some(OperationStatus::from_text(text)?),
        None if error_code.is_some() => Some(OperationStatus::Failed),
        None => None,
    };

    if (operation_id.is_none() || status_text.is_none()) && error_code.is_none() {
        return Err(ProtocolError::ItemNotFound);
    }

    Ok(DpsRegisterResponse {
        operation_id,
        operation_status,
        assigned_hub_hostname,
        device_id,
        error_message_from_state,
        last_updated_time_utc,
        error_code: error_code.map(|code| code / 1000),
        error_tracking_id,
        error_message,
        error_timestamp,
    })
}

fn parse_registration_state<'a>(
    reader: &mut Reader<'a>,
    assigned_hub_hostname: &mut Option<&'a str>,
    device_id: &mut Option<&'a str>,
    error_message_from_state: &mut Option<&'a str>,
    last_updated_time_utc: &mut Option<&'a str>,
) -> Result<(), ProtocolError> {
    loop {
        match reader.next_token()? {
            JsonTokenKind::EndObject => return Ok(()),
            JsonTokenKind::PropertyName => {
                let name = std::str::from_utf8(reader.current().slice)
                    .map_err(|_| ProtocolError::UnexpectedChar)?;
                match name {
                    "assignedHub" => {
                        reader.next_token()?;
                        *assigned_hub_hostname = Some(as_str(reader)?);
                    }
                    "deviceId" => {
                        reader.next_token()?;
                        *device_id = Some(as_str(reader)?);
                    }
                    "errorMessage" => {
                        reader.next_token()?;
                        *error_message_from_state = Some(as_str(reader)?);
                    }
                    "lastUpdatedDateTimeUtc" => {
                        reader.next_token()?;
                        *last_updated_time_utc = Some(as_str(reader)?);
                    }
                    _ => {
                        let kind = reader.next_token()?;
                        if kind.is_container_start() {
                            reader.skip_children()?;
                        }
                    }
                }
            }
            _ => return Err(ProtocolError::UnexpectedChar),
        }
    }
}

fn as_str<'a>(reader: &Reader<'a>) -> Result<&'a str, ProtocolError> {
    std::str::from_utf8(reader.current().slice).map_err(|_| ProtocolError::UnexpectedChar)
}

/// Builds the DPS registration PUT body: `{"registrationId":"<id>"[,"payload":<raw>]}`.
/// `custom_payload`, if supplied, must already be valid JSON text; it is
/// embedded verbatim (the outbound counterpart to [`parse_registration_payload`]).
pub fn build_registration_payload<'a>(
    registration_id: &str,
    custom_payload: Option<&str>,
    destination: &'a mut [u8],
) -> Result<&'a [u8], ProtocolError> {
    let mut writer = Writer::new(destination);
    writer.begin_object().map_err(map_json_err)?;
    writer.property_name("registrationId").map_err(map_json_err)?;
    writer.string(registration_id).map_err(map_json_err)?;
    if let Some(payload) = custom_payload {
        writer.property_name("payload").map_err(map_json_err)?;
        writer.raw_value(payload).map_err(map_json_err)?;
    }
    writer.end_object().map_err(map_json_err)?;
    Ok(writer.get_written())
}

fn map_json_err(err: az_json::JsonError) -> ProtocolError {
    if err == az_json::JsonError::InsufficientSpanSize {
        ProtocolError::InsufficientSpanSize
    } else {
        ProtocolError::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dps_success_payload_scenario() {
        let topic = parse_response_topic("$dps/registrations/res/200/?$rid=1").unwrap();
        assert_eq!(topic.status, 200);
        assert_eq!(topic.retry_after_seconds, 0);

        let payload = br#"{"operationId":"abc","status":"assigned","registrationState":{"assignedHub":"h.example","deviceId":"d1"}}"#;
        let parsed = parse_registration_payload(payload).unwrap();
        assert_eq!(parsed.operation_id, Some("abc"));
        assert_eq!(parsed.operation_status, Some(OperationStatus::Assigned));
        assert_eq!(parsed.assigned_hub_hostname, Some("h.example"));
        assert_eq!(parsed.device_id, Some("d1"));
    }

    #[test]
    fn dps_assigning_with_retry_scenario() {
        let topic =
            parse_response_topic("$dps/registrations/res/202/?$rid=1&retry-after=3").unwrap();
        assert_eq!(topic.status, 202);
        assert_eq!(topic.retry_after_seconds, 3);

        let payload = br#"{"operationId":"abc","status":"assigning"}"#;
        let parsed = parse_registration_payload(payload).unwrap();
        assert_eq!(parsed.operation_status, Some(OperationStatus::Assigning));
    }

    #[test]
    fn error_code_without_status_falls_back_to_failed() {
        let payload = br#"{"errorCode":42000,"trackingId":"t1","message":"boom"}"#;
        let parsed = parse_registration_payload(payload).unwrap();
        assert_eq!(parsed.operation_status, Some(OperationStatus::Failed));
        assert_eq!(parsed.error_code, Some(42));
        assert_eq!(parsed.error_tracking_id, Some("t1"));
    }

    #[test]
    fn missing_everything_is_item_not_found() {
        let payload = br#"{"unrelated":1}"#;
        assert_eq!(
            parse_registration_payload(payload),
            Err(ProtocolError::ItemNotFound)
        );
    }

    #[test]
    fn builds_registration_payload_with_custom_body() {
        let mut buf = [0u8; 128];
        let written =
            build_registration_payload("reg-1", Some(r#"{"model":"thermostat"}"#), &mut buf)
                .unwrap();
        assert_eq!(
            written,
            br#"{"registrationId":"reg-1","payload":{"model":"thermostat"}}"#
        );
    }
}
