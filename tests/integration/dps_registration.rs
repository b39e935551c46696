//! DPS registration flow end to end: response-topic parsing (status plus
//! an optional `retry-after` hint) combined with registration-payload
//! parsing, against the two scenarios the provisioning client must
//! distinguish — settled assignment and still-assigning-with-retry.

use az_iot_protocol::{parse_registration_payload, parse_response_topic, OperationStatus};
use az_test_support::{DPS_ASSIGNING_PAYLOAD, DPS_SUCCESS_PAYLOAD};

#[test]
fn success_payload_reports_assigned_hub_and_device() {
    let topic = parse_response_topic("$dps/registrations/res/200/?$rid=1").unwrap();
    assert_eq!(topic.status, 200);
    assert_eq!(topic.retry_after_seconds, 0);

    let response = parse_registration_payload(DPS_SUCCESS_PAYLOAD.as_bytes()).unwrap();
    assert_eq!(response.operation_status, Some(OperationStatus::Assigned));
    assert_eq!(
        response.assigned_hub_hostname,
        Some("my-iot-hub.azure-devices.net")
    );
    assert_eq!(response.device_id, Some("my-device"));
}

#[test]
fn assigning_response_carries_retry_after_on_the_topic() {
    let topic = parse_response_topic("$dps/registrations/res/202/?$rid=1&retry-after=3").unwrap();
    assert_eq!(topic.status, 202);
    assert_eq!(topic.retry_after_seconds, 3);

    let response = parse_registration_payload(DPS_ASSIGNING_PAYLOAD.as_bytes()).unwrap();
    assert_eq!(response.operation_status, Some(OperationStatus::Assigning));
    assert!(response.assigned_hub_hostname.is_none());
}
