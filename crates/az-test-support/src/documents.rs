//! Golden JSON documents shared by `az-json`/`az-iot-protocol` tests and
//! the root integration suite, so a scenario (e.g. the spec's nested
//! roundtrip example) is written down once rather than copy-pasted
//! across crates.

/// `{ "a" : [ true, { "b": [{}]}, 15 ] }` — the literal nesting/whitespace
/// example used to exercise reader/writer roundtripping.
pub const NESTED_ROUNDTRIP_DOCUMENT: &str = r#"{ "a" : [ true, { "b": [{}]}, 15 ] }"#;

/// The document used to demonstrate JSON Pointer resolution through a
/// key containing an escaped `/`.
pub const POINTER_ESCAPED_KEY_DOCUMENT: &str =
    r#"{"responses":{"2/00":{"body":{"hasLegalHold":false}}}}"#;
pub const POINTER_ESCAPED_KEY_PATH: &str = "/responses/2~100/body/hasLegalHold";

/// A DPS registration response payload reporting successful assignment.
pub const DPS_SUCCESS_PAYLOAD: &str = r#"{
    "operationId": "4.550cb20c17216c67.55041d0e-eb23-4a42-9172-2ac73d93a65f",
    "status": "assigned",
    "registrationState": {
        "x509": {},
        "registrationId": "my-device",
        "createdDateTimeUtc": "2021-01-01T00:00:00.0000000Z",
        "assignedHub": "my-iot-hub.azure-devices.net",
        "deviceId": "my-device",
        "status": "assigned",
        "substatus": "initialAssignment",
        "lastUpdatedDateTimeUtc": "2021-01-01T00:00:01.0000000Z",
        "etag": "IjYyMDA5ZTkwLTAwMDAtMDEwMC0wMDAwLTYwZTk4ZTQwMDAwMCI="
    }
}"#;

/// A DPS response reporting that assignment is still in progress, with a
/// `retry-after` hint expected on the topic rather than the payload.
pub const DPS_ASSIGNING_PAYLOAD: &str = r#"{
    "operationId": "4.550cb20c17216c67.55041d0e-eb23-4a42-9172-2ac73d93a65f",
    "status": "assigning"
}"#;

/// A flat PnP desired-properties patch touching one component (`sensor`)
/// and one root-level writable property (`targetTemperature`).
pub const PNP_DESIRED_PATCH_DOCUMENT: &str = r#"{
    "sensor": {
        "__t": "c",
        "brightness": 80
    },
    "targetTemperature": 21,
    "$version": 4
}"#;
