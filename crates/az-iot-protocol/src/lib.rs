//! IoT Hub, DPS, and PnP topic/payload codecs (spec §4.5), layered on
//! `az-json` for payload parsing/construction. `az-rpc-server` reuses this
//! crate's response-building conventions for its own topic set.

mod dps;
mod error;
mod hub;
mod pnp;
mod sas;

pub use dps::{
    build_registration_payload, parse_registration_payload, parse_response_topic,
    query_publish_topic, register_publish_topic, register_subscribe_topic, DpsRegisterResponse,
    DpsResponseTopic, OperationStatus,
};
pub use error::ProtocolError;
pub use hub::{
    c2d_subscribe_topic, methods_response_topic, methods_subscribe_topic, parse_method_request,
    parse_twin_topic, telemetry_publish_topic, twin_desired_subscribe_topic,
    twin_get_publish_topic, twin_patch_reported_publish_topic, twin_response_subscribe_topic,
    MethodRequest, TwinResponse, TwinResponseType,
};
pub use pnp::{
    write_component_envelope, write_property_ack, ComponentProperty, ComponentPropertyReader,
};
pub use sas::device_resource_uri;
