//! Shared test fixtures: golden JSON documents and RPC event builders,
//! used by this workspace's crate-level tests and the root integration
//! suite so scenarios are defined once (mirrors the role the teacher's
//! mock transport crate plays for its own integration tests).

mod documents;
mod harness;

pub use documents::{
    DPS_ASSIGNING_PAYLOAD, DPS_SUCCESS_PAYLOAD, NESTED_ROUNDTRIP_DOCUMENT,
    PNP_DESIRED_PATCH_DOCUMENT, POINTER_ESCAPED_KEY_DOCUMENT, POINTER_ESCAPED_KEY_PATH,
};
pub use harness::{
    execution_finish, incoming_publish, incoming_publish_with_properties, status_property, sub_ack,
};
