//! Embedded-friendly Azure IoT device SDK: a streaming JSON reader/writer
//! plus MQTT5 topic codecs and hierarchical state machines for Azure IoT
//! Hub, DPS, and PnP (with RPC command server/invoker on top).
//!
//! This crate is a thin facade over its workspace members — it exists so
//! a caller can depend on one crate and reach the whole surface, the way
//! `rt-protocol` anchored the wire types here before it (see `DESIGN.md`).

pub use az_core as core;
pub use az_hfsm as hfsm;
pub use az_iot_protocol as iot;
pub use az_json as json;
pub use az_mqtt_topics as mqtt_topics;
pub use az_rpc_server as rpc;
