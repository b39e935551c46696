//! Event types dispatched through an [`crate::state::Hfsm`] and
//! [`crate::pipeline::Pipeline`]. Reserved kinds come straight from
//! `original_source/sdk/src/azure/core/az_mqtt5_rpc_server_hfsm.c`'s event
//! constants; `EventData` replaces the original's `void*` payload with a
//! tagged enum (Design Note 9.3: no untyped pointers in the Rust port).

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Entering a state (fired by the engine during a transition).
    Entry,
    /// Leaving a state (fired by the engine during a transition).
    Exit,
    /// A transport or application error that bubbles toward root.
    Error,
    /// A timer this state armed has fired.
    Timeout,
    ConnectRsp,
    SubAckRsp,
    PubAckRsp,
    PubRecvInd,
    SubReq,
    PubReq,
    ExecuteCommand,
    ExecutionFinish,
    /// Transport/application lifecycle events not otherwise listed here
    /// (e.g. connection open/close requests). Carries no data.
    ConnectionOpenReq,
    ConnectionCloseReq,
}

/// A bag of MQTT5 user properties, carried on publish-shaped events.
pub type MqttUserProperties = HashMap<String, String>;

/// The payload for an [`EventKind`]. One variant per kind that actually
/// carries data; lifecycle/entry/exit events carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventData {
    #[default]
    None,
    SubAck {
        packet_id: u16,
    },
    PubAck {
        packet_id: u16,
    },
    PubRecvInd {
        topic: String,
        correlation_data: Vec<u8>,
        response_topic: Option<String>,
        properties: MqttUserProperties,
        payload: Vec<u8>,
    },
    SubReq {
        topic: String,
        qos: u8,
    },
    PubReq {
        topic: String,
        qos: u8,
        payload: Vec<u8>,
        correlation_data: Vec<u8>,
        properties: MqttUserProperties,
    },
    ExecutionFinish {
        status: u16,
        payload: Vec<u8>,
    },
    Error {
        message: String,
        canceled: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub data: EventData,
}

impl Event {
    pub const fn new(kind: EventKind, data: EventData) -> Self {
        Event { kind, data }
    }

    pub const fn entry() -> Self {
        Event {
            kind: EventKind::Entry,
            data: EventData::None,
        }
    }

    pub const fn exit() -> Self {
        Event {
            kind: EventKind::Exit,
            data: EventData::None,
        }
    }

    pub const fn timeout() -> Self {
        Event {
            kind: EventKind::Timeout,
            data: EventData::None,
        }
    }
}
