//! Builders for the synthetic events an RPC server/invoker test needs to
//! feed into `az_hfsm::Hfsm::dispatch` without hand-assembling
//! `Event`/`EventData` at every call site.

use std::collections::HashMap;

use az_hfsm::{Event, EventData, EventKind, MqttUserProperties};

pub fn sub_ack(packet_id: u16) -> Event {
    Event::new(EventKind::SubAckRsp, EventData::SubAck { packet_id })
}

pub fn incoming_publish(
    topic: impl Into<String>,
    correlation_data: Vec<u8>,
    response_topic: Option<String>,
    payload: Vec<u8>,
) -> Event {
    Event::new(
        EventKind::PubRecvInd,
        EventData::PubRecvInd {
            topic: topic.into(),
            correlation_data,
            response_topic,
            properties: MqttUserProperties::new(),
            payload,
        },
    )
}

pub fn incoming_publish_with_properties(
    topic: impl Into<String>,
    correlation_data: Vec<u8>,
    properties: HashMap<String, String>,
    payload: Vec<u8>,
) -> Event {
    Event::new(
        EventKind::PubRecvInd,
        EventData::PubRecvInd {
            topic: topic.into(),
            correlation_data,
            response_topic: None,
            properties,
            payload,
        },
    )
}

pub fn execution_finish(status: u16, payload: Vec<u8>) -> Event {
    Event::new(EventKind::ExecutionFinish, EventData::ExecutionFinish { status, payload })
}

/// A property bag with a single `status` user property, as carried on an
/// RPC response publish.
pub fn status_property(status: u16) -> HashMap<String, String> {
    let mut properties = HashMap::new();
    properties.insert("status".to_string(), status.to_string());
    properties
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_ack_carries_the_given_packet_id() {
        match sub_ack(7).data {
            EventData::SubAck { packet_id } => assert_eq!(packet_id, 7),
            other => panic!("expected SubAck, got {other:?}"),
        }
    }

    #[test]
    fn status_property_formats_as_decimal() {
        assert_eq!(status_property(404).get("status"), Some(&"404".to_string()));
    }
}
