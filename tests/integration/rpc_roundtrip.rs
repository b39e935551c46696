//! A full RPC round trip driven across two independent HFSMs: an invoker
//! publishes a command, the request topic from the invoker matches the
//! topic the server subscribed to, and the server's response finds its
//! way back to a completed invocation on the invoker side. Nothing here
//! touches a real transport — the test wires the two machines' outbound
//! events to each other directly, the way an embedding application would
//! wire them to an MQTT client.

use az_hfsm::{Event, EventData, EventKind};
use az_rpc_server::{InvokerConfig, RpcInvoker, RpcServer, ServerConfig};

#[test]
fn unlock_command_round_trips_through_both_machines() {
    let mut server = RpcServer::new(ServerConfig::new("v1", "car7", "unlock")).unwrap();
    let sub_request = server.drain_outbound();
    assert_eq!(sub_request.len(), 1);
    server
        .dispatch(&Event::new(
            EventKind::SubAckRsp,
            EventData::SubAck { packet_id: 1 },
        ))
        .unwrap();
    assert_eq!(server.sub_topic(), "vehicles/v1/commands/car7/unlock");

    let mut invoker: RpcInvoker<4> = RpcInvoker::new(InvokerConfig::new("v1", "fleet-app-1")).unwrap();
    invoker
        .dispatch(&Event::new(EventKind::ConnectRsp, EventData::None))
        .unwrap();
    invoker.drain_outbound();
    invoker
        .dispatch(&Event::new(
            EventKind::SubAckRsp,
            EventData::SubAck { packet_id: 1 },
        ))
        .unwrap();

    invoker.invoke("car7", "unlock", b"{\"doors\":\"all\"}".to_vec()).unwrap();
    let request = invoker.drain_outbound();
    assert_eq!(request.len(), 1);
    let (request_topic, correlation_data, request_payload) = match &request[0].data {
        EventData::PubReq {
            topic,
            correlation_data,
            payload,
            ..
        } => (topic.clone(), correlation_data.clone(), payload.clone()),
        other => panic!("expected PubReq, got {other:?}"),
    };
    assert_eq!(request_topic, "vehicles/v1/commands/car7/unlock");

    server
        .dispatch(&Event::new(
            EventKind::PubRecvInd,
            EventData::PubRecvInd {
                topic: request_topic,
                correlation_data: correlation_data.clone(),
                response_topic: Some(invoker.response_topic().to_string()),
                properties: Default::default(),
                payload: request_payload,
            },
        ))
        .unwrap();
    let server_side = server.drain_outbound();
    assert_eq!(server_side.len(), 1);
    assert!(matches!(server_side[0].kind, EventKind::ExecuteCommand));
    assert!(server.pending().is_some());

    server
        .dispatch(&Event::new(
            EventKind::ExecutionFinish,
            EventData::ExecutionFinish {
                status: 200,
                payload: b"{\"unlocked\":true}".to_vec(),
            },
        ))
        .unwrap();
    let response = server.drain_outbound();
    assert_eq!(response.len(), 1);
    let (response_topic, response_properties, response_payload) = match &response[0].data {
        EventData::PubReq {
            topic,
            properties,
            payload,
            ..
        } => (topic.clone(), properties.clone(), payload.clone()),
        other => panic!("expected PubReq, got {other:?}"),
    };
    assert_eq!(response_topic, invoker.response_topic());
    assert!(server.pending().is_none());

    invoker
        .dispatch(&Event::new(
            EventKind::PubRecvInd,
            EventData::PubRecvInd {
                topic: response_topic,
                correlation_data,
                response_topic: None,
                properties: response_properties,
                payload: response_payload,
            },
        ))
        .unwrap();
    let completed = invoker.take_completed();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].1.status.code(), 200);
    assert_eq!(completed[0].1.payload, b"{\"unlocked\":true}");
}

#[test]
fn timeout_while_waiting_for_execution_yields_server_error_response() {
    let mut server = RpcServer::new(ServerConfig::new("v1", "car7", "unlock")).unwrap();
    server.drain_outbound();
    server
        .dispatch(&Event::new(
            EventKind::SubAckRsp,
            EventData::SubAck { packet_id: 1 },
        ))
        .unwrap();
    server
        .dispatch(&Event::new(
            EventKind::PubRecvInd,
            EventData::PubRecvInd {
                topic: server.sub_topic().to_string(),
                correlation_data: vec![1, 2, 3],
                response_topic: Some("vehicles/v1/responses/fleet-app-1".to_string()),
                properties: Default::default(),
                payload: b"{}".to_vec(),
            },
        ))
        .unwrap();
    server.drain_outbound();

    server.dispatch(&Event::timeout()).unwrap();
    let response = server.drain_outbound();
    match &response[0].data {
        EventData::PubReq { payload, properties, .. } => {
            assert_eq!(payload, b"Command Server timeout");
            assert_eq!(properties.get("status"), Some(&"500".to_string()));
        }
        other => panic!("expected PubReq, got {other:?}"),
    }
}
