//! Command server HFSM, grounded on
//! `original_source/sdk/src/azure/core/az_mqtt5_rpc_server_hfsm.c`'s
//! `root`/`subscribing`/`waiting` states. A single pending-command slot;
//! a second request arriving while one is in flight is rejected rather
//! than queued (Design Note: see `DESIGN.md`, "reject vs queue").
//!
//! The original's state handlers call `_az_hfsm_transition_peer` on
//! themselves mid-dispatch, which this crate's generic [`az_hfsm::Hfsm`]
//! doesn't allow (a handler only sees `&mut M`, not the `Hfsm` that owns
//! it). Handlers instead record the desired target in
//! `RpcServerMachine::pending_transition`; [`RpcServer::dispatch`] applies
//! it once the handler returns.

use az_core::CoreError;
use az_hfsm::{Event, EventData, EventKind, Hfsm, MqttUserProperties, Outcome, StateFn, StateMachine};

use crate::config::ServerConfig;
use crate::status::RpcStatus;

const CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Root,
    Subscribing,
    Waiting,
}

#[derive(Debug, Clone)]
pub struct PendingCommand {
    pub correlation_data: Vec<u8>,
    pub response_topic: String,
    pub payload: Vec<u8>,
}

pub struct RpcServerMachine {
    config: ServerConfig,
    sub_topic: String,
    pending: Option<PendingCommand>,
    pending_sub_id: Option<u16>,
    next_packet_id: u16,
    pending_transition: Option<ServerState>,
    /// Events the embedding application must actually send over the wire
    /// (subscribe/publish requests) or hand to the command implementation
    /// (`ExecuteCommand`). Drained by [`RpcServer::drain_outbound`].
    outbound: Vec<Event>,
}

impl RpcServerMachine {
    pub fn new(config: ServerConfig) -> Result<Self, az_mqtt_topics::TopicError> {
        let sub_topic = config.request_topic()?;
        Ok(RpcServerMachine {
            config,
            sub_topic,
            pending: None,
            pending_sub_id: None,
            next_packet_id: 1,
            pending_transition: None,
            outbound: Vec::new(),
        })
    }

    pub fn sub_topic(&self) -> &str {
        &self.sub_topic
    }

    pub fn pending(&self) -> Option<&PendingCommand> {
        self.pending.as_ref()
    }

    fn allocate_packet_id(&mut self) -> u16 {
        let id = self.next_packet_id;
        self.next_packet_id = self.next_packet_id.wrapping_add(1).max(1);
        id
    }

    fn push_sub_request(&mut self) {
        let id = self.allocate_packet_id();
        self.pending_sub_id = Some(id);
        self.outbound.push(Event::new(
            EventKind::SubReq,
            EventData::SubReq {
                topic: self.sub_topic.clone(),
                qos: self.config.sub_qos,
            },
        ));
    }

    fn accept_request(
        &mut self,
        correlation_data: Vec<u8>,
        response_topic: String,
        payload: Vec<u8>,
    ) {
        self.outbound.push(Event::new(
            EventKind::ExecuteCommand,
            EventData::PubRecvInd {
                topic: self.sub_topic.clone(),
                correlation_data: correlation_data.clone(),
                response_topic: Some(response_topic.clone()),
                properties: MqttUserProperties::new(),
                payload: payload.clone(),
            },
        ));
        self.pending = Some(PendingCommand {
            correlation_data,
            response_topic,
            payload,
        });
    }

    fn push_response(&mut self, pending: &PendingCommand, status: RpcStatus, payload: Vec<u8>) {
        let mut properties = MqttUserProperties::new();
        properties.insert("status".to_string(), status.code().to_string());
        properties.insert("Content-Type".to_string(), CONTENT_TYPE.to_string());
        self.outbound.push(Event::new(
            EventKind::PubReq,
            EventData::PubReq {
                topic: pending.response_topic.clone(),
                qos: self.config.response_qos,
                payload,
                correlation_data: pending.correlation_data.clone(),
                properties,
            },
        ));
    }
}

impl StateMachine for RpcServerMachine {
    type State = ServerState;

    fn initial() -> ServerState {
        ServerState::Subscribing
    }

    fn handler(state: ServerState) -> StateFn<Self> {
        match state {
            ServerState::Root => root_handler,
            ServerState::Subscribing => subscribing_handler,
            ServerState::Waiting => waiting_handler,
        }
    }

    fn parent(state: ServerState) -> Option<ServerState> {
        match state {
            ServerState::Root => None,
            ServerState::Subscribing | ServerState::Waiting => Some(ServerState::Root),
        }
    }
}

fn root_handler(m: &mut RpcServerMachine, event: &Event) -> Result<Outcome, CoreError> {
    match event.kind {
        EventKind::Entry
        | EventKind::PubAckRsp
        | EventKind::ConnectionOpenReq
        | EventKind::ConnectRsp
        | EventKind::ConnectionCloseReq => Ok(Outcome::Handled),
        EventKind::Error => {
            // Root has no superstate to bubble to; forward the error back
            // through the same outbound channel the caller already drains,
            // so it reaches the embedding application instead of being
            // silently dropped.
            m.outbound.push(event.clone());
            Ok(Outcome::Handled)
        }
        EventKind::Exit => panic!("az-rpc-server root received Exit: unreachable unless the engine is torn down improperly"),
        _ => Ok(Outcome::Bubble),
    }
}

fn subscribing_handler(m: &mut RpcServerMachine, event: &Event) -> Result<Outcome, CoreError> {
    match event.kind {
        EventKind::Entry | EventKind::Exit => Ok(Outcome::Handled),
        EventKind::SubAckRsp => {
            if let EventData::SubAck { packet_id } = &event.data {
                if m.pending_sub_id == Some(*packet_id) {
                    m.pending_transition = Some(ServerState::Waiting);
                }
            }
            Ok(Outcome::Handled)
        }
        EventKind::PubRecvInd => {
            if let EventData::PubRecvInd {
                topic,
                correlation_data,
                response_topic,
                payload,
                ..
            } = &event.data
            {
                if az_mqtt_topics::matches_filter(&m.sub_topic, topic) {
                    if let Some(response_topic) = response_topic {
                        m.accept_request(
                            correlation_data.clone(),
                            response_topic.clone(),
                            payload.clone(),
                        );
                        m.pending_transition = Some(ServerState::Waiting);
                    }
                }
            }
            Ok(Outcome::Handled)
        }
        EventKind::Timeout => {
            m.push_sub_request();
            Ok(Outcome::Handled)
        }
        EventKind::PubAckRsp | EventKind::ConnectionOpenReq | EventKind::ConnectRsp => {
            Ok(Outcome::Handled)
        }
        _ => Ok(Outcome::Bubble),
    }
}

fn waiting_handler(m: &mut RpcServerMachine, event: &Event) -> Result<Outcome, CoreError> {
    match event.kind {
        EventKind::Entry | EventKind::Exit => Ok(Outcome::Handled),
        EventKind::PubRecvInd => {
            if let EventData::PubRecvInd {
                topic,
                correlation_data,
                response_topic,
                payload,
                ..
            } = &event.data
            {
                if az_mqtt_topics::matches_filter(&m.sub_topic, topic) {
                    if m.pending.is_some() {
                        // A command is already in flight: reject rather than queue.
                        if let Some(response_topic) = response_topic {
                            tracing::warn!(
                                response_topic = %response_topic,
                                "rejecting command request, server busy"
                            );
                            let reject = PendingCommand {
                                correlation_data: correlation_data.clone(),
                                response_topic: response_topic.clone(),
                                payload: Vec::new(),
                            };
                            m.push_response(
                                &reject,
                                RpcStatus::ServerError,
                                b"Command Server busy processing another request".to_vec(),
                            );
                        }
                    } else if let Some(response_topic) = response_topic {
                        m.accept_request(
                            correlation_data.clone(),
                            response_topic.clone(),
                            payload.clone(),
                        );
                    }
                }
            }
            Ok(Outcome::Handled)
        }
        EventKind::ExecutionFinish => {
            if let EventData::ExecutionFinish { status, payload } = &event.data {
                if let Some(pending) = m.pending.take() {
                    let status = RpcStatus::from_code(*status).unwrap_or(RpcStatus::ServerError);
                    m.push_response(&pending, status, payload.clone());
                }
            }
            Ok(Outcome::Handled)
        }
        EventKind::Timeout => {
            if let Some(pending) = m.pending.take() {
                tracing::warn!(
                    response_topic = %pending.response_topic,
                    "command execution timed out"
                );
                m.push_response(
                    &pending,
                    RpcStatus::ServerError,
                    b"Command Server timeout".to_vec(),
                );
            }
            Ok(Outcome::Handled)
        }
        EventKind::SubAckRsp
        | EventKind::PubAckRsp
        | EventKind::ConnectionOpenReq
        | EventKind::ConnectRsp => Ok(Outcome::Handled),
        _ => Ok(Outcome::Bubble),
    }
}

/// Owns both the generic engine and the application state, and applies
/// transitions a handler requested via `pending_transition` after the
/// triggering dispatch returns.
pub struct RpcServer {
    hfsm: Hfsm<RpcServerMachine>,
    machine: RpcServerMachine,
}

impl RpcServer {
    pub fn new(config: ServerConfig) -> Result<Self, az_mqtt_topics::TopicError> {
        let mut machine = RpcServerMachine::new(config)?;
        machine.push_sub_request();
        Ok(RpcServer {
            hfsm: Hfsm::new(),
            machine,
        })
    }

    pub fn state(&self) -> ServerState {
        self.hfsm.current()
    }

    pub fn pending(&self) -> Option<&PendingCommand> {
        self.machine.pending()
    }

    pub fn dispatch(&mut self, event: &Event) -> Result<(), CoreError> {
        self.hfsm.dispatch(&mut self.machine, event)?;
        if let Some(target) = self.machine.pending_transition.take() {
            self.hfsm.transition(&mut self.machine, target)?;
        }
        Ok(())
    }

    /// Drains events the caller must act on: `SubReq`/`PubReq` to actually
    /// send over the transport, `ExecuteCommand` to hand to the command
    /// implementation.
    pub fn drain_outbound(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.machine.outbound)
    }
}
