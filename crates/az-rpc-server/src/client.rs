//! RPC invoker/client HFSM (supplemented — no original-source C counterpart
//! shipped in this pack, since the original only includes the server side).
//! Grounded on the same `root`/leaf-state shape as [`crate::server`], with a
//! fixed-capacity in-flight-request table instead of the server's single
//! pending-command slot, since an invoker may have several outstanding
//! commands to distinct executors at once.

use std::collections::HashMap;

use az_core::CoreError;
use az_hfsm::{Event, EventData, EventKind, Hfsm, MqttUserProperties, Outcome, StateFn, StateMachine};
use az_mqtt_topics::TopicValues;

use crate::config::REQUEST_TOPIC_FORMAT;
use crate::status::RpcStatus;

/// `vehicles/{modelId}/responses/{invokerClientId}` — matches the shape
/// used by `crate::config::REQUEST_TOPIC_FORMAT` but routed by invoker
/// rather than executor, since multiple executors answer one invoker.
pub const RESPONSE_TOPIC_FORMAT: &str = "vehicles/{modelId}/responses/{senderId}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Root,
    Idle,
    Subscribing,
    Ready,
}

#[derive(Debug, Clone)]
pub struct PendingInvocation {
    pub executor_id: String,
    pub command_name: String,
    pub correlation_data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct InvocationResult {
    pub status: RpcStatus,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct InvokerConfig {
    pub model_id: String,
    pub invoker_client_id: String,
    pub request_qos: u8,
}

impl InvokerConfig {
    pub fn new(model_id: impl Into<String>, invoker_client_id: impl Into<String>) -> Self {
        InvokerConfig {
            model_id: model_id.into(),
            invoker_client_id: invoker_client_id.into(),
            request_qos: 1,
        }
    }

    fn response_topic(&self) -> Result<String, az_mqtt_topics::TopicError> {
        az_mqtt_topics::format(
            RESPONSE_TOPIC_FORMAT,
            &TopicValues {
                model_id: Some(&self.model_id),
                sender_id: Some(&self.invoker_client_id),
                ..Default::default()
            },
        )
    }
}

pub struct InvokerMachine<const N: usize> {
    config: InvokerConfig,
    response_topic: String,
    pending_sub_id: Option<u16>,
    next_packet_id: u16,
    in_flight: [Option<PendingInvocation>; N],
    pending_transition: Option<ClientState>,
    outbound: Vec<Event>,
    completed: Vec<(PendingInvocation, InvocationResult)>,
}

impl<const N: usize> InvokerMachine<N> {
    pub fn new(config: InvokerConfig) -> Result<Self, az_mqtt_topics::TopicError> {
        let response_topic = config.response_topic()?;
        Ok(InvokerMachine {
            config,
            response_topic,
            pending_sub_id: None,
            next_packet_id: 1,
            in_flight: std::array::from_fn(|_| None),
            pending_transition: None,
            outbound: Vec::new(),
            completed: Vec::new(),
        })
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
                topic: self.response_topic.clone(),
                qos: 1,
            },
        ));
    }

    /// Publishes a command request. Fails with
    /// [`crate::error::RpcError::InFlightTableFull`] if every slot is
    /// occupied, or [`crate::error::RpcError::NotReady`] before the
    /// invoker has confirmed its response-topic subscription.
    pub fn invoke(
        &mut self,
        ready: bool,
        executor_id: &str,
        command_name: &str,
        payload: Vec<u8>,
    ) -> Result<(), crate::error::RpcError> {
        if !ready {
            return Err(crate::error::RpcError::NotReady);
        }
        let slot = self.in_flight.iter().position(|slot| slot.is_none()).ok_or_else(|| {
            tracing::warn!(executor_id, command_name, "in-flight table full, rejecting invocation");
            crate::error::RpcError::InFlightTableFull
        })?;

        let correlation_data = (slot as u32).to_be_bytes().to_vec();
        let topic = az_mqtt_topics::format(
            REQUEST_TOPIC_FORMAT,
            &TopicValues {
                model_id: Some(&self.config.model_id),
                executor_id: Some(executor_id),
                command_name: Some(command_name),
                ..Default::default()
            },
        )?;

        let mut properties = MqttUserProperties::new();
        properties.insert("Content-Type".to_string(), "application/json".to_string());

        self.in_flight[slot] = Some(PendingInvocation {
            executor_id: executor_id.to_string(),
            command_name: command_name.to_string(),
            correlation_data: correlation_data.clone(),
        });

        self.outbound.push(Event::new(
            EventKind::PubReq,
            EventData::PubReq {
                topic,
                qos: self.config.request_qos,
                payload,
                correlation_data,
                properties,
            },
        ));
        Ok(())
    }

    fn complete(&mut self, correlation_data: &[u8], result: InvocationResult) {
        if let Some(slot) = self.in_flight.iter_mut().find(|slot| {
            slot.as_ref()
                .is_some_and(|p| p.correlation_data.as_slice() == correlation_data)
        }) {
            let invocation = slot.take().expect("slot matched Some above");
            self.completed.push((invocation, result));
        }
    }

    pub fn take_completed(&mut self) -> Vec<(PendingInvocation, InvocationResult)> {
        std::mem::take(&mut self.completed)
    }

    pub fn drain_outbound(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.outbound)
    }

    pub fn response_topic(&self) -> &str {
        &self.response_topic
    }
}

impl<const N: usize> StateMachine for InvokerMachine<N> {
    type State = ClientState;

    fn initial() -> ClientState {
        ClientState::Idle
    }

    fn handler(state: ClientState) -> StateFn<Self> {
        match state {
            ClientState::Root => root_handler,
            ClientState::Idle => idle_handler,
            ClientState::Subscribing => subscribing_handler,
            ClientState::Ready => ready_handler,
        }
    }

    fn parent(state: ClientState) -> Option<ClientState> {
        match state {
            ClientState::Root => None,
            ClientState::Idle | ClientState::Subscribing | ClientState::Ready => Some(ClientState::Root),
        }
    }
}

fn root_handler<const N: usize>(
    m: &mut InvokerMachine<N>,
    event: &Event,
) -> Result<Outcome, CoreError> {
    match event.kind {
        EventKind::Entry | EventKind::PubAckRsp | EventKind::ConnectRsp => Ok(Outcome::Handled),
        EventKind::Error => {
            // No superstate to bubble to; forward through the same
            // outbound channel the caller drains, instead of dropping it.
            m.outbound.push(event.clone());
            Ok(Outcome::Handled)
        }
        EventKind::Exit => panic!("az-rpc-server root received Exit: unreachable unless the engine is torn down improperly"),
        _ => Ok(Outcome::Bubble),
    }
}

fn idle_handler<const N: usize>(
    m: &mut InvokerMachine<N>,
    event: &Event,
) -> Result<Outcome, CoreError> {
    match event.kind {
        EventKind::Entry | EventKind::Exit => Ok(Outcome::Handled),
        EventKind::ConnectionOpenReq | EventKind::ConnectRsp => {
            m.push_sub_request();
            m.pending_transition = Some(ClientState::Subscribing);
            Ok(Outcome::Handled)
        }
        _ => Ok(Outcome::Bubble),
    }
}

fn subscribing_handler<const N: usize>(
    m: &mut InvokerMachine<N>,
    event: &Event,
) -> Result<Outcome, CoreError> {
    match event.kind {
        EventKind::Entry | EventKind::Exit => Ok(Outcome::Handled),
        EventKind::SubAckRsp => {
            if let EventData::SubAck { packet_id } = &event.data {
                if m.pending_sub_id == Some(*packet_id) {
                    m.pending_transition = Some(ClientState::Ready);
                }
            }
            Ok(Outcome::Handled)
        }
        EventKind::Timeout => {
            m.push_sub_request();
            Ok(Outcome::Handled)
        }
        _ => Ok(Outcome::Bubble),
    }
}

fn ready_handler<const N: usize>(
    m: &mut InvokerMachine<N>,
    event: &Event,
) -> Result<Outcome, CoreError> {
    match event.kind {
        EventKind::PubRecvInd => {
            if let EventData::PubRecvInd {
                topic,
                correlation_data,
                properties,
                payload,
                ..
            } = &event.data
            {
                if az_mqtt_topics::matches_filter(&m.response_topic, topic) {
                    let status = properties
                        .get("status")
                        .and_then(|s| s.parse::<u16>().ok())
                        .and_then(RpcStatus::from_code)
                        .unwrap_or(RpcStatus::ServerError);
                    m.complete(
                        correlation_data,
                        InvocationResult {
                            status,
                            payload: payload.clone(),
                        },
                    );
                }
            }
            Ok(Outcome::Handled)
        }
        _ => Ok(Outcome::Bubble),
    }
}

/// Owns the engine and application state, applying transitions requested
/// via `pending_transition` after each dispatch — same pattern as
/// [`crate::server::RpcServer`].
pub struct RpcInvoker<const N: usize> {
    hfsm: Hfsm<InvokerMachine<N>>,
    machine: InvokerMachine<N>,
}

impl<const N: usize> RpcInvoker<N> {
    pub fn new(config: InvokerConfig) -> Result<Self, az_mqtt_topics::TopicError> {
        Ok(RpcInvoker {
            hfsm: Hfsm::new(),
            machine: InvokerMachine::new(config)?,
        })
    }

    pub fn state(&self) -> ClientState {
        self.hfsm.current()
    }

    pub fn dispatch(&mut self, event: &Event) -> Result<(), CoreError> {
        self.hfsm.dispatch(&mut self.machine, event)?;
        if let Some(target) = self.machine.pending_transition.take() {
            self.hfsm.transition(&mut self.machine, target)?;
        }
        Ok(())
    }

    pub fn invoke(
        &mut self,
        executor_id: &str,
        command_name: &str,
        payload: Vec<u8>,
    ) -> Result<(), crate::error::RpcError> {
        let ready = self.state() == ClientState::Ready;
        self.machine.invoke(ready, executor_id, command_name, payload)
    }

    pub fn drain_outbound(&mut self) -> Vec<Event> {
        self.machine.drain_outbound()
    }

    pub fn take_completed(&mut self) -> Vec<(PendingInvocation, InvocationResult)> {
        self.machine.take_completed()
    }

    pub fn response_topic(&self) -> &str {
        self.machine.response_topic()
    }
}
