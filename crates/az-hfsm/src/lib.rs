//! Generic hierarchical state machine engine plus the policy-pipeline
//! scaffolding used to wire one or more `Hfsm` instances to a transport
//! (spec §4.6). Application-specific machines (e.g. the RPC server/client)
//! implement [`StateMachine`] and drive it through a [`pipeline::Pipeline`].

mod event;
mod pipeline;
mod state;

pub use event::{Event, EventData, EventKind, MqttUserProperties};
pub use pipeline::{Pipeline, Policy, PolicyResult};
pub use state::{Hfsm, Outcome, StateFn, StateMachine};
