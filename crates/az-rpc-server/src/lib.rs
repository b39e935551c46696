//! Command server and invoker HFSMs built on `az-hfsm`'s generic engine,
//! using `az-mqtt-topics` for the request/response topic shapes (spec
//! §4.7). The server is grounded directly on
//! `az_mqtt5_rpc_server_hfsm.c`; the invoker is a supplemented
//! counterpart built in the same idiom.

mod client;
mod config;
mod error;
mod server;
mod status;

pub use client::{
    ClientState, InvocationResult, InvokerConfig, InvokerMachine, PendingInvocation, RpcInvoker,
    RESPONSE_TOPIC_FORMAT,
};
pub use config::{ServerConfig, REQUEST_TOPIC_FORMAT};
pub use error::RpcError;
pub use server::{PendingCommand, RpcServer, RpcServerMachine, ServerState};
pub use status::{status_failed, RpcStatus};
