use az_core::{Facility, ResultCode};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("no response topic or correlation data on the incoming request")]
    MissingRequestProperties,
    #[error("invoker has no free in-flight request slot")]
    InFlightTableFull,
    #[error("invoker is not ready (not yet subscribed to its response topic)")]
    NotReady,
    #[error(transparent)]
    Topic(#[from] az_mqtt_topics::TopicError),
}

impl ResultCode for RpcError {
    fn facility(&self) -> Facility {
        match self {
            RpcError::MissingRequestProperties | RpcError::InFlightTableFull | RpcError::NotReady => {
                Facility::Core
            }
            RpcError::Topic(_) => Facility::Mqtt,
        }
    }

    fn code(&self) -> u32 {
        match self {
            RpcError::MissingRequestProperties => 1,
            RpcError::InFlightTableFull => 2,
            RpcError::NotReady => 3,
            RpcError::Topic(_) => 4,
        }
    }
}
