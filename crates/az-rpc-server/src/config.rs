use az_mqtt_topics::TopicValues;

/// `vehicles/{modelId}/commands/{executorId}/{commandName}` — the fixed
/// request-topic template a command server subscribes to and an invoker
/// publishes to.
pub const REQUEST_TOPIC_FORMAT: &str = "vehicles/{modelId}/commands/{executorId}/{commandName}";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub model_id: String,
    pub executor_id: String,
    pub command_name: String,
    pub sub_qos: u8,
    pub response_qos: u8,
}

impl ServerConfig {
    pub fn new(model_id: impl Into<String>, executor_id: impl Into<String>, command_name: impl Into<String>) -> Self {
        ServerConfig {
            model_id: model_id.into(),
            executor_id: executor_id.into(),
            command_name: command_name.into(),
            sub_qos: 1,
            response_qos: 1,
        }
    }

    pub fn request_topic(&self) -> Result<String, az_mqtt_topics::TopicError> {
        az_mqtt_topics::format(
            REQUEST_TOPIC_FORMAT,
            &TopicValues {
                model_id: Some(&self.model_id),
                executor_id: Some(&self.executor_id),
                command_name: Some(&self.command_name),
                ..Default::default()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_request_topic() {
        let config = ServerConfig::new("v1", "car7", "unlock");
        assert_eq!(config.request_topic().unwrap(), "vehicles/v1/commands/car7/unlock");
    }
}
