//! The recognized `{...}` substitution tokens, reproduced verbatim from
//! `original_source/sdk/inc/azure/core/internal/az_mqtt5_topic_parser_internal.h`'s
//! `_az_MQTT5_TOPIC_PARSER_*_TOKEN` / `_az_MQTT5_RPC_EXECUTOR_ID_TOKEN` macros.

use crate::error::TopicError;

/// MQTT single-level wildcard (`_az_MQTT5_TOPIC_PARSER_SINGLE_LEVEL_WILDCARD_TOKEN`).
pub const SINGLE_LEVEL_WILDCARD: &str = "+";
/// MQTT multi-level wildcard.
pub const MULTI_LEVEL_WILDCARD: &str = "#";
/// Shared-subscription prefix (`_az_MQTT5_TOPIC_PARSER_SERVICE_GROUP_ID_TOKEN`).
pub const SERVICE_GROUP_PREFIX: &str = "$share/";
/// Sentinel meaning "match responses from any executor"
/// (`_az_MQTT5_TOPIC_PARSER_ANY_EXECUTOR_ID`).
pub const ANY_EXECUTOR_ID: &str = "_any_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    ClientId,
    ModelId,
    ExecutorId,
    CommandName,
    TelemetryName,
    SenderId,
}

impl TokenKind {
    fn from_name(name: &str) -> Result<Self, TopicError> {
        match name {
            "invokerClientId" => Ok(TokenKind::ClientId),
            "modelId" => Ok(TokenKind::ModelId),
            "executorId" => Ok(TokenKind::ExecutorId),
            "commandName" => Ok(TokenKind::CommandName),
            "telemetryName" => Ok(TokenKind::TelemetryName),
            "senderId" => Ok(TokenKind::SenderId),
            _ => Err(TopicError::UnknownToken),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatPart<'a> {
    Literal(&'a str),
    Token(TokenKind),
}

/// Splits a topic format string into literal runs and recognized tokens.
/// Shared by `format`, `extract`, and `validate_format` so the three
/// operations can never disagree about what a format means.
pub fn parse_format(format: &str) -> Result<Vec<FormatPart<'_>>, TopicError> {
    let mut parts = Vec::new();
    let mut rest = format;
    while let Some(open) = rest.find('{') {
        if open > 0 {
            parts.push(FormatPart::Literal(&rest[..open]));
        }
        let after_open = &rest[open + 1..];
        let close = after_open.find('}').ok_or(TopicError::MalformedFormat)?;
        let name = &after_open[..close];
        if name.contains('{') {
            return Err(TopicError::MalformedFormat);
        }
        parts.push(FormatPart::Token(TokenKind::from_name(name)?));
        rest = &after_open[close + 1..];
    }
    if rest.contains('}') {
        return Err(TopicError::MalformedFormat);
    }
    if !rest.is_empty() {
        parts.push(FormatPart::Literal(rest));
    }
    Ok(parts)
}
