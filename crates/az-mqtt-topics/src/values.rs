use crate::tokens::TokenKind;

/// Caller-supplied values for the six recognized substitution tokens, plus
/// an optional `$share/` group id that `format_shared` prepends.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicValues<'a> {
    pub client_id: Option<&'a str>,
    pub model_id: Option<&'a str>,
    pub executor_id: Option<&'a str>,
    pub sender_id: Option<&'a str>,
    pub command_name: Option<&'a str>,
    pub telemetry_name: Option<&'a str>,
    pub service_group_id: Option<&'a str>,
}

impl<'a> TopicValues<'a> {
    pub fn for_token(&self, kind: TokenKind) -> Option<&'a str> {
        match kind {
            TokenKind::ClientId => self.client_id,
            TokenKind::ModelId => self.model_id,
            TokenKind::ExecutorId => self.executor_id,
            TokenKind::CommandName => self.command_name,
            TokenKind::TelemetryName => self.telemetry_name,
            TokenKind::SenderId => self.sender_id,
        }
    }
}

/// The spans captured from a received topic during `extract`, one per
/// recognized token present in the format. Fields absent from the format
/// stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractedTokens<'a> {
    pub client_id: Option<&'a str>,
    pub model_id: Option<&'a str>,
    pub executor_id: Option<&'a str>,
    pub sender_id: Option<&'a str>,
    pub command_name: Option<&'a str>,
    pub telemetry_name: Option<&'a str>,
}

impl<'a> ExtractedTokens<'a> {
    pub(crate) fn set(&mut self, kind: TokenKind, value: &'a str) {
        match kind {
            TokenKind::ClientId => self.client_id = Some(value),
            TokenKind::ModelId => self.model_id = Some(value),
            TokenKind::ExecutorId => self.executor_id = Some(value),
            TokenKind::CommandName => self.command_name = Some(value),
            TokenKind::TelemetryName => self.telemetry_name = Some(value),
            TokenKind::SenderId => self.sender_id = Some(value),
        }
    }
}
