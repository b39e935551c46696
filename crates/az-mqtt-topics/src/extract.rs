use crate::error::TopicError;
use crate::tokens::{parse_format, FormatPart, TokenKind, ANY_EXECUTOR_ID};
use crate::values::{ExtractedTokens, TopicValues};

/// Walks `format` and `received_topic` in lockstep: literal runs must match
/// byte-for-byte, and each recognized token captures the run of
/// `received_topic` up to the next `/` or end of string. If `known` supplies
/// a value for that token's slot, the captured run must equal it — except
/// for `executor_id` when `known.executor_id` is the `_any_` sentinel,
/// which accepts any captured value.
pub fn extract<'a>(
    format_str: &str,
    received_topic: &'a str,
    known: &TopicValues<'_>,
) -> Result<ExtractedTokens<'a>, TopicError> {
    let parts = parse_format(format_str)?;
    let mut out = ExtractedTokens::default();
    let mut pos = 0usize;
    for part in parts {
        match part {
            FormatPart::Literal(lit) => {
                if !received_topic[pos..].starts_with(lit) {
                    return Err(TopicError::Mismatch);
                }
                pos += lit.len();
            }
            FormatPart::Token(kind) => {
                let rest = &received_topic[pos..];
                let end = rest.find('/').unwrap_or(rest.len());
                let captured = &rest[..end];
                if let Some(expected) = known.for_token(kind) {
                    let skip_check = kind == TokenKind::ExecutorId && expected == ANY_EXECUTOR_ID;
                    if !skip_check && captured != expected {
                        return Err(TopicError::Mismatch);
                    }
                }
                out.set(kind, captured);
                pos += end;
            }
        }
    }
    if pos != received_topic.len() {
        return Err(TopicError::Mismatch);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tokens_and_matches_literals() {
        let known = TopicValues::default();
        let extracted = extract(
            "vehicles/{modelId}/commands/{invokerClientId}/{commandName}",
            "vehicles/dtmi:com:example:Thermostat;1/commands/client-1/getMaxMinReport",
            &known,
        )
        .unwrap();
        assert_eq!(extracted.model_id, Some("dtmi:com:example:Thermostat;1"));
        assert_eq!(extracted.client_id, Some("client-1"));
        assert_eq!(extracted.command_name, Some("getMaxMinReport"));
    }

    #[test]
    fn supplied_value_must_equal_extracted_value() {
        let known = TopicValues {
            client_id: Some("expected-client"),
            ..Default::default()
        };
        let result = extract(
            "commands/{invokerClientId}",
            "commands/other-client",
            &known,
        );
        assert_eq!(result, Err(TopicError::Mismatch));
    }

    #[test]
    fn any_executor_sentinel_skips_equality_check() {
        let known = TopicValues {
            executor_id: Some(ANY_EXECUTOR_ID),
            ..Default::default()
        };
        let extracted =
            extract("responses/{executorId}", "responses/concrete-executor", &known).unwrap();
        assert_eq!(extracted.executor_id, Some("concrete-executor"));
    }

    #[test]
    fn literal_mismatch_fails() {
        let known = TopicValues::default();
        assert_eq!(
            extract("commands/{invokerClientId}", "events/client-1", &known),
            Err(TopicError::Mismatch)
        );
    }

    #[test]
    fn trailing_unmatched_suffix_fails() {
        let known = TopicValues::default();
        assert_eq!(
            extract("commands/{invokerClientId}", "commands/c1/extra", &known),
            Err(TopicError::Mismatch)
        );
    }
}
