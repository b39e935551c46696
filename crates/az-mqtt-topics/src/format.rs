use crate::error::TopicError;
use crate::tokens::{parse_format, FormatPart, SERVICE_GROUP_PREFIX};
use crate::values::TopicValues;

/// Substitutes every recognized token in `format` with the matching field
/// from `values`. A token present in the format but absent from `values`, or
/// a `{...}` sequence `format` doesn't recognize at all, is
/// `TopicError::InvalidArg` — unlike `validate_format`/`extract`, where an
/// unrecognized token is `UnknownToken`.
pub fn format(format_str: &str, values: &TopicValues<'_>) -> Result<String, TopicError> {
    let parts = parse_format(format_str).map_err(|e| match e {
        TopicError::UnknownToken => TopicError::InvalidArg,
        other => other,
    })?;
    let mut out = String::with_capacity(format_str.len());
    for part in parts {
        match part {
            FormatPart::Literal(lit) => out.push_str(lit),
            FormatPart::Token(kind) => {
                out.push_str(values.for_token(kind).ok_or(TopicError::InvalidArg)?);
            }
        }
    }
    Ok(out)
}

/// Same as [`format`], but prepends `$share/<service_group_id>/` when
/// `values.service_group_id` is set.
pub fn format_shared(format_str: &str, values: &TopicValues<'_>) -> Result<String, TopicError> {
    let topic = format(format_str, values)?;
    match values.service_group_id {
        Some(group) => Ok(format!("{SERVICE_GROUP_PREFIX}{group}/{topic}")),
        None => Ok(topic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_all_recognized_tokens() {
        let values = TopicValues {
            client_id: Some("client-1"),
            model_id: Some("dtmi:com:example:Thermostat;1"),
            command_name: Some("getMaxMinReport"),
            ..Default::default()
        };
        let topic = format(
            "vehicles/{modelId}/commands/{invokerClientId}/{commandName}",
            &values,
        )
        .unwrap();
        assert_eq!(
            topic,
            "vehicles/dtmi:com:example:Thermostat;1/commands/client-1/getMaxMinReport"
        );
    }

    #[test]
    fn missing_value_is_invalid_arg() {
        let values = TopicValues::default();
        assert_eq!(
            format("commands/{invokerClientId}", &values),
            Err(TopicError::InvalidArg)
        );
    }

    #[test]
    fn unrecognized_token_is_invalid_arg() {
        let values = TopicValues::default();
        assert_eq!(
            format("commands/{notARealToken}", &values),
            Err(TopicError::InvalidArg)
        );
    }

    #[test]
    fn format_shared_prepends_group_prefix() {
        let values = TopicValues {
            client_id: Some("c1"),
            service_group_id: Some("group-a"),
            ..Default::default()
        };
        let topic = format_shared("commands/{invokerClientId}", &values).unwrap();
        assert_eq!(topic, "$share/group-a/commands/c1");
    }
}
