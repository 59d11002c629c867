use serde_json::Value as JsonValue;

use crate::{wire::Envelope, Result, StatementOutcome, SurrealError};

/// Turns a raw response body into per-statement outcomes, in submission order.
///
/// A top-level object carrying `code` is a protocol failure and is returned
/// as [`SurrealError::Protocol`] without looking at any statement.
pub(crate) fn decode_outcomes(raw: JsonValue) -> Result<Vec<StatementOutcome>> {
    if raw.get("code").is_some() {
        return Err(SurrealError::Protocol { payload: raw });
    }

    let items = match raw {
        JsonValue::Array(items) => items,
        other => {
            return Err(SurrealError::Decode(format!(
                "expected statement envelope array, got: {other}"
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let envelope = serde_json::from_value::<Envelope>(item).map_err(|err| {
                SurrealError::Decode(format!("invalid envelope at index {index}: {err}"))
            })?;
            decode_envelope(envelope, index)
        })
        .collect()
}

/// Unwraps the only outcome of a single-statement submission.
pub(crate) fn single_outcome(outcomes: Vec<StatementOutcome>) -> Result<StatementOutcome> {
    if outcomes.len() != 1 {
        return Err(SurrealError::Decode(format!(
            "result count mismatch: expected 1, got {}",
            outcomes.len()
        )));
    }
    outcomes
        .into_iter()
        .next()
        .ok_or_else(|| SurrealError::Decode("missing statement result".to_owned()))
}

/// `true` when a body can be read as statement envelopes.
///
/// Used to keep non-success HTTP responses that still carry envelopes on the
/// statement path instead of reporting them as transport failures.
pub(crate) fn is_envelope_sequence(raw: &JsonValue) -> bool {
    match raw {
        JsonValue::Array(items) => {
            !items.is_empty()
                && items
                    .iter()
                    .all(|item| item.get("status").is_some_and(JsonValue::is_string))
        }
        _ => false,
    }
}

fn decode_envelope(envelope: Envelope, index: usize) -> Result<StatementOutcome> {
    match envelope.status.as_str() {
        "OK" => Ok(StatementOutcome::Ok {
            time: envelope.time,
            records: into_records(envelope.result),
        }),
        "ERR" => {
            let message = envelope
                .detail
                .or_else(|| match envelope.result {
                    Some(JsonValue::String(message)) => Some(message),
                    _ => None,
                })
                .unwrap_or_else(|| "statement failed without detail".to_owned());

            #[cfg(feature = "tracing")]
            tracing::debug!(index, message = message.as_str(), "statement returned ERR");

            Ok(StatementOutcome::Err {
                index,
                time: envelope.time,
                message,
            })
        }
        other => Err(SurrealError::Decode(format!(
            "unknown statement status '{other}' at index {index}"
        ))),
    }
}

fn into_records(result: Option<JsonValue>) -> Vec<JsonValue> {
    match result {
        None | Some(JsonValue::Null) => Vec::new(),
        Some(JsonValue::Array(records)) => records,
        Some(single) => vec![single],
    }
}
