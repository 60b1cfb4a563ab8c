//! Turns a `/qz/sign` request body into the exact text that gets signed.

use serde_json::Value;

/// Request bodies that cannot produce anything to sign.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("Empty payload")]
    EmptyPayload,
    #[error("Empty message")]
    EmptyMessage,
}

/// Extracts the message to sign from a raw request body.
///
/// When `content_type` mentions `application/json` and the body is a JSON
/// object, a non-empty string under `request` wins, otherwise whatever sits
/// under `data` is used; a `data` value that is not a non-empty string
/// yields `EmptyMessage`. Malformed JSON, non-object JSON and objects with
/// neither key (or `data: null`) sign the body itself, decoded as UTF-8
/// with invalid sequences dropped.
pub fn extract(body: &[u8], content_type: &str) -> Result<String, PayloadError> {
    if body.is_empty() {
        return Err(PayloadError::EmptyPayload);
    }

    let from_json = if content_type.contains("application/json") {
        json_message(body)
    } else {
        None
    };

    let text = from_json.unwrap_or_else(|| decode_lossy(body));
    if text.is_empty() {
        return Err(PayloadError::EmptyMessage);
    }

    Ok(text)
}

fn json_message(body: &[u8]) -> Option<String> {
    let payload: Value = serde_json::from_slice(body).ok()?;
    let object = payload.as_object()?;

    if let Some(request) = string_field(object, "request") {
        return Some(request.to_owned());
    }

    // A present `data` is taken as the message even when it is unusable,
    // which later rejects it as empty.
    match object.get("data") {
        None | Some(Value::Null) => None,
        Some(data) => Some(data.as_str().unwrap_or_default().to_owned()),
    }
}

fn string_field<'a>(object: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// UTF-8 decode that silently skips undecodable bytes instead of
/// substituting U+FFFD.
fn decode_lossy(body: &[u8]) -> String {
    body.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
