use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::errors::SlackError;

/// Case-insensitive header lookup on a Lambda event's `headers` object.
pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// The request path from either a function URL (`rawPath`) or an API Gateway
/// (`path`) payload.
pub fn request_path(payload: &Value) -> Option<&str> {
    payload
        .get("rawPath")
        .and_then(Value::as_str)
        .or_else(|| payload.get("path").and_then(Value::as_str))
}

/// A query parameter from `rawQueryString` or `queryStringParameters`.
pub fn query_param(payload: &Value, name: &str) -> Option<String> {
    payload
        .get("rawQueryString")
        .and_then(Value::as_str)
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
        })
        .or_else(|| {
            payload
                .get("queryStringParameters")
                .and_then(|m| m.get(name))
                .and_then(Value::as_str)
                .map(ToString::to_string)
        })
}

/// The request body as text, decoding base64 bodies.
///
/// # Errors
///
/// Returns [`SlackError::ParseError`] if the body is missing or undecodable.
pub fn extract_body(payload: &Value) -> Result<String, SlackError> {
    let Some(body) = payload.get("body").and_then(Value::as_str) else {
        return Err(SlackError::ParseError("Missing body".to_string()));
    };

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| SlackError::ParseError(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes).map_err(|e| SlackError::ParseError(format!("Body is not UTF-8: {e}")))
}
