//! Response builders and command dispatch shared by the API handlers.

use serde_json::{Value, json};
use tracing::error;

use super::state::AppState;
use crate::core::models::CommandContext;

// ============================================================================
// Response Builders
// ============================================================================

/// Returns a 200 OK response with an empty JSON body.
#[must_use]
pub fn ok_empty() -> Value {
    json!({ "statusCode": 200, "body": "{}" })
}

/// Returns a 200 OK plain-text response.
#[must_use]
pub fn ok_text(text: &str) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "text/plain" },
        "body": text
    })
}

/// Returns a 200 OK HTML response.
#[must_use]
pub fn ok_html(html: &str) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "text/html; charset=utf-8" },
        "body": html
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "body": json!({ "error": message }).to_string()
    })
}

/// Returns a 302 redirect response.
#[must_use]
pub fn redirect(url: &str) -> Value {
    json!({
        "statusCode": 302,
        "headers": { "Location": url },
        "body": ""
    })
}

// ============================================================================
// Command Dispatch
// ============================================================================

/// Runs one command and logs a reply that could not be delivered.
///
/// The dispatcher enforces the configured deadline and turns expiry into an
/// `Error: ...` reply.
pub async fn dispatch(state: &AppState, ctx: &CommandContext) {
    if let Err(e) = state.dispatcher.handle(ctx).await {
        error!("Reply delivery failed: {}", e);
    }
}
