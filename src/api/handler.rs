//! API Lambda handler - thin router that delegates to specialized handlers.
//!
//! Routes:
//! - `/command` - slash command (signed)
//! - `/events` - Events API callbacks (signed)
//! - `/auth` - start of the OAuth install flow
//! - `/auth/callback` - OAuth redirect target

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use super::state::AppState;
use super::{event_handler, helpers, oauth, parsing, signature, slash_handler};

const INSTALLED_HTML: &str =
    "<p>@invitechan has been installed! Use <code>/plzinviteme</code> to use it.</p>";

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails in practice: every problem is turned into an HTTP response.
#[tracing::instrument(level = "info", skip(state, event))]
pub async fn function_handler(
    state: &AppState,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(route_request(state, &event.payload).await)
}

/// Route one HTTP request payload to its handler.
pub async fn route_request(state: &AppState, payload: &Value) -> Value {
    let Some(path) = parsing::request_path(payload) else {
        error!("Request missing path");
        return helpers::err_response(400, "Missing path");
    };
    info!(raw_path = %path, "Request path");

    // ========================================================================
    // OAuth routes (not signed by Slack)
    // ========================================================================

    if path.ends_with("/auth/callback") {
        return handle_oauth_callback(state, payload).await;
    }
    if path.ends_with("/auth") {
        return handle_oauth_start(state);
    }

    let is_command = path.ends_with("/command");
    let is_events = path.ends_with("/events");
    if !is_command && !is_events {
        return helpers::err_response(404, "Not found");
    }

    // ========================================================================
    // Slack-signed routes
    // ========================================================================

    let empty_headers = Value::Null;
    let headers = payload.get("headers").unwrap_or(&empty_headers);

    let body = match parsing::extract_body(payload) {
        Ok(b) => b,
        Err(e) => {
            error!("Invalid request body: {}", e);
            return helpers::err_response(400, &e.to_string());
        }
    };

    if let Err(response) = verify_signature(&body, headers, state) {
        return response;
    }

    let result = if is_command {
        slash_handler::handle_slash_command(state, &body).await
    } else {
        let is_retry = parsing::get_header_value(headers, "X-Slack-Retry-Num").is_some();
        event_handler::handle_event_callback(state, &body, is_retry).await
    };

    result.unwrap_or_else(|e| {
        error!("Failed to handle Slack request: {}", e);
        helpers::err_response(400, &format!("Parse Error: {e}"))
    })
}

// ============================================================================
// OAuth Handlers
// ============================================================================

fn handle_oauth_start(state: &AppState) -> Value {
    let oauth_state = Uuid::new_v4().to_string();
    match oauth::build_authorize_url(&state.config, &oauth_state) {
        Ok(url) => helpers::redirect(&url),
        Err(e) => {
            error!("OAuth start failed: {}", e);
            helpers::err_response(500, &e.to_string())
        }
    }
}

async fn handle_oauth_callback(state: &AppState, payload: &Value) -> Value {
    if let Some(err) = parsing::query_param(payload, "error") {
        return helpers::ok_text(&err);
    }

    let Some(code) = parsing::query_param(payload, "code") else {
        return helpers::err_response(400, "missing code");
    };

    match oauth::handle_callback(&state.config, &state.http, state.credentials.as_ref(), &code).await
    {
        Ok(_) => helpers::ok_html(INSTALLED_HTML),
        Err(e) => {
            error!("OAuth callback failed: {}", e);
            helpers::err_response(400, &e.to_string())
        }
    }
}

// ============================================================================
// Request Validation Helpers
// ============================================================================

fn verify_signature(body: &str, headers: &Value, state: &AppState) -> Result<(), Value> {
    let Some(sig) = parsing::get_header_value(headers, "X-Slack-Signature") else {
        error!("Missing X-Slack-Signature header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Signature header",
        ));
    };

    let Some(timestamp) = parsing::get_header_value(headers, "X-Slack-Request-Timestamp") else {
        error!("Missing X-Slack-Request-Timestamp header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Request-Timestamp header",
        ));
    };

    if !signature::verify_slack_signature(body, timestamp, sig, &state.config.slack_signing_secret) {
        return Err(helpers::err_response(401, "Invalid Slack signature"));
    }

    Ok(())
}
