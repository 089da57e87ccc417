//! Handler for the slash command (`/plzinviteme`).

use serde_json::Value;
use tracing::info;

use super::helpers::{dispatch, ok_empty};
use super::state::AppState;
use crate::errors::SlackError;
use crate::slack::command_parser::parse_form_data;

/// Handle a slash command from Slack.
///
/// The reply is delivered through the command's `response_url`, so the HTTP
/// response itself is an empty acknowledgement.
///
/// # Errors
///
/// Returns [`SlackError::ParseError`] if the form body cannot be decoded.
pub async fn handle_slash_command(state: &AppState, body: &str) -> Result<Value, SlackError> {
    let command = parse_form_data(body)
        .map_err(|e| SlackError::ParseError(format!("Failed to parse form data: {e}")))?;
    info!(command = %command.command, team_id = %command.team_id, "Slash command received");

    let ctx = command.into_context();
    dispatch(state, &ctx).await;

    Ok(ok_empty())
}
