//! Handler for Slack Events API callbacks.
//!
//! Direct messages to the bot (`message.im`) are commands, same as the
//! slash command; replies are posted back into the DM.

use serde_json::Value;
use tracing::{debug, info};

use super::helpers::{dispatch, ok_empty, ok_text};
use super::state::AppState;
use crate::errors::SlackError;
use crate::slack::events::{EventEnvelope, command_context, parse_event_envelope};

/// Handle an Events API request body.
///
/// `is_retry` marks a redelivery (`X-Slack-Retry-Num`); those are acknowledged
/// without running the command again.
///
/// # Errors
///
/// Returns [`SlackError::ParseError`] if the envelope cannot be decoded.
pub async fn handle_event_callback(
    state: &AppState,
    body: &str,
    is_retry: bool,
) -> Result<Value, SlackError> {
    match parse_event_envelope(body)? {
        EventEnvelope::UrlVerification { challenge } => Ok(ok_text(&challenge)),

        EventEnvelope::EventCallback { team_id, event } => {
            if is_retry {
                info!(team_id = %team_id, "Skipping redelivered event");
                return Ok(ok_empty());
            }

            let Some(ctx) = command_context(&team_id, &event) else {
                debug!(team_id = %team_id, "Ignoring event");
                return Ok(ok_empty());
            };

            dispatch(state, &ctx).await;
            Ok(ok_empty())
        }

        EventEnvelope::Unsupported => {
            info!("Unknown event envelope type");
            Ok(ok_empty())
        }
    }
}
