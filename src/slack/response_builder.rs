//! Response-related utilities for Slack interactions.

use serde_json::{Value, json};

/// Create a JSON payload for an ephemeral response
///
/// Ephemeral messages sent through a slash command's `response_url` are only
/// visible to the user who ran the command.
///
/// # Examples
///
/// ```
/// use invitechan::slack::response_builder::create_ephemeral_payload;
///
/// let payload = create_ephemeral_payload("Available channels:");
/// assert_eq!(payload["response_type"], "ephemeral");
/// ```
#[must_use]
pub fn create_ephemeral_payload(text: &str) -> Value {
    json!({
        "text": text,
        "response_type": "ephemeral"
    })
}
