use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::models::{CommandContext, ReplyRoute};

/// Structure representing a Slack slash command request.
/// Only the fields the bot uses are kept; anything else Slack sends is ignored.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SlackCommandEvent {
    pub team_id: String,
    pub channel_id: String,
    pub user_id: String,
    pub command: String,
    pub text: String,
    pub response_url: String,
}

impl SlackCommandEvent {
    /// Replies go back through `response_url`, visible only to the caller.
    #[must_use]
    pub fn into_context(self) -> CommandContext {
        CommandContext {
            text: self.text,
            user_id: self.user_id,
            channel_id: self.channel_id,
            team_id: self.team_id,
            reply_route: ReplyRoute::ResponseUrl(self.response_url),
        }
    }
}

/// Decodes URL encoded string using percent_encoding crate
///
/// # Examples
///
/// ```
/// use invitechan::slack::command_parser::decode_url_component;
///
/// assert_eq!(decode_url_component("join+dev%2Dtalk").unwrap(), "join dev-talk");
/// ```
///
/// # Errors
///
/// Returns an error if the decoded bytes are not valid UTF-8.
pub fn decode_url_component(input: &str) -> Result<String, String> {
    // `+` means space in form bodies; swap it before decoding so an encoded
    // `%2B` survives as a literal plus.
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.to_string())
        .map_err(|e| format!("Failed to decode URL component: {}", e))
}

/// Parses URL-encoded form data into a SlackCommandEvent structure.
///
/// Missing fields default to empty strings.
///
/// # Examples
///
/// ```
/// use invitechan::slack::command_parser::parse_form_data;
///
/// let form_data = "team_id=T123&channel_id=D123&user_id=U123&\
///                  command=%2Fplzinviteme&text=join+general&\
///                  response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2F1";
///
/// let event = parse_form_data(form_data).unwrap();
/// assert_eq!(event.command, "/plzinviteme");
/// assert_eq!(event.text, "join general");
/// ```
///
/// # Errors
///
/// Returns an error if a key or value cannot be decoded.
pub fn parse_form_data(form_data: &str) -> Result<SlackCommandEvent, String> {
    let mut map: HashMap<String, String> = HashMap::new();

    for pair in form_data.split('&') {
        if let Some(idx) = pair.find('=') {
            let key = decode_url_component(&pair[..idx])
                .map_err(|e| format!("Failed to decode key: {}", e))?;

            let value = decode_url_component(&pair[idx + 1..])
                .map_err(|e| format!("Failed to decode value: {}", e))?;

            map.insert(key, value);
        }
    }

    let field = |name: &str| map.get(name).cloned().unwrap_or_default();

    Ok(SlackCommandEvent {
        team_id: field("team_id"),
        channel_id: field("channel_id"),
        user_id: field("user_id"),
        command: field("command"),
        text: field("text"),
        response_url: field("response_url"),
    })
}
