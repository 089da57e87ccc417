//! Typed Events API payloads.
//!
//! The envelope is decoded once into these enums; anything the bot does not
//! handle lands in an `Unsupported`/`Other` variant instead of failing.

use serde::Deserialize;

use crate::core::models::{CommandContext, ReplyRoute};
use crate::errors::SlackError;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEnvelope {
    UrlVerification {
        challenge: String,
    },
    EventCallback {
        team_id: String,
        event: InnerEvent,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InnerEvent {
    Message(MessageEvent),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct MessageEvent {
    pub channel: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub bot_id: Option<String>,
}

impl MessageEvent {
    /// A message typed by a person: no subtype (edits, joins, bot posts...)
    /// and not from a bot, which includes this bot's own replies.
    #[must_use]
    pub fn is_plain_user_message(&self) -> bool {
        self.subtype.is_none() && self.bot_id.is_none() && self.user.is_some()
    }
}

/// Decode a raw Events API body.
///
/// # Errors
///
/// Returns [`SlackError::ParseError`] if the body is not a valid envelope.
pub fn parse_event_envelope(body: &str) -> Result<EventEnvelope, SlackError> {
    serde_json::from_str(body)
        .map_err(|e| SlackError::ParseError(format!("Invalid event envelope: {e}")))
}

/// The command carried by an event, if it is one the bot should answer.
/// Replies are posted back into the conversation the message came from.
#[must_use]
pub fn command_context(team_id: &str, event: &InnerEvent) -> Option<CommandContext> {
    let InnerEvent::Message(message) = event else {
        return None;
    };
    if !message.is_plain_user_message() {
        return None;
    }

    Some(CommandContext {
        text: message.text.clone().unwrap_or_default(),
        user_id: message.user.clone().unwrap_or_default(),
        channel_id: message.channel.clone(),
        team_id: team_id.to_string(),
        reply_route: ReplyRoute::Channel(message.channel.clone()),
    })
}
