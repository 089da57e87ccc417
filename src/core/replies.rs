//! Text sent back to users.

use super::models::ChannelSnapshot;
use crate::errors::SlackError;

pub const HELP_TEXT: &str = "Hello! With me multi-channel guests can join open channels freely.

*If you are a multi-channel guest:*
Tell me:
• “list” to list open channels
• “join _channel_” to join one
• “leave _channel_” to leave one

*If you are a regular user:*
Public channels where I’m in are marked open to guests.
Invite me to channels so that guests can join them.
";

pub const NO_OPEN_CHANNELS: &str = "No channels are open to guests yet.";

#[must_use]
pub fn channel_list(snapshot: &ChannelSnapshot) -> String {
    if snapshot.is_empty() {
        return NO_OPEN_CHANNELS.to_string();
    }

    let mut text = String::from("Available channels:\n");
    for name in snapshot.names() {
        text.push_str("• ");
        text.push_str(name);
        text.push('\n');
    }
    text.push_str("Tell me “join _channel_” to join one!");
    text
}

#[must_use]
pub fn not_open(name: &str) -> String {
    format!("Sorry, channel #{name} is not open to multi-channel guests.")
}

#[must_use]
pub fn joined(name: &str) -> String {
    format!("Okay, I invited you to #{name}!")
}

#[must_use]
pub fn left(name: &str) -> String {
    format!("Okay, I removed you from #{name}.")
}

#[must_use]
pub fn error(err: &SlackError) -> String {
    format!("Error: {err}")
}
