//! Boundaries to the chat platform and to credential storage.
//!
//! The core only talks to these traits. Production implementations live in
//! [`crate::slack`] and [`crate::core::credentials`]; tests supply fakes.

use async_trait::async_trait;
use std::sync::Arc;

use super::models::{BotToken, ChannelPage, Credential, ReplyRoute, UserToken};
use crate::errors::SlackError;

/// Paginated listing of the public, non-archived channels the bot is in.
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// Fetch one page. `cursor` is `None` for the first page.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be fetched.
    async fn list_member_channels(&self, cursor: Option<&str>) -> Result<ChannelPage, SlackError>;
}

/// Adds or removes a user from a channel.
#[async_trait]
pub trait MembershipActuator: Send + Sync {
    /// # Errors
    ///
    /// Returns the platform's error, e.g. `already_in_channel`.
    async fn add_member(&self, channel_id: &str, user_id: &str) -> Result<(), SlackError>;

    /// # Errors
    ///
    /// Returns the platform's error, e.g. `not_in_channel`.
    async fn remove_member(&self, channel_id: &str, user_id: &str) -> Result<(), SlackError>;
}

/// Delivers reply text back to where a command came from.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the reply could not be delivered.
    async fn reply(&self, route: &ReplyRoute, text: &str) -> Result<(), SlackError>;
}

/// Per-workspace credential storage keyed by team id.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`SlackError::CredentialError`] when nothing is stored for
    /// `team_id`, or a storage error.
    async fn get(&self, team_id: &str) -> Result<Credential, SlackError>;

    /// Stores `credential`, replacing any previous installation.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn put(&self, team_id: &str, credential: &Credential) -> Result<(), SlackError>;
}

/// Builds platform clients for a credential.
///
/// The token types decide the scope: discovery and replies run as the bot,
/// membership changes run as the installing user.
pub trait ClientFactory: Send + Sync {
    fn directory(&self, token: &BotToken) -> Arc<dyn ChannelDirectory>;

    fn actuator(&self, token: &UserToken) -> Arc<dyn MembershipActuator>;

    /// Without a bot token only `response_url` routes can be served.
    fn notifier(&self, token: Option<&BotToken>) -> Arc<dyn Notifier>;
}
