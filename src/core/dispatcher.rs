//! Turns one inbound command into one reply.
//!
//! Each command is handled on its own: parse, check the open-channel
//! snapshot, act, reply. Nothing is remembered between messages apart from
//! the per-workspace channel caches.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout_at};
use tracing::{error, info, warn};

use super::cache::CacheRegistry;
use super::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use super::credentials::CredentialResolver;
use super::intent::Intent;
use super::membership::MembershipService;
use super::models::{ChannelSnapshot, CommandContext, Credential};
use super::ports::ClientFactory;
use super::replies;
use crate::errors::SlackError;

pub struct CommandDispatcher {
    credentials: CredentialResolver,
    caches: CacheRegistry,
    clients: Arc<dyn ClientFactory>,
    deadline: Duration,
}

impl CommandDispatcher {
    #[must_use]
    pub fn new(
        credentials: CredentialResolver,
        caches: CacheRegistry,
        clients: Arc<dyn ClientFactory>,
    ) -> Self {
        Self {
            credentials,
            caches,
            clients,
            deadline: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Time allowed for resolving the credential and acting on a command.
    /// Delivering the reply is not counted against it.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Handle a command and deliver the reply.
    ///
    /// Failures while acting become `Error: ...` replies, and so does running
    /// past the deadline. The returned error only covers delivery of that
    /// reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply could not be delivered.
    #[tracing::instrument(level = "info", skip_all, fields(team_id = %ctx.team_id, user_id = %ctx.user_id))]
    pub async fn handle(&self, ctx: &CommandContext) -> Result<(), SlackError> {
        let intent = Intent::parse(&ctx.text);
        info!(intent = intent.kind(), "Handling command");

        let expires = Instant::now() + self.deadline;

        let credential = timeout_at(expires, self.credentials.resolve(&ctx.team_id))
            .await
            .unwrap_or_else(|_| Err(timed_out()));

        let text = match (&intent, &credential) {
            (Intent::ShowHelp, _) => replies::HELP_TEXT.to_string(),
            (_, Ok(credential)) => timeout_at(expires, self.respond(ctx, &intent, credential))
                .await
                .unwrap_or_else(|_| {
                    warn!(
                        intent = intent.kind(),
                        timeout_secs = self.deadline.as_secs(),
                        "Command timed out"
                    );
                    replies::error(&timed_out())
                }),
            (_, Err(e)) => {
                error!("Credential resolution failed: {}", e);
                replies::error(e)
            }
        };

        let notifier = self
            .clients
            .notifier(credential.as_ref().ok().map(|c| &c.bot_token));
        notifier
            .reply(&ctx.reply_route, &text)
            .await
            .inspect_err(|e| error!("Failed to deliver reply: {}", e))
    }

    /// Compute the reply text for `intent` without delivering it.
    pub async fn respond(&self, ctx: &CommandContext, intent: &Intent, credential: &Credential) -> String {
        match self.execute(ctx, intent, credential).await {
            Ok(text) => text,
            Err(e) => {
                warn!(intent = intent.kind(), "Command failed: {}", e);
                replies::error(&e)
            }
        }
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        intent: &Intent,
        credential: &Credential,
    ) -> Result<String, SlackError> {
        match intent {
            Intent::ShowHelp => Ok(replies::HELP_TEXT.to_string()),

            Intent::ListOpenChannels => {
                let snapshot = self.open_channels(ctx, credential).await?;
                Ok(replies::channel_list(&snapshot))
            }

            Intent::JoinChannel { name } => {
                let snapshot = self.open_channels(ctx, credential).await?;
                let Some(channel) = snapshot.get(name) else {
                    info!(channel = %name, "Join denied: channel not open");
                    return Ok(replies::not_open(name));
                };

                self.membership(credential)
                    .invite(channel, &ctx.user_id)
                    .await?;
                Ok(replies::joined(name))
            }

            Intent::LeaveChannel { name } => {
                let snapshot = self.open_channels(ctx, credential).await?;
                let Some(channel) = snapshot.get(name) else {
                    info!(channel = %name, "Leave denied: channel not open");
                    return Ok(replies::not_open(name));
                };

                self.membership(credential)
                    .leave(channel, &ctx.user_id)
                    .await?;
                Ok(replies::left(name))
            }
        }
    }

    async fn open_channels(
        &self,
        ctx: &CommandContext,
        credential: &Credential,
    ) -> Result<Arc<ChannelSnapshot>, SlackError> {
        let cache = self.caches.for_team(&ctx.team_id).await;
        let directory = self.clients.directory(&credential.bot_token);
        cache.snapshot(directory.as_ref()).await
    }

    fn membership(&self, credential: &Credential) -> MembershipService {
        MembershipService::new(self.clients.actuator(&credential.user_token))
    }
}

fn timed_out() -> SlackError {
    SlackError::GeneralError("request timed out".to_string())
}
