use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;

use super::client::SlackClient;
use super::notifier::SlackNotifier;
use crate::core::models::{BotToken, UserToken};
use crate::core::ports::{ChannelDirectory, ClientFactory, MembershipActuator, Notifier};

/// Builds real Slack clients for the bot and user tokens of a workspace.
pub struct SlackClientFactory {
    http: HttpClient,
}

impl SlackClientFactory {
    #[must_use]
    pub fn new() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| HttpClient::new());
        Self { http }
    }
}

impl Default for SlackClientFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientFactory for SlackClientFactory {
    fn directory(&self, token: &BotToken) -> Arc<dyn ChannelDirectory> {
        Arc::new(SlackClient::new(token.expose().to_string()))
    }

    fn actuator(&self, token: &UserToken) -> Arc<dyn MembershipActuator> {
        Arc::new(SlackClient::new(token.expose().to_string()))
    }

    fn notifier(&self, token: Option<&BotToken>) -> Arc<dyn Notifier> {
        let bot = token.map(|t| SlackClient::new(t.expose().to_string()));
        Arc::new(SlackNotifier::new(self.http.clone(), bot))
    }
}
