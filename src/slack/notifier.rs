use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{error, info};

use super::client::SlackClient;
use super::response_builder::create_ephemeral_payload;
use crate::core::models::ReplyRoute;
use crate::core::ports::Notifier;
use crate::errors::SlackError;

/// Delivers replies either through a slash command's `response_url` or by
/// posting as the bot.
pub struct SlackNotifier {
    http: HttpClient,
    bot: Option<SlackClient>,
}

impl SlackNotifier {
    #[must_use]
    pub fn new(http: HttpClient, bot: Option<SlackClient>) -> Self {
        Self { http, bot }
    }

    async fn send_response_url(&self, response_url: &str, text: &str) -> Result<(), SlackError> {
        let resp = self
            .http
            .post(response_url)
            .json(&create_ephemeral_payload(text))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!(
                "response_url POST failed: status={} body={}",
                status, body_text
            );
            return Err(SlackError::HttpError(format!(
                "response_url POST returned {status}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn reply(&self, route: &ReplyRoute, text: &str) -> Result<(), SlackError> {
        match route {
            ReplyRoute::ResponseUrl(url) => self.send_response_url(url, text).await,
            ReplyRoute::Channel(channel_id) => {
                let Some(bot) = &self.bot else {
                    return Err(SlackError::CredentialError(format!(
                        "no bot token to post into {channel_id}"
                    )));
                };
                bot.post_message(channel_id, text).await?;
                info!(channel_id = %channel_id, "Posted reply");
                Ok(())
            }
        }
    }
}
