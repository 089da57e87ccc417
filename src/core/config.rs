use std::env;
use std::time::Duration;

use super::cache::RefreshPolicy;
use super::models::Credential;

pub const DEFAULT_TEAM_TOKEN_PARAM_PREFIX: &str = "/invitechan/team_tokens/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_signing_secret: String,
    pub slack_client_id: Option<String>,
    pub slack_client_secret: Option<String>,
    pub slack_redirect_url: Option<String>,
    /// Single-workspace override; takes precedence over stored credentials.
    pub fixed_credential: Option<Credential>,
    pub team_token_param_prefix: String,
    pub channel_cache_policy: RefreshPolicy,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns a message naming the variable that is missing or malformed.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    ///
    /// # Errors
    ///
    /// Returns a message naming the variable that is missing or malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let slack_signing_secret = non_empty("SLACK_APP_SIGNING_SECRET")
            .ok_or_else(|| "SLACK_APP_SIGNING_SECRET: environment variable not found".to_string())?;

        let fixed_credential = Some(Credential::new(
            lookup("SLACK_TOKEN_USER").unwrap_or_default(),
            lookup("SLACK_TOKEN_BOT").unwrap_or_default(),
        ))
        .filter(Credential::is_valid);

        let channel_cache_policy = match non_empty("CHANNEL_CACHE_POLICY") {
            Some(raw) => raw
                .parse::<RefreshPolicy>()
                .map_err(|e| format!("CHANNEL_CACHE_POLICY: {e}"))?,
            None => RefreshPolicy::default(),
        };

        let request_timeout = match non_empty("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| format!("REQUEST_TIMEOUT_SECS: {e}"))?,
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            slack_signing_secret,
            slack_client_id: non_empty("SLACK_APP_CLIENT_ID"),
            slack_client_secret: non_empty("SLACK_APP_CLIENT_SECRET"),
            slack_redirect_url: non_empty("SLACK_REDIRECT_URL"),
            fixed_credential,
            team_token_param_prefix: non_empty("TEAM_TOKEN_PARAM_PREFIX")
                .unwrap_or_else(|| DEFAULT_TEAM_TOKEN_PARAM_PREFIX.to_string()),
            channel_cache_policy,
            request_timeout,
        })
    }
}
