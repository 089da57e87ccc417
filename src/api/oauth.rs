//! Workspace installation via Slack's OAuth v2 flow.
//!
//! The bot token lists channels and posts replies; the user token (granted
//! `channels:write`) changes channel membership on the installer's behalf.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::info;

use crate::core::config::AppConfig;
use crate::core::models::Credential;
use crate::core::ports::CredentialStore;
use crate::errors::SlackError;

pub const AUTHORIZE_URL: &str = "https://slack.com/oauth/v2/authorize";
pub const TOKEN_URL: &str = "https://slack.com/api/oauth.v2.access";

const BOT_SCOPES: &str = "commands,channels:read";
const USER_SCOPES: &str = "channels:write";

/// # Errors
///
/// Returns an error if the client id or redirect URL is not configured.
pub fn build_authorize_url(config: &AppConfig, state: &str) -> Result<String, SlackError> {
    let (Some(client_id), Some(redirect_url)) = (&config.slack_client_id, &config.slack_redirect_url)
    else {
        return Err(SlackError::GeneralError(
            "OAuth is not configured: SLACK_APP_CLIENT_ID and SLACK_REDIRECT_URL are required"
                .to_string(),
        ));
    };

    let scope = utf8_percent_encode(BOT_SCOPES, NON_ALPHANUMERIC);
    let user_scope = utf8_percent_encode(USER_SCOPES, NON_ALPHANUMERIC);
    let redirect_uri = utf8_percent_encode(redirect_url, NON_ALPHANUMERIC);
    Ok(format!(
        "{AUTHORIZE_URL}?client_id={client_id}&scope={scope}&user_scope={user_scope}&redirect_uri={redirect_uri}&state={state}"
    ))
}

/// The team id and credential carried by an `oauth.v2.access` response.
///
/// # Errors
///
/// Returns an error if Slack reported a failure or a field is missing.
pub fn credential_from_access_response(body: &Value) -> Result<(String, Credential), SlackError> {
    if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
        let err = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        return Err(SlackError::ApiError(format!("oauth error: {err}")));
    }

    let field = |path: &[&str]| -> Result<String, SlackError> {
        let mut cur = body;
        for key in path {
            cur = cur.get(*key).ok_or_else(|| {
                SlackError::ParseError(format!("oauth: missing {}", path.join(".")))
            })?;
        }
        cur.as_str()
            .map(ToString::to_string)
            .ok_or_else(|| SlackError::ParseError(format!("oauth: {} is not a string", path.join("."))))
    };

    let team_id = field(&["team", "id"])?;
    let bot_token = field(&["access_token"])?;
    let user_token = field(&["authed_user", "access_token"])?;

    Ok((team_id, Credential::new(user_token, bot_token)))
}

/// Exchange the OAuth code for tokens and persist them for the team.
/// Reinstalling overwrites the previous credential.
///
/// # Errors
///
/// Returns an error if the HTTP call fails, Slack rejects the code, or the
/// credential cannot be persisted.
pub async fn handle_callback(
    config: &AppConfig,
    http: &HttpClient,
    store: &dyn CredentialStore,
    code: &str,
) -> Result<String, SlackError> {
    let (Some(client_id), Some(client_secret)) =
        (&config.slack_client_id, &config.slack_client_secret)
    else {
        return Err(SlackError::GeneralError(
            "OAuth is not configured: SLACK_APP_CLIENT_ID and SLACK_APP_CLIENT_SECRET are required"
                .to_string(),
        ));
    };

    let mut payload = vec![
        ("code", code.to_string()),
        ("client_id", client_id.clone()),
        ("client_secret", client_secret.clone()),
    ];
    if let Some(redirect_url) = &config.slack_redirect_url {
        payload.push(("redirect_uri", redirect_url.clone()));
    }

    let resp = http
        .post(TOKEN_URL)
        .form(&payload)
        .send()
        .await
        .map_err(|e| SlackError::HttpError(format!("oauth.v2.access request: {e}")))?;

    let body: Value = resp
        .json()
        .await
        .map_err(|e| SlackError::ParseError(format!("oauth.v2.access parse: {e}")))?;

    let (team_id, credential) = credential_from_access_response(&body)?;
    store.put(&team_id, &credential).await?;
    info!(team_id = %team_id, "Installed workspace");
    Ok(team_id)
}
