use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SlackError {
    #[error("Failed to parse Slack event: {0}")]
    ParseError(String),

    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("Failed to list channels: {0}")]
    DirectoryError(String),

    // Shown to the user as-is, so no prefix.
    #[error("{0}")]
    ActuatorError(String),

    #[error("Missing credentials: {0}")]
    CredentialError(String),

    #[error("{0}")]
    GeneralError(String),
}

impl From<SlackClientError> for SlackError {
    fn from(error: SlackClientError) -> Self {
        SlackError::ApiError(error.to_string())
    }
}

impl From<reqwest::Error> for SlackError {
    fn from(error: reqwest::Error) -> Self {
        SlackError::HttpError(error.to_string())
    }
}

impl From<anyhow::Error> for SlackError {
    fn from(error: anyhow::Error) -> Self {
        SlackError::ApiError(error.to_string())
    }
}
