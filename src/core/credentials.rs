use async_trait::async_trait;
use aws_sdk_ssm::{Client as SsmClient, types::ParameterType};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::models::Credential;
use super::ports::CredentialStore;
use crate::errors::SlackError;

/// Resolves the credential for a workspace.
///
/// A valid fixed credential (single-workspace deployment) always wins;
/// otherwise the store is consulted by team id.
#[derive(Clone)]
pub struct CredentialResolver {
    fixed: Option<Credential>,
    store: Arc<dyn CredentialStore>,
}

impl CredentialResolver {
    #[must_use]
    pub fn new(fixed: Option<Credential>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            fixed: fixed.filter(Credential::is_valid),
            store,
        }
    }

    /// # Errors
    ///
    /// Returns [`SlackError::CredentialError`] if nothing usable is installed
    /// for `team_id`, or the store's error.
    pub async fn resolve(&self, team_id: &str) -> Result<Credential, SlackError> {
        if let Some(fixed) = &self.fixed {
            debug!(team_id = %team_id, source = "fixed", "Resolved credential");
            return Ok(fixed.clone());
        }

        let credential = self.store.get(team_id).await?;
        if !credential.is_valid() {
            return Err(SlackError::CredentialError(format!(
                "incomplete tokens installed for team {team_id}"
            )));
        }
        debug!(team_id = %team_id, source = "store", "Resolved credential");
        Ok(credential)
    }
}

fn not_installed(team_id: &str) -> SlackError {
    SlackError::CredentialError(format!("no tokens installed for team {team_id}"))
}

fn key_for_team(prefix: &str, team_id: &str) -> String {
    let mut p = prefix.to_string();
    if !p.ends_with('/') {
        p.push('/');
    }
    format!("{p}{team_id}")
}

/// Credentials kept as JSON `SecureString` parameters in SSM.
pub struct SsmCredentialStore {
    client: SsmClient,
    prefix: String,
}

impl SsmCredentialStore {
    #[must_use]
    pub fn new(client: SsmClient, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
        }
    }

    /// Build a store from the ambient AWS configuration.
    pub async fn from_env(prefix: impl Into<String>) -> Self {
        let shared = aws_config::from_env().load().await;
        Self::new(SsmClient::new(&shared), prefix)
    }
}

#[async_trait]
impl CredentialStore for SsmCredentialStore {
    async fn get(&self, team_id: &str) -> Result<Credential, SlackError> {
        let name = key_for_team(&self.prefix, team_id);

        match self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
        {
            Ok(resp) => {
                let Some(value) = resp.parameter.as_ref().and_then(|p| p.value()) else {
                    return Err(not_installed(team_id));
                };
                serde_json::from_str(value)
                    .map_err(|e| SlackError::CredentialError(format!("token parse: {e}")))
            }
            Err(e)
                if e
                    .as_service_error()
                    .is_some_and(|se| se.is_parameter_not_found()) =>
            {
                Err(not_installed(team_id))
            }
            Err(e) => Err(SlackError::AwsError(format!("ssm get_parameter: {e}"))),
        }
    }

    async fn put(&self, team_id: &str, credential: &Credential) -> Result<(), SlackError> {
        let name = key_for_team(&self.prefix, team_id);
        let value = serde_json::to_string(credential)
            .map_err(|e| SlackError::GeneralError(format!("token serialize: {e}")))?;

        self.client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(ParameterType::SecureString)
            .overwrite(true)
            .send()
            .await
            .map_err(|e| SlackError::AwsError(format!("ssm put_parameter: {e}")))?;

        info!(team_id = %team_id, "Stored team credential");
        Ok(())
    }
}

/// Process-local store, for local runs and tests.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    entries: RwLock<HashMap<String, Credential>>,
}

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, team_id: &str) -> Result<Credential, SlackError> {
        self.entries
            .read()
            .await
            .get(team_id)
            .cloned()
            .ok_or_else(|| not_installed(team_id))
    }

    async fn put(&self, team_id: &str, credential: &Credential) -> Result<(), SlackError> {
        self.entries
            .write()
            .await
            .insert(team_id.to_string(), credential.clone());
        Ok(())
    }
}
