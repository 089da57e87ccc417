use std::sync::Arc;

use crate::core::cache::CacheRegistry;
use crate::core::config::AppConfig;
use crate::core::credentials::{CredentialResolver, SsmCredentialStore};
use crate::core::dispatcher::CommandDispatcher;
use crate::core::ports::{ClientFactory, CredentialStore};
use crate::slack::SlackClientFactory;

/// Everything the API handler keeps between invocations of a warm container.
pub struct AppState {
    pub config: AppConfig,
    pub credentials: Arc<dyn CredentialStore>,
    pub dispatcher: CommandDispatcher,
    pub http: reqwest::Client,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: AppConfig,
        credentials: Arc<dyn CredentialStore>,
        clients: Arc<dyn ClientFactory>,
    ) -> Self {
        let resolver = CredentialResolver::new(config.fixed_credential.clone(), Arc::clone(&credentials));
        let caches = CacheRegistry::new(config.channel_cache_policy);
        let dispatcher =
            CommandDispatcher::new(resolver, caches, clients).with_deadline(config.request_timeout);

        Self {
            config,
            credentials,
            dispatcher,
            http: reqwest::Client::new(),
        }
    }

    /// Production wiring: SSM for credentials, Slack for everything else.
    pub async fn from_config(config: AppConfig) -> Self {
        let store = SsmCredentialStore::from_env(config.team_token_param_prefix.clone()).await;
        Self::new(config, Arc::new(store), Arc::new(SlackClientFactory::new()))
    }
}
