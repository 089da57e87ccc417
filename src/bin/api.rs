use std::sync::Arc;

use invitechan::api::{AppState, handler};
use invitechan::core::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    invitechan::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        lambda_runtime::Error::from(e)
    })?;

    // Built once so the channel caches outlive a single invocation.
    let state = Arc::new(AppState::from_config(config).await);

    lambda_runtime::run(lambda_runtime::service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(&state, event).await }
    }))
    .await
}
