//! Cached view of the channels that are open to guests.
//!
//! Enumerating every channel the bot is in costs one API call per page, so
//! the result is kept in a [`ChannelCache`]. Refreshes are single-flight:
//! while one caller walks the directory, everyone else waits on the same
//! guard and picks up the snapshot it publishes. Readers of the published
//! snapshot never wait on a refresh.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::models::{Channel, ChannelSnapshot};
use super::ports::ChannelDirectory;
use crate::errors::SlackError;

/// When [`ChannelCache::snapshot`] goes back to the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Enumerate once and keep the result for the life of the process.
    ///
    /// A Lambda container serves few requests before it is recycled, so an
    /// indefinitely cached snapshot is usually fresh enough.
    #[default]
    Once,
    /// Enumerate on every call.
    PerCall,
}

impl FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "once" => Ok(RefreshPolicy::Once),
            "per-call" | "per_call" | "always" => Ok(RefreshPolicy::PerCall),
            other => Err(format!("unknown channel cache policy '{other}'")),
        }
    }
}

pub struct ChannelCache {
    policy: RefreshPolicy,
    current: RwLock<Option<Arc<ChannelSnapshot>>>,
    /// Bumped after every finished refresh attempt, failed ones included;
    /// lets waiters tell that an attempt completed while they were queued.
    attempts: AtomicU64,
    /// Outcome of the latest attempt, handed to the callers that waited on it.
    in_flight: Mutex<Option<Result<Arc<ChannelSnapshot>, SlackError>>>,
}

impl ChannelCache {
    #[must_use]
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            policy,
            current: RwLock::new(None),
            attempts: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// The last published snapshot, without any I/O.
    pub async fn cached(&self) -> Option<Arc<ChannelSnapshot>> {
        self.current.read().await.clone()
    }

    /// The current open-channel snapshot, refreshing according to the policy.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::DirectoryError`] if a refresh was needed and any
    /// page failed. The previously published snapshot is left in place.
    pub async fn snapshot<D>(&self, directory: &D) -> Result<Arc<ChannelSnapshot>, SlackError>
    where
        D: ChannelDirectory + ?Sized,
    {
        // Read the counter before the cache so a publish racing with this
        // check is still seen once the guard is acquired.
        let observed = self.attempts.load(Ordering::Acquire);
        if self.policy == RefreshPolicy::Once {
            if let Some(snapshot) = self.cached().await {
                debug!(channels = snapshot.len(), "Channel cache hit");
                return Ok(snapshot);
            }
        }
        self.refresh_after(directory, observed).await
    }

    /// Enumerate the directory and publish the result, regardless of policy.
    ///
    /// Callers that arrive while another refresh is running wait for it and
    /// return its outcome, success or error, instead of starting their own.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::DirectoryError`] if any page failed.
    pub async fn refresh<D>(&self, directory: &D) -> Result<Arc<ChannelSnapshot>, SlackError>
    where
        D: ChannelDirectory + ?Sized,
    {
        let observed = self.attempts.load(Ordering::Acquire);
        self.refresh_after(directory, observed).await
    }

    async fn refresh_after<D>(
        &self,
        directory: &D,
        observed: u64,
    ) -> Result<Arc<ChannelSnapshot>, SlackError>
    where
        D: ChannelDirectory + ?Sized,
    {
        let mut last = self.in_flight.lock().await;

        if self.attempts.load(Ordering::Acquire) != observed {
            if let Some(outcome) = last.as_ref() {
                debug!(
                    succeeded = outcome.is_ok(),
                    "Joined channel refresh completed by another caller"
                );
                return outcome.clone();
            }
        }

        let outcome = enumerate(directory).await.map(Arc::new);
        if let Ok(snapshot) = &outcome {
            *self.current.write().await = Some(Arc::clone(snapshot));
            info!(channels = snapshot.len(), "Published channel snapshot");
        }

        *last = Some(outcome.clone());
        self.attempts.fetch_add(1, Ordering::AcqRel);
        outcome
    }

    /// Find one channel by exact name.
    ///
    /// Uses the published snapshot when there is one. Otherwise pages through
    /// the directory only until the name shows up; that partial result is
    /// never published.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::DirectoryError`] if a page fetch failed before
    /// the name was found.
    pub async fn lookup<D>(&self, directory: &D, name: &str) -> Result<Option<Channel>, SlackError>
    where
        D: ChannelDirectory + ?Sized,
    {
        if let Some(snapshot) = self.cached().await {
            return Ok(snapshot.get(name).cloned());
        }

        let mut cursor: Option<String> = None;
        loop {
            let page = directory
                .list_member_channels(cursor.as_deref())
                .await
                .map_err(into_directory_error)?;

            // Later pages overwrite earlier ones, same as a full enumeration.
            let mut found = None;
            for channel in &page.channels {
                if channel.name == name && !channel.archived {
                    found = Some(channel.clone());
                }
            }
            if found.is_some() {
                return Ok(found);
            }

            match page.continuation() {
                Some(next) => cursor = Some(next.to_string()),
                None => return Ok(None),
            }
        }
    }
}

async fn enumerate<D>(directory: &D) -> Result<ChannelSnapshot, SlackError>
where
    D: ChannelDirectory + ?Sized,
{
    let mut snapshot = ChannelSnapshot::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = directory
            .list_member_channels(cursor.as_deref())
            .await
            .map_err(|e| {
                warn!(pages_fetched = pages, "Channel enumeration failed: {}", e);
                into_directory_error(e)
            })?;
        pages += 1;

        let next = page.continuation().map(ToString::to_string);
        for channel in page.channels {
            snapshot.insert(channel);
        }

        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!(pages, channels = snapshot.len(), "Channel enumeration complete");
    Ok(snapshot)
}

fn into_directory_error(error: SlackError) -> SlackError {
    match error {
        SlackError::DirectoryError(_) => error,
        other => SlackError::DirectoryError(other.to_string()),
    }
}

/// One [`ChannelCache`] per workspace.
pub struct CacheRegistry {
    policy: RefreshPolicy,
    caches: Mutex<HashMap<String, Arc<ChannelCache>>>,
}

impl CacheRegistry {
    #[must_use]
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            policy,
            caches: Mutex::new(HashMap::new()),
        }
    }

    /// The shared cache for `team_id`, created on first use.
    pub async fn for_team(&self, team_id: &str) -> Arc<ChannelCache> {
        let mut caches = self.caches.lock().await;
        Arc::clone(
            caches
                .entry(team_id.to_string())
                .or_insert_with(|| Arc::new(ChannelCache::new(self.policy))),
        )
    }
}
