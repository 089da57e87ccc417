//! Hand-written fakes for the collaborator traits.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use invitechan::SlackError;
use invitechan::core::cache::{CacheRegistry, RefreshPolicy};
use invitechan::core::credentials::{CredentialResolver, InMemoryCredentialStore};
use invitechan::core::dispatcher::CommandDispatcher;
use invitechan::core::models::{
    BotToken, Channel, ChannelPage, CommandContext, Credential, ReplyRoute, UserToken,
};
use invitechan::core::ports::{
    ChannelDirectory, ClientFactory, CredentialStore, MembershipActuator, Notifier,
};

pub const USER_TOKEN: &str = "xoxp-user";
pub const BOT_TOKEN: &str = "xoxb-bot";

pub fn channel(id: &str, name: &str) -> Channel {
    Channel::new(id, name)
}

/// Serves fixed pages. Page `n` is requested with cursor `c{n}`.
pub struct ScriptedDirectory {
    pages: Mutex<Vec<Vec<Channel>>>,
    fail_on_page: Mutex<Option<usize>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedDirectory {
    pub fn new(pages: Vec<Vec<Channel>>) -> Self {
        Self {
            pages: Mutex::new(pages),
            fail_on_page: Mutex::new(None),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_pages(&self, pages: Vec<Vec<Channel>>) {
        *self.pages.lock().unwrap() = pages;
    }

    pub fn fail_on_page(&self, page: Option<usize>) {
        *self.fail_on_page.lock().unwrap() = page;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChannelDirectory for ScriptedDirectory {
    async fn list_member_channels(&self, cursor: Option<&str>) -> Result<ChannelPage, SlackError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let index = cursor
            .and_then(|c| c.trim_start_matches('c').parse::<usize>().ok())
            .unwrap_or(0);

        if *self.fail_on_page.lock().unwrap() == Some(index) {
            return Err(SlackError::ApiError("ratelimited".to_string()));
        }

        let pages = self.pages.lock().unwrap();
        let channels = pages.get(index).cloned().unwrap_or_default();
        let next_cursor = (index + 1 < pages.len()).then(|| format!("c{}", index + 1));
        Ok(ChannelPage {
            channels,
            next_cursor,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipCall {
    Add { channel_id: String, user_id: String },
    Remove { channel_id: String, user_id: String },
}

/// Records membership calls and answers with a scripted error, if any.
#[derive(Default)]
pub struct RecordingActuator {
    calls: Mutex<Vec<MembershipCall>>,
    failure: Mutex<Option<String>>,
}

impl RecordingActuator {
    pub fn fail_with(&self, code: Option<&str>) {
        *self.failure.lock().unwrap() = code.map(ToString::to_string);
    }

    pub fn calls(&self) -> Vec<MembershipCall> {
        self.calls.lock().unwrap().clone()
    }

    fn outcome(&self) -> Result<(), SlackError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(code) => Err(SlackError::ActuatorError(code.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MembershipActuator for RecordingActuator {
    async fn add_member(&self, channel_id: &str, user_id: &str) -> Result<(), SlackError> {
        self.calls.lock().unwrap().push(MembershipCall::Add {
            channel_id: channel_id.to_string(),
            user_id: user_id.to_string(),
        });
        self.outcome()
    }

    async fn remove_member(&self, channel_id: &str, user_id: &str) -> Result<(), SlackError> {
        self.calls.lock().unwrap().push(MembershipCall::Remove {
            channel_id: channel_id.to_string(),
            user_id: user_id.to_string(),
        });
        self.outcome()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    replies: Mutex<Vec<(ReplyRoute, String)>>,
}

impl RecordingNotifier {
    pub fn replies(&self) -> Vec<(ReplyRoute, String)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.replies().into_iter().map(|(_, text)| text).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn reply(&self, route: &ReplyRoute, text: &str) -> Result<(), SlackError> {
        self.replies
            .lock()
            .unwrap()
            .push((route.clone(), text.to_string()));
        Ok(())
    }
}

/// Hands out the shared fakes and remembers which token each was asked for.
pub struct FakeClients {
    pub directory: Arc<ScriptedDirectory>,
    pub actuator: Arc<RecordingActuator>,
    pub notifier: Arc<RecordingNotifier>,
    pub directory_tokens: Mutex<Vec<String>>,
    pub actuator_tokens: Mutex<Vec<String>>,
    pub notifier_tokens: Mutex<Vec<Option<String>>>,
}

impl FakeClients {
    pub fn new(directory: ScriptedDirectory) -> Arc<Self> {
        Arc::new(Self {
            directory: Arc::new(directory),
            actuator: Arc::new(RecordingActuator::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            directory_tokens: Mutex::new(Vec::new()),
            actuator_tokens: Mutex::new(Vec::new()),
            notifier_tokens: Mutex::new(Vec::new()),
        })
    }
}

impl ClientFactory for FakeClients {
    fn directory(&self, token: &BotToken) -> Arc<dyn ChannelDirectory> {
        self.directory_tokens
            .lock()
            .unwrap()
            .push(token.expose().to_string());
        self.directory.clone()
    }

    fn actuator(&self, token: &UserToken) -> Arc<dyn MembershipActuator> {
        self.actuator_tokens
            .lock()
            .unwrap()
            .push(token.expose().to_string());
        self.actuator.clone()
    }

    fn notifier(&self, token: Option<&BotToken>) -> Arc<dyn Notifier> {
        self.notifier_tokens
            .lock()
            .unwrap()
            .push(token.map(|t| t.expose().to_string()));
        self.notifier.clone()
    }
}

/// Dispatcher running on the fixed test credential.
pub fn dispatcher(clients: &Arc<FakeClients>, policy: RefreshPolicy) -> CommandDispatcher {
    let resolver = CredentialResolver::new(
        Some(Credential::new(USER_TOKEN, BOT_TOKEN)),
        Arc::new(InMemoryCredentialStore::new()),
    );
    CommandDispatcher::new(resolver, CacheRegistry::new(policy), clients.clone())
}

/// Dispatcher with no fixed credential, backed by `store`.
pub fn dispatcher_with_store(
    clients: &Arc<FakeClients>,
    store: Arc<dyn CredentialStore>,
) -> CommandDispatcher {
    let resolver = CredentialResolver::new(None, store);
    CommandDispatcher::new(
        resolver,
        CacheRegistry::new(RefreshPolicy::Once),
        clients.clone(),
    )
}

pub fn dm(text: &str) -> CommandContext {
    CommandContext {
        text: text.to_string(),
        user_id: "U1".to_string(),
        channel_id: "D1".to_string(),
        team_id: "T1".to_string(),
        reply_route: ReplyRoute::Channel("D1".to_string()),
    }
}
