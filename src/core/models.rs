use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A public channel the bot account belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub archived: bool,
}

impl Channel {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            archived: false,
        }
    }
}

/// One page of a paginated channel enumeration.
#[derive(Debug, Clone, Default)]
pub struct ChannelPage {
    pub channels: Vec<Channel>,
    /// `None` (or an empty string) marks the last page.
    pub next_cursor: Option<String>,
}

impl ChannelPage {
    /// The cursor for the following page, if there is one.
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// The open channels as of one cache generation, keyed by channel name.
///
/// Names are matched byte-for-byte. When two entries share a name the one
/// inserted last wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSnapshot {
    channels: BTreeMap<String, Channel>,
}

impl ChannelSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a channel unless it is archived.
    pub fn insert(&mut self, channel: Channel) {
        if channel.archived {
            return;
        }
        self.channels.insert(channel.name.clone(), channel);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Channel names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl FromIterator<Channel> for ChannelSnapshot {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for channel in iter {
            snapshot.insert(channel);
        }
        snapshot
    }
}

/// Token used for read-only discovery and posting replies as the bot.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotToken(String);

/// Token used to change channel membership by impersonating the installer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserToken(String);

macro_rules! token_impls {
    ($name:ident) => {
        impl $name {
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn expose(&self) -> &str {
                &self.0
            }

            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(<redacted>)"))
            }
        }
    };
}

token_impls!(BotToken);
token_impls!(UserToken);

/// The pair of tokens installed for one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub user_token: UserToken,
    pub bot_token: BotToken,
}

impl Credential {
    #[must_use]
    pub fn new(user_token: impl Into<String>, bot_token: impl Into<String>) -> Self {
        Self {
            user_token: UserToken::new(user_token),
            bot_token: BotToken::new(bot_token),
        }
    }

    /// A credential is usable only when both tokens are present.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.user_token.is_empty() && !self.bot_token.is_empty()
    }
}

/// Where the reply to a command goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyRoute {
    /// One-shot `response_url` from a slash command; replies are ephemeral.
    ResponseUrl(String),
    /// A conversation the bot posts into, e.g. the DM a message came from.
    Channel(String),
}

/// Everything needed to handle one inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub text: String,
    pub user_id: String,
    pub channel_id: String,
    pub team_id: String,
    pub reply_route: ReplyRoute,
}
