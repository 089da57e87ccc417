//! Command handling, channel caching and credential resolution

pub mod cache;
pub mod config;
pub mod credentials;
pub mod dispatcher;
pub mod intent;
pub mod membership;
pub mod models;
pub mod ports;
pub mod replies;

pub use cache::{CacheRegistry, ChannelCache, RefreshPolicy};
pub use dispatcher::CommandDispatcher;
pub use intent::Intent;
