//! All Slack-specific functionality

pub mod client;
pub mod command_parser;
pub mod events;
pub mod factory;
pub mod notifier;
pub mod response_builder;

// Re-export main types for convenience
pub use client::SlackClient;
pub use factory::SlackClientFactory;
pub use notifier::SlackNotifier;
