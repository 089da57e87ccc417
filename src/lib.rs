//! invitechan - lets multi-channel guests of a Slack workspace join and leave
//! "open" public channels on their own.
//!
//! A channel is open when the bot account has been added to it. Guests send
//! `list`, `join <channel>` or `leave <channel>` as a slash command or a DM;
//! the bot checks the channel against its cached view of open channels and
//! invites or removes the guest using the installing user's token.
//!
//! # Architecture
//!
//! - AWS Lambda (`lambda_runtime`) hosts the HTTP endpoints
//! - slack-morphism for Slack Web API calls
//! - SSM Parameter Store for per-workspace tokens
//! - Tokio for the async runtime
//!
//! # Example
//!
//! ```
//! use invitechan::core::intent::Intent;
//!
//! assert_eq!(
//!     Intent::parse("leave random"),
//!     Intent::LeaveChannel { name: "random".to_string() }
//! );
//! ```

pub mod api;
pub mod core;
pub mod errors;
pub mod slack;

pub use errors::SlackError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch`
/// Logs. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// invitechan::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
