//! API Lambda handler and request processing

pub mod event_handler;
pub mod handler;
pub mod helpers;
pub mod oauth;
pub mod parsing;
pub mod signature;
pub mod slash_handler;
pub mod state;

// Re-export the main handler for convenience
pub use handler::{handler, route_request};
pub use state::AppState;
