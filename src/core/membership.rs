use std::sync::Arc;
use tracing::{info, warn};

use super::models::Channel;
use super::ports::MembershipActuator;
use crate::errors::SlackError;

/// Invites guests to and removes them from open channels.
///
/// The actuator must act with the installing user's token: the bot account
/// is not allowed to change other users' membership.
pub struct MembershipService {
    actuator: Arc<dyn MembershipActuator>,
}

impl MembershipService {
    #[must_use]
    pub fn new(actuator: Arc<dyn MembershipActuator>) -> Self {
        Self { actuator }
    }

    /// Add `user_id` to `channel`. No retries; "already a member" and other
    /// platform answers come back unchanged.
    ///
    /// # Errors
    ///
    /// Returns the actuator's error as-is.
    pub async fn invite(&self, channel: &Channel, user_id: &str) -> Result<(), SlackError> {
        info!(channel_id = %channel.id, channel = %channel.name, user_id = %user_id, "Inviting user");
        self.actuator
            .add_member(&channel.id, user_id)
            .await
            .inspect_err(|e| warn!(channel_id = %channel.id, user_id = %user_id, "Invite failed: {}", e))
    }

    /// Remove `user_id` from `channel`.
    ///
    /// # Errors
    ///
    /// Returns the actuator's error as-is.
    pub async fn leave(&self, channel: &Channel, user_id: &str) -> Result<(), SlackError> {
        info!(channel_id = %channel.id, channel = %channel.name, user_id = %user_id, "Removing user");
        self.actuator
            .remove_member(&channel.id, user_id)
            .await
            .inspect_err(|e| warn!(channel_id = %channel.id, user_id = %user_id, "Removal failed: {}", e))
    }
}
