//! Presence channel member data.
//!
//! Presence channels track who is subscribed, so their auth tokens carry
//! the subscribing user's id and optional public info.

use serde::{Deserialize, Serialize};

/// Member data signed into a presence channel auth token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceMember {
    /// Application-defined user id.
    pub user_id: String,
    /// Optional info shared with other members.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<serde_json::Value>,
}

impl PresenceMember {
    /// Create a member with no user info.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_info: None,
        }
    }

    /// Attach user info.
    #[must_use]
    pub fn with_info(mut self, info: serde_json::Value) -> Self {
        self.user_info = Some(info);
        self
    }
}
