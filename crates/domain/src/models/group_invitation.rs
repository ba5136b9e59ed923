//! Group invitation models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Maximum number of outstanding invitations a group may hold.
pub const MAX_GROUP_INVITATIONS: i64 = 7;

/// An outstanding, single-use offer to join a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupInvitation {
    pub id: Uuid,
    pub group_id: Uuid,
    pub email: String,
    pub code: String,
    /// Set by the external notifier once the invitation email is dispatched.
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl GroupInvitation {
    /// Creates a fresh, unsent invitation with a new identifier.
    pub fn new(group_id: Uuid, email: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            email: email.into(),
            code: code.into(),
            sent_at: None,
            created_at: Utc::now(),
        }
    }

    /// Returns true if the supplied code matches, ignoring surrounding whitespace.
    pub fn matches_code(&self, supplied: &str) -> bool {
        self.code == supplied.trim()
    }
}

/// Request to invite an email address to a group.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateGroupInvitationRequest {
    #[validate(
        email(message = "Invalid email address"),
        length(max = 512, message = "Email must be at most 512 characters")
    )]
    pub email: String,
}

/// Request to join a group with an invitation code.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct JoinGroupByInvitationRequest {
    #[validate(length(min = 1, max = 128, message = "Code must be between 1 and 128 characters"))]
    pub code: String,
}
