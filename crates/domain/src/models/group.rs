//! Group read-model used by the invitation workflows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::participant::ParticipantRole;
use super::user::User;

/// Represents a group owned by a single user.
///
/// `users_count` is denormalized and must equal the number of participant
/// rows for the group whenever a transaction commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub users_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owner details, attached when the group is returned from a join.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
    /// Role of the requesting user within the group, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ParticipantRole>,
}

impl Group {
    /// Returns true if the given user owns this group.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}
