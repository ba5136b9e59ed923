//! Group invitation entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the group_invitations table.
#[derive(Debug, Clone, FromRow)]
pub struct GroupInvitationEntity {
    pub invitation_id: Uuid,
    pub group_id: Uuid,
    pub email: String,
    pub code: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<GroupInvitationEntity> for domain::models::GroupInvitation {
    fn from(entity: GroupInvitationEntity) -> Self {
        Self {
            id: entity.invitation_id,
            group_id: entity.group_id,
            email: entity.email,
            code: entity.code,
            sent_at: entity.sent_at,
            created_at: entity.created_at,
        }
    }
}
