//! Group entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the groups table.
#[derive(Debug, Clone, FromRow)]
pub struct GroupEntity {
    pub group_id: Uuid,
    pub name: String,
    /// Owner of the group (`groups.user_id`).
    pub user_id: Uuid,
    pub users_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GroupEntity> for domain::models::Group {
    fn from(entity: GroupEntity) -> Self {
        Self {
            id: entity.group_id,
            name: entity.name,
            owner_id: entity.user_id,
            users_count: entity.users_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            owner: None,
            role: None,
        }
    }
}
