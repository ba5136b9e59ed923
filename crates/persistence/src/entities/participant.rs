//! Participant entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{ParticipantRole, ParticipantSource};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for participant_role that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "participant_role", rename_all = "UPPERCASE")]
pub enum ParticipantRoleDb {
    Owner,
    Admin,
    Vip,
    Member,
}

impl From<ParticipantRoleDb> for ParticipantRole {
    fn from(db_role: ParticipantRoleDb) -> Self {
        match db_role {
            ParticipantRoleDb::Owner => ParticipantRole::Owner,
            ParticipantRoleDb::Admin => ParticipantRole::Admin,
            ParticipantRoleDb::Vip => ParticipantRole::Vip,
            ParticipantRoleDb::Member => ParticipantRole::Member,
        }
    }
}

impl From<ParticipantRole> for ParticipantRoleDb {
    fn from(role: ParticipantRole) -> Self {
        match role {
            ParticipantRole::Owner => ParticipantRoleDb::Owner,
            ParticipantRole::Admin => ParticipantRoleDb::Admin,
            ParticipantRole::Vip => ParticipantRoleDb::Vip,
            ParticipantRole::Member => ParticipantRoleDb::Member,
        }
    }
}

/// Database enum for participant_source that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "participant_source", rename_all = "lowercase")]
pub enum ParticipantSourceDb {
    Direct,
    Invitation,
}

impl From<ParticipantSourceDb> for ParticipantSource {
    fn from(db_source: ParticipantSourceDb) -> Self {
        match db_source {
            ParticipantSourceDb::Direct => ParticipantSource::Direct,
            ParticipantSourceDb::Invitation => ParticipantSource::Invitation,
        }
    }
}

impl From<ParticipantSource> for ParticipantSourceDb {
    fn from(source: ParticipantSource) -> Self {
        match source {
            ParticipantSource::Direct => ParticipantSourceDb::Direct,
            ParticipantSource::Invitation => ParticipantSourceDb::Invitation,
        }
    }
}

/// Database row mapping for the participants table.
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantEntity {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRoleDb,
    pub source: ParticipantSourceDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ParticipantEntity> for domain::models::Participant {
    fn from(entity: ParticipantEntity) -> Self {
        Self {
            group_id: entity.group_id,
            user_id: entity.user_id,
            role: entity.role.into(),
            source: entity.source.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_conversion_round_trip() {
        for role in [
            ParticipantRole::Owner,
            ParticipantRole::Admin,
            ParticipantRole::Vip,
            ParticipantRole::Member,
        ] {
            let db: ParticipantRoleDb = role.into();
            assert_eq!(ParticipantRole::from(db), role);
        }
    }

    #[test]
    fn test_source_conversion_round_trip() {
        for source in [ParticipantSource::Direct, ParticipantSource::Invitation] {
            let db: ParticipantSourceDb = source.into();
            assert_eq!(ParticipantSource::from(db), source);
        }
    }
}
