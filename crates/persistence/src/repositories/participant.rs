//! Participant repository.

use sqlx::postgres::PgExecutor;
use uuid::Uuid;

use crate::entities::{ParticipantEntity, ParticipantRoleDb, ParticipantSourceDb};
use crate::metrics::QueryTimer;

/// Queries over the participants table.
pub struct ParticipantRepository;

impl ParticipantRepository {
    /// Count participants of a group.
    pub async fn count_by_group<'e, E>(executor: E, group_id: Uuid) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let timer = QueryTimer::new("count_participants");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM participants WHERE group_id = $1
            "#,
        )
        .bind(group_id)
        .fetch_one(executor)
        .await;
        timer.finish(&result);
        result
    }

    /// Add a user to a group.
    pub async fn create<'e, E>(
        executor: E,
        group_id: Uuid,
        user_id: Uuid,
        role: ParticipantRoleDb,
        source: ParticipantSourceDb,
    ) -> Result<ParticipantEntity, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let timer = QueryTimer::new("create_participant");
        let result = sqlx::query_as::<_, ParticipantEntity>(
            r#"
            INSERT INTO participants (group_id, user_id, role, source)
            VALUES ($1, $2, $3, $4)
            RETURNING group_id, user_id, role, source, created_at, updated_at
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .bind(role)
        .bind(source)
        .fetch_one(executor)
        .await;
        timer.finish(&result);
        result
    }
}
