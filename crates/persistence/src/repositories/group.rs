//! Group repository.

use sqlx::postgres::PgExecutor;
use uuid::Uuid;

use crate::entities::GroupEntity;
use crate::metrics::QueryTimer;

/// Queries over the groups table needed by the invitation workflows.
pub struct GroupRepository;

impl GroupRepository {
    /// Find a group by ID.
    pub async fn find_by_id<'e, E>(
        executor: E,
        group_id: Uuid,
    ) -> Result<Option<GroupEntity>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let timer = QueryTimer::new("find_group_by_id");
        let result = sqlx::query_as::<_, GroupEntity>(
            r#"
            SELECT group_id, name, user_id, users_count, created_at, updated_at
            FROM groups
            WHERE group_id = $1
            "#,
        )
        .bind(group_id)
        .fetch_optional(executor)
        .await;
        timer.finish(&result);
        result
    }

    /// Overwrite the denormalized member count.
    pub async fn update_users_count<'e, E>(
        executor: E,
        group_id: Uuid,
        users_count: i64,
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let timer = QueryTimer::new("update_group_users_count");
        let result = sqlx::query(
            r#"
            UPDATE groups
            SET users_count = $2, updated_at = NOW()
            WHERE group_id = $1
            "#,
        )
        .bind(group_id)
        .bind(users_count)
        .execute(executor)
        .await;
        timer.finish(&result);
        Ok(result?.rows_affected())
    }
}
