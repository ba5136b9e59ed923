//! User repository.

use sqlx::postgres::PgExecutor;
use uuid::Uuid;

use crate::entities::UserEntity;
use crate::metrics::QueryTimer;

/// Read access to the users table.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by ID.
    pub async fn find_by_id<'e, E>(
        executor: E,
        user_id: Uuid,
    ) -> Result<Option<UserEntity>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT user_id, username, email, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await;
        timer.finish(&result);
        result
    }
}
