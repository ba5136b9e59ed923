//! Group invitation repository.

use chrono::{DateTime, Utc};
use domain::models::GroupInvitation;
use sqlx::postgres::PgExecutor;
use uuid::Uuid;

use crate::entities::GroupInvitationEntity;
use crate::metrics::QueryTimer;

/// Queries over the group_invitations table.
pub struct GroupInvitationRepository;

impl GroupInvitationRepository {
    /// Count outstanding invitations for a group.
    pub async fn count_by_group<'e, E>(executor: E, group_id: Uuid) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let timer = QueryTimer::new("count_group_invitations");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM group_invitations WHERE group_id = $1
            "#,
        )
        .bind(group_id)
        .fetch_one(executor)
        .await;
        timer.finish(&result);
        result
    }

    /// Find the invitation for an email within a group.
    pub async fn find_by_group_and_email<'e, E>(
        executor: E,
        group_id: Uuid,
        email: &str,
    ) -> Result<Option<GroupInvitationEntity>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let timer = QueryTimer::new("find_group_invitation_by_email");
        let result = sqlx::query_as::<_, GroupInvitationEntity>(
            r#"
            SELECT invitation_id, group_id, email, code, sent_at, created_at
            FROM group_invitations
            WHERE group_id = $1 AND email = $2
            LIMIT 1
            "#,
        )
        .bind(group_id)
        .bind(email)
        .fetch_optional(executor)
        .await;
        timer.finish(&result);
        result
    }

    /// Insert a new invitation.
    ///
    /// Fails with a unique violation on a duplicate (group, email) pair and
    /// with a check violation when the group is at capacity.
    pub async fn insert<'e, E>(executor: E, invitation: &GroupInvitation) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let timer = QueryTimer::new("insert_group_invitation");
        let result = sqlx::query(
            r#"
            INSERT INTO group_invitations
                (invitation_id, group_id, email, code, sent_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(invitation.id)
        .bind(invitation.group_id)
        .bind(&invitation.email)
        .bind(&invitation.code)
        .bind(invitation.sent_at)
        .bind(invitation.created_at)
        .execute(executor)
        .await;
        timer.finish(&result);
        result.map(|_| ())
    }

    /// Delete an invitation. Returns the number of rows removed (0 if already gone).
    pub async fn delete_by_id<'e, E>(executor: E, invitation_id: Uuid) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let timer = QueryTimer::new("delete_group_invitation");
        let result = sqlx::query(
            r#"
            DELETE FROM group_invitations WHERE invitation_id = $1
            "#,
        )
        .bind(invitation_id)
        .execute(executor)
        .await;
        timer.finish(&result);
        Ok(result?.rows_affected())
    }

    /// Record when the invitation email was dispatched.
    pub async fn mark_sent<'e, E>(
        executor: E,
        invitation_id: Uuid,
        sent_at: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let timer = QueryTimer::new("mark_group_invitation_sent");
        let result = sqlx::query(
            r#"
            UPDATE group_invitations SET sent_at = $2 WHERE invitation_id = $1
            "#,
        )
        .bind(invitation_id)
        .bind(sent_at)
        .execute(executor)
        .await;
        timer.finish(&result);
        Ok(result?.rows_affected())
    }
}
