//! PostgreSQL implementation of the membership store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::errors::StoreError;
use domain::models::{
    Group, GroupInvitation, Participant, ParticipantRole, ParticipantSource, User,
};
use domain::store::{MembershipStore, MembershipTx};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::map_sqlx_error;
use crate::metrics::record_transaction_outcome;
use crate::repositories::{
    GroupInvitationRepository, GroupRepository, ParticipantRepository, UserRepository,
};

/// Opens SERIALIZABLE transactions on a connection pool.
#[derive(Clone)]
pub struct PgMembershipStore {
    pool: PgPool,
}

impl PgMembershipStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipStore for PgMembershipStore {
    type Tx = PgMembershipTx;

    async fn begin(&self) -> Result<Self::Tx, StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // Must be the first statement of the transaction.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(PgMembershipTx { tx })
    }
}

/// An open PostgreSQL transaction. Dropping it rolls back.
pub struct PgMembershipTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl MembershipTx for PgMembershipTx {
    async fn count_invitations(&mut self, group_id: Uuid) -> Result<i64, StoreError> {
        GroupInvitationRepository::count_by_group(&mut *self.tx, group_id)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_invitation_by_group_and_email(
        &mut self,
        group_id: Uuid,
        email: &str,
    ) -> Result<Option<GroupInvitation>, StoreError> {
        let entity =
            GroupInvitationRepository::find_by_group_and_email(&mut *self.tx, group_id, email)
                .await
                .map_err(map_sqlx_error)?;
        Ok(entity.map(Into::into))
    }

    async fn insert_invitation(&mut self, invitation: &GroupInvitation) -> Result<(), StoreError> {
        GroupInvitationRepository::insert(&mut *self.tx, invitation)
            .await
            .map_err(map_sqlx_error)
    }

    async fn delete_invitation(&mut self, invitation_id: Uuid) -> Result<(), StoreError> {
        GroupInvitationRepository::delete_by_id(&mut *self.tx, invitation_id)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn mark_invitation_sent(
        &mut self,
        invitation_id: Uuid,
        sent_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let rows = GroupInvitationRepository::mark_sent(&mut *self.tx, invitation_id, sent_at)
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows > 0)
    }

    async fn find_group(&mut self, group_id: Uuid) -> Result<Option<Group>, StoreError> {
        let entity = GroupRepository::find_by_id(&mut *self.tx, group_id)
            .await
            .map_err(map_sqlx_error)?;
        Ok(entity.map(Into::into))
    }

    async fn find_user(&mut self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        let entity = UserRepository::find_by_id(&mut *self.tx, user_id)
            .await
            .map_err(map_sqlx_error)?;
        Ok(entity.map(Into::into))
    }

    async fn count_participants(&mut self, group_id: Uuid) -> Result<i64, StoreError> {
        ParticipantRepository::count_by_group(&mut *self.tx, group_id)
            .await
            .map_err(map_sqlx_error)
    }

    async fn update_users_count(
        &mut self,
        group_id: Uuid,
        users_count: i64,
    ) -> Result<(), StoreError> {
        GroupRepository::update_users_count(&mut *self.tx, group_id, users_count)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn create_participant(
        &mut self,
        group_id: Uuid,
        user_id: Uuid,
        role: ParticipantRole,
        source: ParticipantSource,
    ) -> Result<Participant, StoreError> {
        let entity = ParticipantRepository::create(
            &mut *self.tx,
            group_id,
            user_id,
            role.into(),
            source.into(),
        )
        .await
        .map_err(map_sqlx_error)?;
        Ok(entity.into())
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        record_transaction_outcome("committed");
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        record_transaction_outcome("rolled_back");
        Ok(())
    }
}
