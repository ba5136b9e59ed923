//! Store contracts for the invitation workflows.
//!
//! A [`MembershipStore`] opens transactions. Every read and write of the
//! workflows goes through the [`MembershipTx`] it returns, so all of them
//! commit or roll back together.

pub mod memory;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::time::{timeout_at, Instant};
use uuid::Uuid;

use crate::errors::{InvitationError, StoreError};
use crate::models::{
    Group, GroupInvitation, Participant, ParticipantRole, ParticipantSource, User,
};

pub use memory::InMemoryMembershipStore;

/// Boxed future returned by a transaction body.
pub type TxFuture<'t, T> = Pin<Box<dyn Future<Output = Result<T, InvitationError>> + Send + 't>>;

/// Opens atomic units of work.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    type Tx: MembershipTx;

    /// Begins a new transaction.
    async fn begin(&self) -> Result<Self::Tx, StoreError>;
}

/// A single open transaction.
///
/// Dropping a transaction without calling [`MembershipTx::commit`] discards
/// every write made through it.
#[async_trait]
pub trait MembershipTx: Send {
    // Invitations

    async fn count_invitations(&mut self, group_id: Uuid) -> Result<i64, StoreError>;

    async fn find_invitation_by_group_and_email(
        &mut self,
        group_id: Uuid,
        email: &str,
    ) -> Result<Option<GroupInvitation>, StoreError>;

    /// Inserts an invitation, failing on a duplicate `(group_id, email)` pair
    /// or when the group is already at capacity.
    async fn insert_invitation(&mut self, invitation: &GroupInvitation) -> Result<(), StoreError>;

    /// Removes an invitation. Removing an absent invitation is not an error.
    async fn delete_invitation(&mut self, invitation_id: Uuid) -> Result<(), StoreError>;

    /// Records when the invitation email was dispatched. Returns false if the
    /// invitation no longer exists.
    async fn mark_invitation_sent(
        &mut self,
        invitation_id: Uuid,
        sent_at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    // Membership read-model

    async fn find_group(&mut self, group_id: Uuid) -> Result<Option<Group>, StoreError>;

    async fn find_user(&mut self, user_id: Uuid) -> Result<Option<User>, StoreError>;

    async fn count_participants(&mut self, group_id: Uuid) -> Result<i64, StoreError>;

    async fn update_users_count(
        &mut self,
        group_id: Uuid,
        users_count: i64,
    ) -> Result<(), StoreError>;

    async fn create_participant(
        &mut self,
        group_id: Uuid,
        user_id: Uuid,
        role: ParticipantRole,
        source: ParticipantSource,
    ) -> Result<Participant, StoreError>;

    // Boundary

    async fn commit(self) -> Result<(), StoreError>;

    async fn rollback(self) -> Result<(), StoreError>;
}

/// Runs `body` inside a single transaction.
///
/// The transaction is committed when `body` returns `Ok` and rolled back when
/// it returns `Err` or exceeds `deadline`. The deadline covers `begin`, so
/// time spent waiting for a connection counts against it. If the returned
/// future is dropped mid-flight the open transaction is dropped with it,
/// which rolls it back.
pub async fn run_in_transaction<S, T, F>(
    store: &S,
    deadline: Option<Duration>,
    body: F,
) -> Result<T, InvitationError>
where
    S: MembershipStore + ?Sized,
    T: Send,
    F: for<'t> FnOnce(&'t mut S::Tx) -> TxFuture<'t, T> + Send,
{
    let expires_at = deadline.map(|limit| Instant::now() + limit);

    let mut tx = match expires_at {
        Some(at) => timeout_at(at, store.begin()).await.map_err(|_| timed_out())??,
        None => store.begin().await?,
    };

    let outcome = match expires_at {
        Some(at) => match timeout_at(at, body(&mut tx)).await {
            Ok(result) => result,
            Err(_) => Err(timed_out()),
        },
        None => body(&mut tx).await,
    };

    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}

fn timed_out() -> InvitationError {
    InvitationError::Transaction(StoreError::Timeout)
}
