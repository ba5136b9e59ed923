//! Invitation issuance and redemption.

use std::time::Duration;

use chrono::{DateTime, Utc};
use shared::crypto::{generate_verification_code, CodeGenerationError};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::errors::InvitationError;
use crate::models::{
    Group, GroupInvitation, ParticipantRole, ParticipantSource, User, MAX_GROUP_INVITATIONS,
};
use crate::store::{run_in_transaction, MembershipStore, MembershipTx};

/// Source of invitation verification codes.
pub type CodeGenerator = fn() -> Result<String, CodeGenerationError>;

/// Runs the invitation workflows against a [`MembershipStore`].
///
/// Each operation is one transaction. There is no in-process locking; the
/// store's isolation and constraints serialize conflicting calls.
pub struct InvitationService<S> {
    store: S,
    code_generator: CodeGenerator,
    transaction_timeout: Option<Duration>,
}

impl<S: MembershipStore> InvitationService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            code_generator: generate_verification_code,
            transaction_timeout: None,
        }
    }

    /// Replaces the verification code source.
    pub fn with_code_generator(mut self, code_generator: CodeGenerator) -> Self {
        self.code_generator = code_generator;
        self
    }

    /// Aborts and rolls back any transaction running longer than `timeout`.
    pub fn with_transaction_timeout(mut self, timeout: Duration) -> Self {
        self.transaction_timeout = Some(timeout);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Invites `email` to the group on behalf of its owner.
    ///
    /// Returns `Ok(None)` when the group does not exist.
    pub async fn create_invitation(
        &self,
        acting_user: &User,
        group_id: Uuid,
        email: &str,
    ) -> Result<Option<GroupInvitation>, InvitationError> {
        let user_id = acting_user.id;
        let email = email.to_string();
        let code_generator = self.code_generator;

        let result = run_in_transaction(&self.store, self.transaction_timeout, move |tx| {
            Box::pin(issue(tx, user_id, group_id, email, code_generator))
        })
        .await;

        match &result {
            Ok(Some(invitation)) => info!(
                group_id = %group_id,
                invitation_id = %invitation.id,
                user_id = %user_id,
                "Group invitation created"
            ),
            Ok(None) => debug!(
                group_id = %group_id,
                user_id = %user_id,
                "Group not found, no invitation created"
            ),
            Err(e) => log_failure("create_invitation", group_id, user_id, e),
        }
        result
    }

    /// Redeems the acting user's invitation to the group.
    ///
    /// Returns the group, enriched with its owner and updated member count.
    /// Returns `Ok(None)` when the group does not exist or holds no
    /// invitation for the user's email.
    pub async fn join_by_invitation(
        &self,
        acting_user: &User,
        group_id: Uuid,
        code: &str,
    ) -> Result<Option<Group>, InvitationError> {
        let user = acting_user.clone();
        let user_id = user.id;
        let code = code.to_string();

        let result = run_in_transaction(&self.store, self.transaction_timeout, move |tx| {
            Box::pin(redeem(tx, user, group_id, code))
        })
        .await;

        match &result {
            Ok(Some(group)) => info!(
                group_id = %group_id,
                user_id = %user_id,
                users_count = group.users_count,
                "Joined group by invitation"
            ),
            Ok(None) => debug!(
                group_id = %group_id,
                user_id = %user_id,
                "No group or pending invitation, nothing to redeem"
            ),
            Err(e) => log_failure("join_by_invitation", group_id, user_id, e),
        }
        result
    }

    /// Records that the invitation email was dispatched.
    ///
    /// Returns false if the invitation has already been redeemed or removed.
    pub async fn mark_invitation_sent(
        &self,
        invitation_id: Uuid,
        sent_at: DateTime<Utc>,
    ) -> Result<bool, InvitationError> {
        run_in_transaction(&self.store, self.transaction_timeout, move |tx| {
            Box::pin(async move {
                let updated = tx.mark_invitation_sent(invitation_id, sent_at).await?;
                Ok::<bool, InvitationError>(updated)
            })
        })
        .await
    }
}

async fn issue<Tx: MembershipTx>(
    tx: &mut Tx,
    user_id: Uuid,
    group_id: Uuid,
    email: String,
    code_generator: CodeGenerator,
) -> Result<Option<GroupInvitation>, InvitationError> {
    let count = tx.count_invitations(group_id).await?;
    if count >= MAX_GROUP_INVITATIONS {
        return Err(InvitationError::TooManyInvitations);
    }

    let Some(group) = tx.find_group(group_id).await? else {
        return Ok(None);
    };
    if !group.is_owned_by(user_id) {
        return Err(InvitationError::Forbidden);
    }

    let invitation = GroupInvitation::new(group.id, email, code_generator()?);
    tx.insert_invitation(&invitation).await?;
    Ok(Some(invitation))
}

async fn redeem<Tx: MembershipTx>(
    tx: &mut Tx,
    user: User,
    group_id: Uuid,
    code: String,
) -> Result<Option<Group>, InvitationError> {
    let Some(mut group) = tx.find_group(group_id).await? else {
        return Ok(None);
    };
    // Without an email the user cannot hold an invitation.
    let Some(email) = user.email.as_deref() else {
        return Ok(None);
    };
    let Some(invitation) = tx.find_invitation_by_group_and_email(group.id, email).await? else {
        return Ok(None);
    };
    if !invitation.matches_code(&code) {
        return Err(InvitationError::InvalidInvitationCode);
    }

    group.owner = tx.find_user(group.owner_id).await?;

    let count = tx.count_participants(group.id).await?;
    group.users_count = count + 1;
    tx.update_users_count(group.id, group.users_count).await?;

    group.role = Some(ParticipantRole::Vip);
    tx.create_participant(
        group.id,
        user.id,
        ParticipantRole::Vip,
        ParticipantSource::Invitation,
    )
    .await?;

    tx.delete_invitation(invitation.id).await?;
    Ok(Some(group))
}

fn log_failure(operation: &str, group_id: Uuid, user_id: Uuid, err: &InvitationError) {
    if err.is_condition() {
        warn!(
            operation,
            group_id = %group_id,
            user_id = %user_id,
            reason = err.reason(),
            "Invitation request rejected"
        );
    } else {
        error!(
            operation,
            group_id = %group_id,
            user_id = %user_id,
            error = %err,
            "Invitation transaction failed"
        );
    }
}
