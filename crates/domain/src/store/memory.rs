//! In-memory membership store.
//!
//! Transactions take an exclusive lock on the whole state and work on a
//! private copy that replaces the shared state on commit, which makes every
//! transaction serializable. Used for development and for exercising the
//! workflows without PostgreSQL, including injected faults.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::{MembershipStore, MembershipTx};
use crate::errors::StoreError;
use crate::models::{
    Group, GroupInvitation, Participant, ParticipantRole, ParticipantSource, User,
    MAX_GROUP_INVITATIONS,
};

#[derive(Debug, Clone, Default)]
struct Faults {
    failing_participant_groups: HashSet<Uuid>,
    participant_creation_delay: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    groups: HashMap<Uuid, Group>,
    participants: Vec<Participant>,
    invitations: HashMap<Uuid, GroupInvitation>,
    faults: Faults,
}

/// Membership store backed by process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryMembershipStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user: User) {
        self.state.lock().await.users.insert(user.id, user);
    }

    pub async fn add_group(&self, group: Group) {
        self.state.lock().await.groups.insert(group.id, group);
    }

    pub async fn add_participant(&self, participant: Participant) {
        self.state.lock().await.participants.push(participant);
    }

    /// Deletes a group together with its participants and invitations.
    pub async fn remove_group(&self, group_id: Uuid) {
        let mut state = self.state.lock().await;
        state.groups.remove(&group_id);
        state.participants.retain(|p| p.group_id != group_id);
        state.invitations.retain(|_, i| i.group_id != group_id);
    }

    pub async fn group(&self, group_id: Uuid) -> Option<Group> {
        self.state.lock().await.groups.get(&group_id).cloned()
    }

    pub async fn invitations(&self, group_id: Uuid) -> Vec<GroupInvitation> {
        self.state
            .lock()
            .await
            .invitations
            .values()
            .filter(|i| i.group_id == group_id)
            .cloned()
            .collect()
    }

    pub async fn participants(&self, group_id: Uuid) -> Vec<Participant> {
        self.state
            .lock()
            .await
            .participants
            .iter()
            .filter(|p| p.group_id == group_id)
            .cloned()
            .collect()
    }

    /// Makes every participant insert into `group_id` fail.
    pub async fn fail_participant_creation(&self, group_id: Uuid) {
        self.state
            .lock()
            .await
            .faults
            .failing_participant_groups
            .insert(group_id);
    }

    /// Makes every participant insert wait before completing.
    pub async fn delay_participant_creation(&self, delay: Duration) {
        self.state.lock().await.faults.participant_creation_delay = Some(delay);
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    type Tx = InMemoryTx;

    async fn begin(&self) -> Result<Self::Tx, StoreError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(InMemoryTx { guard, working })
    }
}

/// Open transaction over an [`InMemoryMembershipStore`].
pub struct InMemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl MembershipTx for InMemoryTx {
    async fn count_invitations(&mut self, group_id: Uuid) -> Result<i64, StoreError> {
        let count = self
            .working
            .invitations
            .values()
            .filter(|i| i.group_id == group_id)
            .count();
        Ok(count as i64)
    }

    async fn find_invitation_by_group_and_email(
        &mut self,
        group_id: Uuid,
        email: &str,
    ) -> Result<Option<GroupInvitation>, StoreError> {
        Ok(self
            .working
            .invitations
            .values()
            .find(|i| i.group_id == group_id && i.email == email)
            .cloned())
    }

    async fn insert_invitation(&mut self, invitation: &GroupInvitation) -> Result<(), StoreError> {
        if !self.working.groups.contains_key(&invitation.group_id) {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "group_invitations_group_id_fkey".to_string(),
            });
        }

        let in_group: Vec<&GroupInvitation> = self
            .working
            .invitations
            .values()
            .filter(|i| i.group_id == invitation.group_id)
            .collect();
        if in_group.iter().any(|i| i.email == invitation.email) {
            return Err(StoreError::UniqueViolation {
                constraint: "group_invitations_group_email_key".to_string(),
            });
        }
        if in_group.len() as i64 >= MAX_GROUP_INVITATIONS {
            return Err(StoreError::CheckViolation {
                constraint: "group_invitations_capacity".to_string(),
            });
        }
        if self.working.invitations.contains_key(&invitation.id) {
            return Err(StoreError::UniqueViolation {
                constraint: "group_invitations_pkey".to_string(),
            });
        }

        self.working
            .invitations
            .insert(invitation.id, invitation.clone());
        Ok(())
    }

    async fn delete_invitation(&mut self, invitation_id: Uuid) -> Result<(), StoreError> {
        self.working.invitations.remove(&invitation_id);
        Ok(())
    }

    async fn mark_invitation_sent(
        &mut self,
        invitation_id: Uuid,
        sent_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        match self.working.invitations.get_mut(&invitation_id) {
            Some(invitation) => {
                invitation.sent_at = Some(sent_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_group(&mut self, group_id: Uuid) -> Result<Option<Group>, StoreError> {
        Ok(self.working.groups.get(&group_id).cloned())
    }

    async fn find_user(&mut self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.working.users.get(&user_id).cloned())
    }

    async fn count_participants(&mut self, group_id: Uuid) -> Result<i64, StoreError> {
        let count = self
            .working
            .participants
            .iter()
            .filter(|p| p.group_id == group_id)
            .count();
        Ok(count as i64)
    }

    async fn update_users_count(
        &mut self,
        group_id: Uuid,
        users_count: i64,
    ) -> Result<(), StoreError> {
        if let Some(group) = self.working.groups.get_mut(&group_id) {
            group.users_count = users_count;
            group.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn create_participant(
        &mut self,
        group_id: Uuid,
        user_id: Uuid,
        role: ParticipantRole,
        source: ParticipantSource,
    ) -> Result<Participant, StoreError> {
        if let Some(delay) = self.working.faults.participant_creation_delay {
            tokio::time::sleep(delay).await;
        }
        if self
            .working
            .faults
            .failing_participant_groups
            .contains(&group_id)
        {
            return Err(StoreError::Backend("injected participant fault".into()));
        }
        if !self.working.groups.contains_key(&group_id) {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "participants_group_id_fkey".to_string(),
            });
        }
        if self
            .working
            .participants
            .iter()
            .any(|p| p.group_id == group_id && p.user_id == user_id)
        {
            return Err(StoreError::UniqueViolation {
                constraint: "participants_pkey".to_string(),
            });
        }

        let now = Utc::now();
        let participant = Participant {
            group_id,
            user_id,
            role,
            source,
            created_at: now,
            updated_at: now,
        };
        self.working.participants.push(participant.clone());
        Ok(participant)
    }

    async fn commit(self) -> Result<(), StoreError> {
        let InMemoryTx { mut guard, working } = self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        Ok(())
    }
}
