//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod group;
pub mod group_invitation;
pub mod participant;
pub mod user;

pub use group::GroupEntity;
pub use group_invitation::GroupInvitationEntity;
pub use participant::{ParticipantEntity, ParticipantRoleDb, ParticipantSourceDb};
pub use user::UserEntity;
