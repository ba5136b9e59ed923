//! Domain models.

pub mod group;
pub mod group_invitation;
pub mod participant;
pub mod user;

pub use group::Group;
pub use group_invitation::{
    CreateGroupInvitationRequest, GroupInvitation, JoinGroupByInvitationRequest,
    MAX_GROUP_INVITATIONS,
};
pub use participant::{Participant, ParticipantRole, ParticipantSource};
pub use user::User;
