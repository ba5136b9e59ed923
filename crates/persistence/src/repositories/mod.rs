//! Repository implementations for database operations.
//!
//! Every function takes an executor so it can run against the pool or inside
//! an open transaction (`&mut *tx`).

pub mod group;
pub mod group_invitation;
pub mod participant;
pub mod user;

pub use group::GroupRepository;
pub use group_invitation::GroupInvitationRepository;
pub use participant::ParticipantRepository;
pub use user::UserRepository;
