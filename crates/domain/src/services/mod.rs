//! Domain services for the group membership service.
//!
//! Services contain business logic that operates on domain models.

pub mod invitation;

pub use invitation::{CodeGenerator, InvitationService};
