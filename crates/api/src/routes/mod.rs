//! HTTP route handlers.

pub mod group_invitations;
pub mod health;
