//! Domain layer for the group membership service.
//!
//! This crate contains:
//! - Domain models (GroupInvitation, Group, User, Participant)
//! - Error taxonomy for the invitation workflows
//! - Store contracts and the transactional unit of work
//! - Invitation issuance and redemption services

pub mod errors;
pub mod models;
pub mod services;
pub mod store;
