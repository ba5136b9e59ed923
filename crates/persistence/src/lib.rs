//! Persistence layer for the group membership service.
//!
//! This crate contains:
//! - Database connection management and error mapping
//! - Entity definitions (database row mappings)
//! - Transaction-scoped repositories
//! - The PostgreSQL implementation of the membership store

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
pub mod store;

pub use store::{PgMembershipStore, PgMembershipTx};
