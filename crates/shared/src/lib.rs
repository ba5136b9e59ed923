//! Shared utilities for the group membership service.
//!
//! This crate provides leaf functionality used by the other crates:
//! - Verification code generation for group invitations

pub mod crypto;
