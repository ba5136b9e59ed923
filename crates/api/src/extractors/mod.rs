//! Request extractors.

pub mod acting_user;

pub use acting_user::{ActingUserId, USER_ID_HEADER};
