//! User read-model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user as seen by the invitation workflows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Users registered through third-party providers may have no email.
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}
