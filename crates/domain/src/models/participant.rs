//! Participant (group membership) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role of a participant within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParticipantRole {
    Owner,
    Admin,
    Vip,
    Member,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Owner => "OWNER",
            ParticipantRole::Admin => "ADMIN",
            ParticipantRole::Vip => "VIP",
            ParticipantRole::Member => "MEMBER",
        }
    }
}

impl FromStr for ParticipantRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OWNER" => Ok(ParticipantRole::Owner),
            "ADMIN" => Ok(ParticipantRole::Admin),
            "VIP" => Ok(ParticipantRole::Vip),
            "MEMBER" => Ok(ParticipantRole::Member),
            _ => Err(format!("Invalid participant role: {}", s)),
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a participant came to join a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantSource {
    /// Added directly by the membership subsystem (e.g. the group creator).
    Direct,
    /// Joined by redeeming a group invitation.
    Invitation,
}

impl ParticipantSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantSource::Direct => "direct",
            ParticipantSource::Invitation => "invitation",
        }
    }
}

impl FromStr for ParticipantSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(ParticipantSource::Direct),
            "invitation" => Ok(ParticipantSource::Invitation),
            _ => Err(format!("Invalid participant source: {}", s)),
        }
    }
}

impl fmt::Display for ParticipantSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Membership record linking a user to a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Participant {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRole,
    pub source: ParticipantSource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
