//! Error types for the invitation workflows.

use shared::crypto::CodeGenerationError;
use thiserror::Error;

/// Failure reported by a membership store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    #[error("check constraint violated: {constraint}")]
    CheckViolation { constraint: String },

    #[error("transaction could not be serialized")]
    SerializationFailure,

    #[error("transaction deadline exceeded")]
    Timeout,

    #[error("store failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Outcome of a failed invitation workflow.
///
/// `Forbidden`, `TooManyInvitations`, `InvalidInvitationCode` and `Server`
/// are recognized conditions returned as-is. Every other failure inside the
/// unit of work is reported as `Transaction`.
#[derive(Debug, Error)]
pub enum InvitationError {
    #[error("Only the group owner can invite members")]
    Forbidden,

    #[error("Group already has the maximum number of outstanding invitations")]
    TooManyInvitations,

    #[error("Invalid invitation code")]
    InvalidInvitationCode,

    #[error("Server error: {0}")]
    Server(#[from] CodeGenerationError),

    #[error("Transaction failed: {0}")]
    Transaction(#[from] StoreError),
}

impl InvitationError {
    /// Returns true for recognized conditions, false for wrapped store failures.
    pub fn is_condition(&self) -> bool {
        !matches!(self, InvitationError::Transaction(_))
    }

    /// Short label used for metrics and structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            InvitationError::Forbidden => "forbidden",
            InvitationError::TooManyInvitations => "too_many_invitations",
            InvitationError::InvalidInvitationCode => "invalid_invitation_code",
            InvitationError::Server(_) => "server_error",
            InvitationError::Transaction(_) => "transaction_failed",
        }
    }
}
