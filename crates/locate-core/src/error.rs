use crate::model::record::{Field, InvalidTransition, Status};
use std::fmt;
use thiserror::Error;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    RecordNotFound,
    InvalidStateTransition,
    DuplicateIdentity,
    IdentityChanged,
    ValidationFailed,
    InvalidEnumValue,
    StoreFileCorrupt,
    StoreWriteFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::RecordNotFound => "E2001",
            Self::InvalidStateTransition => "E2002",
            Self::DuplicateIdentity => "E2003",
            Self::IdentityChanged => "E2004",
            Self::ValidationFailed => "E2005",
            Self::InvalidEnumValue => "E2006",
            Self::StoreFileCorrupt => "E3001",
            Self::StoreWriteFailed => "E5001",
            Self::LockContention => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Tracker not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::RecordNotFound => "Ticket not found",
            Self::InvalidStateTransition => "Invalid status transition",
            Self::DuplicateIdentity => "Ticket ID already in use",
            Self::IdentityChanged => "Ticket ID cannot change during an edit",
            Self::ValidationFailed => "Required fields missing",
            Self::InvalidEnumValue => "Invalid status/priority value",
            Self::StoreFileCorrupt => "Record file is corrupt",
            Self::StoreWriteFailed => "Record file write failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `lt init` to create the .locate directory."),
            Self::ConfigParseError => Some("Fix syntax in .locate/config.toml and retry."),
            Self::RecordNotFound => Some("Run `lt list` to see current ticket IDs."),
            Self::InvalidStateTransition => {
                Some("Move forward through open -> in review -> field check -> resolved, or reopen.")
            }
            Self::DuplicateIdentity => Some("Choose a different ticket ID."),
            Self::IdentityChanged => {
                Some("Delete and re-create the ticket to change its ID.")
            }
            Self::ValidationFailed => Some("Provide non-empty values for the listed fields."),
            Self::InvalidEnumValue => Some(
                "Status: open, in review, field check, resolved. Priority: low, standard, urgent.",
            ),
            Self::StoreFileCorrupt => {
                Some("Restore .locate/records.json from backup or re-run `lt init`.")
            }
            Self::StoreWriteFailed => Some("Check disk space and write permissions."),
            Self::LockContention => Some("Retry after the other `lt` process releases its lock."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One or more required fields were empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<Field>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.missing.iter().map(|field| field.as_str()).collect();
        write!(f, "required fields are empty: {}", names.join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// Failures of a store mutation. None of them leave the collection modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("ticket '{id}' not found")]
    NotFound { id: String },

    #[error("ticket '{id}' already exists")]
    DuplicateIdentity { id: String },

    #[error("ticket '{id}' cannot be re-keyed to '{attempted}'")]
    IdentityChanged { id: String, attempted: String },

    #[error("ticket '{id}' cannot move from {from} to {to}")]
    InvalidTransition { id: String, from: Status, to: Status },
}

impl StoreError {
    pub(crate) fn transition(id: &str, err: InvalidTransition) -> Self {
        Self::InvalidTransition {
            id: id.to_string(),
            from: err.from,
            to: err.to,
        }
    }

    /// Machine-readable code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::NotFound { .. } => ErrorCode::RecordNotFound,
            Self::DuplicateIdentity { .. } => ErrorCode::DuplicateIdentity,
            Self::IdentityChanged { .. } => ErrorCode::IdentityChanged,
            Self::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
        }
    }

    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}
