//! Error types for koiflow
//!
//! Each error type has a corresponding error code for programmatic handling.
//! Workflow errors carry structured fields (status, field) so callers can
//! render field-specific messages.

use thiserror::Error;

use crate::schemas::{MissingField, OrderField, SellingStatus};

/// Result type alias for koiflow operations
pub type Result<T> = std::result::Result<T, KoiflowError>;

/// Main error type for all koiflow operations
#[derive(Debug, Error)]
pub enum KoiflowError {
    /// Requested status is not reachable from the current one
    #[error("cannot transition from {from} to {to}")]
    InvalidTransition {
        from: SellingStatus,
        to: SellingStatus,
    },

    /// Every requirement of the target status the order does not meet
    #[error("missing required fields: {}", join_missing(.0))]
    MissingRequiredFields(Vec<MissingField>),

    /// Edit of a field the current status does not allow
    #[error("{field} cannot be edited while the order is {status}")]
    FieldLocked {
        field: OrderField,
        status: SellingStatus,
    },

    /// Order record breaks a field invariant
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

fn join_missing(missing: &[MissingField]) -> String {
    missing
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl KoiflowError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            KoiflowError::InvalidTransition { .. } => "INVALID_TRANSITION",
            KoiflowError::MissingRequiredFields(_) => "MISSING_REQUIRED_FIELDS",
            KoiflowError::FieldLocked { .. } => "FIELD_LOCKED",
            KoiflowError::InvalidOrder(_) => "INVALID_ORDER",
            KoiflowError::NotFound(_) => "NOT_FOUND",
            KoiflowError::InvalidJson(_) => "INVALID_JSON",
            KoiflowError::ConfigError(_) => "CONFIG_ERROR",
            KoiflowError::Io(_) => "IO_ERROR",
            KoiflowError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Whether the caller can fix the input and retry
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            KoiflowError::InvalidTransition { .. }
                | KoiflowError::MissingRequiredFields(_)
                | KoiflowError::FieldLocked { .. }
                | KoiflowError::InvalidOrder(_)
        )
    }

    /// Missing fields carried by a `MissingRequiredFields` error, empty otherwise
    pub fn missing_fields(&self) -> &[MissingField] {
        match self {
            KoiflowError::MissingRequiredFields(missing) => missing,
            _ => &[],
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        KoiflowError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &KoiflowError) -> i32 {
    if error.is_validation() {
        2
    } else {
        1
    }
}
