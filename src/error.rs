//! Error types for support-desk
//!
//! Every fallible operation in the crate returns [`Result`]. Errors fall into
//! three groups: validation failures (caller must fix the input), missing
//! tickets (stale reference), and store-level faults (the only group worth
//! retrying).

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SupportDeskError>;

/// Main error type for support-desk
#[derive(Error, Debug)]
pub enum SupportDeskError {
    /// Input failed validation
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Referenced ticket does not exist
    #[error("Ticket not found: {id}")]
    TicketNotFound { id: String },

    /// A stored record could not be decoded into a domain entity
    #[error("Failed to decode stored record: {0}")]
    Decode(#[from] DecodeError),

    /// Generic store fault
    #[error("Storage error: {0}")]
    Storage(String),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// SQLite store error
    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl SupportDeskError {
    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error for a ticket id
    pub fn not_found(id: impl ToString) -> Self {
        Self::TicketNotFound { id: id.to_string() }
    }

    /// Whether a caller may reasonably retry the failed operation
    ///
    /// Validation and not-found errors indicate caller mistakes and are never
    /// retryable. Store faults may be transient.
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Validation { .. } | Self::TicketNotFound { .. } | Self::Config(_) => false,
            Self::Decode(_) | Self::Yaml(_) | Self::Json(_) | Self::Csv(_) => false,
            Self::Storage(_) | Self::Io(_) => true,
            #[cfg(feature = "database")]
            Self::Database(_) => true,
        }
    }

    /// Name of the offending field for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Id of the missing resource for not-found errors
    pub fn resource_id(&self) -> Option<&str> {
        match self {
            Self::TicketNotFound { id } => Some(id),
            _ => None,
        }
    }

    /// Suggestions shown by the CLI alongside the error message
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TicketNotFound { .. } => vec![
                "Run 'support-desk list' to see existing tickets".to_string(),
                "Ticket ids are full UUIDs".to_string(),
            ],
            Self::Validation { field, .. } => {
                vec![format!("Check the value passed for '{field}'")]
            },
            Self::Config(_) => vec![
                "Check support-desk.yaml and SUPPORT_DESK__* environment variables".to_string(),
            ],
            _ => vec![],
        }
    }
}

/// Failure to turn a raw stored record into a domain entity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("field '{field}' has unknown value '{value}'")]
    InvalidEnum { field: &'static str, value: String },

    #[error("field '{field}' is not an RFC 3339 timestamp: '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("'{value}' is not a valid id")]
    InvalidId { value: String },

    #[error("field '{field}' is empty")]
    EmptyField { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let err = SupportDeskError::validation("title", "title cannot be empty");
        assert_eq!(err.field(), Some("title"));
        assert_eq!(err.to_string(), "Invalid title: title cannot be empty");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_not_found_carries_id() {
        let err = SupportDeskError::not_found("abc");
        assert_eq!(err.resource_id(), Some("abc"));
        assert!(!err.is_retryable());
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn test_store_faults_are_retryable() {
        assert!(SupportDeskError::Storage("connection lost".to_string()).is_retryable());
        let io = std::io::Error::other("disk");
        assert!(SupportDeskError::from(io).is_retryable());
        let decode = DecodeError::EmptyField { field: "title" };
        assert!(!SupportDeskError::from(decode).is_retryable());
    }
}
