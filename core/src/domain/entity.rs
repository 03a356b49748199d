//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain records.
//! All records carry a store-assigned identifier and are thread-safe.

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the store when a record is created
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Core trait for all domain records
pub trait Entity: Sized + Send + Sync + Clone {
    /// Returns the record's unique identifier
    fn id(&self) -> &RecordId;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// `MissingFields` and `InvalidInput` are raised before any store call.
/// `NotFound`, `Remote` and `Decode` come back from a store round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    /// Required form fields left empty (remote column names)
    MissingFields(Vec<String>),
    InvalidInput(String),
    NotFound(String),
    Remote(String),
    Decode(String),
}

impl DomainError {
    /// True when the error was caught locally and nothing reached the store
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::MissingFields(_) | DomainError::InvalidInput(_))
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::MissingFields(fields) => {
                write!(f, "Please fill in all required fields: {}", fields.join(", "))
            }
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::Remote(msg) => f.write_str(msg),
            DomainError::Decode(msg) => write!(f, "Unexpected data from store: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(DomainError::MissingFields(vec!["amount".into()]).is_validation());
        assert!(DomainError::InvalidInput("amount".into()).is_validation());
        assert!(!DomainError::Remote("permission denied".into()).is_validation());
        assert!(!DomainError::NotFound("flats/1".into()).is_validation());
    }

    #[test]
    fn test_remote_message_passes_through() {
        let err = DomainError::Remote("duplicate key value violates unique constraint".into());
        assert_eq!(err.to_string(), "duplicate key value violates unique constraint");
    }

    #[test]
    fn test_record_id_is_transparent() {
        let id = RecordId::new("3f1c");
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("3f1c"));
    }
}
