//! Error types for LUMEN operations

use crate::EntityType;
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: EntityType, id: String },

    #[error("Insert failed for {entity_type}: {reason}")]
    InsertFailed { entity_type: EntityType, reason: String },

    #[error("Update failed for {entity_type} with id {id}: {reason}")]
    UpdateFailed {
        entity_type: EntityType,
        id: String,
        reason: String,
    },

    #[error("Transaction failed: {reason}")]
    TransactionFailed { reason: String },

    #[error("Serialization failed for key {key}: {reason}")]
    Serialization { key: String, reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate value for {field}: {value}")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Shorthand for a missing required field.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::RequiredFieldMissing {
            field: field.into(),
        }
    }

    /// Shorthand for an invalid field value.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all LUMEN errors.
#[derive(Debug, Clone, Error)]
pub enum LumenError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for LUMEN operations.
pub type LumenResult<T> = Result<T, LumenError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display_not_found() {
        let err = StorageError::NotFound {
            entity_type: EntityType::Project,
            id: "p1".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Entity not found"));
        assert!(msg.contains("Project"));
        assert!(msg.contains("p1"));
    }

    #[test]
    fn test_validation_error_shorthands() {
        assert_eq!(
            ValidationError::missing("title"),
            ValidationError::RequiredFieldMissing {
                field: "title".to_string()
            }
        );
        let msg = format!("{}", ValidationError::invalid("rating", "must be 1-5"));
        assert!(msg.contains("rating"));
        assert!(msg.contains("must be 1-5"));
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "items_per_page".to_string(),
            value: "0".to_string(),
            reason: "must be > 0".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("items_per_page"));
        assert!(msg.contains("must be > 0"));
    }

    #[test]
    fn test_lumen_error_from_variants() {
        let storage = LumenError::from(StorageError::LockPoisoned);
        assert!(matches!(storage, LumenError::Storage(_)));

        let validation = LumenError::from(ValidationError::missing("name"));
        assert!(matches!(validation, LumenError::Validation(_)));

        let config = LumenError::from(ConfigError::MissingRequired {
            field: "api_base_url".to_string(),
        });
        assert!(matches!(config, LumenError::Config(_)));
    }

    #[test]
    fn test_storage_error_display_lock_poisoned() {
        let msg = format!("{}", StorageError::LockPoisoned);
        assert!(msg.contains("lock poisoned"));
    }
}
