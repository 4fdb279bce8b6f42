//! Error types for ddlforge
//!
//! Every failure the engine can report is local and recoverable: an operation
//! that returns an error leaves the model exactly as it was. Name collisions
//! are never errors (they are resolved by de-duplication), so there is no
//! "duplicate" class here.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ddlforge
#[derive(Debug, Error)]
pub enum EngineError {
    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Schema not found
    #[error("Schema not found: {0}")]
    SchemaNotFound(String),

    /// Table not found
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Column not found
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// Foreign key not found
    #[error("Foreign key '{foreign_key}' not found in table '{table}'")]
    ForeignKeyNotFound { table: String, foreign_key: String },

    /// Custom type not found
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A cross-reference points at something that does not exist
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Enum types must carry at least one value
    #[error("Enum type '{0}' must have at least one value")]
    EmptyEnum(String),

    // ========================================================================
    // Composite Operation Errors
    // ========================================================================
    /// Many-to-many conversion precondition failed
    #[error("Many-to-many conversion failed: {0}")]
    ManyToManyConversion(String),

    // ========================================================================
    // IO / Serialization Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl EngineError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }

    /// Create an invalid-reference error
    pub fn invalid_reference(msg: impl Into<String>) -> Self {
        EngineError::InvalidReference(msg.into())
    }

    /// Create a column-not-found error
    pub fn column_not_found(table: impl Into<String>, column: impl Into<String>) -> Self {
        EngineError::ColumnNotFound {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create a foreign-key-not-found error
    pub fn foreign_key_not_found(table: impl Into<String>, foreign_key: impl Into<String>) -> Self {
        EngineError::ForeignKeyNotFound {
            table: table.into(),
            foreign_key: foreign_key.into(),
        }
    }

    /// Create a many-to-many conversion error
    pub fn many_to_many(msg: impl Into<String>) -> Self {
        EngineError::ManyToManyConversion(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        EngineError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        EngineError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::Validation(_)
                | EngineError::InvalidReference(_)
                | EngineError::EmptyEnum(_)
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::SchemaNotFound(_)
                | EngineError::TableNotFound(_)
                | EngineError::ColumnNotFound { .. }
                | EngineError::ForeignKeyNotFound { .. }
                | EngineError::TypeNotFound(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            EngineError::Io(_) | EngineError::FileRead { .. } | EngineError::FileWrite { .. }
        )
    }
}

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> EngineResult<T>;
}

impl<T, E: Into<EngineError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> EngineResult<T> {
        self.map_err(|e| {
            let err: EngineError = e.into();
            EngineError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
