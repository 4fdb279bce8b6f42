//! Core traits for ddlforge

use crate::error::EngineResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use ddlforge_core::{EngineError, EngineResult, Validatable};
///
/// struct EnumType {
///     name: String,
///     values: Vec<String>,
/// }
///
/// impl Validatable for EnumType {
///     fn validate(&self) -> EngineResult<()> {
///         if self.values.is_empty() {
///             return Err(EngineError::EmptyEnum(self.name.clone()));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or an `EngineError` describing the problem.
    fn validate(&self) -> EngineResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;

    struct Named(&'static str);

    impl Validatable for Named {
        fn validate(&self) -> EngineResult<()> {
            if self.0.is_empty() {
                return Err(EngineError::validation("name cannot be empty"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_methods() {
        assert!(Named("users").is_valid());
        assert!(Named("users").validation_errors().is_empty());
        assert!(!Named("").is_valid());
        assert_eq!(
            Named("").validation_errors(),
            vec!["Validation error: name cannot be empty".to_string()]
        );
    }
}
