//! # ddlforge Core
//!
//! Core types, naming utilities, traits, and error handling for ddlforge.
//!
//! This crate provides the foundational building blocks shared by the model,
//! the editor, and the DDL generator:
//!
//! - **Types**: identifiers, canvas `Position`, `ReferentialAction`, `Cardinality`
//! - **Naming**: unique ids, name de-duplication, constraint-name sanitizing, snake_case
//! - **Traits**: `Validatable`
//! - **Errors**: unified error handling with `EngineError` and `EngineResult`
//!

pub mod error;
pub mod naming;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EngineError, EngineResult, ResultExt};
pub use naming::{
    ensure_unique_constraint_name, ensure_unique_name, new_id, sanitize_constraint_name,
    to_snake_case,
};
pub use traits::Validatable;
pub use types::{
    Cardinality, ColumnId, ForeignKeyId, Position, ReferentialAction, SchemaId, TableId, TypeId,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
