//! # ddlforge Model
//!
//! The canonical in-memory representation of a relational schema design.
//! It is plain data: schemas, tables, ordered columns, foreign keys, and enum
//! types, rooted in a single [`Model`] aggregate that is the only unit ever
//! exchanged with external collaborators.
//!
//! ## Core Concepts
//!
//! - **Schema**: a named namespace grouping tables and types
//! - **Table**: belongs to one schema, owns its columns and foreign keys
//! - **Column**: owned by exactly one table; column order is meaningful
//! - **ForeignKey**: a named constraint binding a column to a column of another (or the same) table
//! - **CustomType**: an enum type declared in a schema
//!
//! Besides the data types this crate holds the read-only logic over them:
//! cardinality inference, the invariant checker, the import sanitizer that
//! turns an untrusted model into a valid one, and JSON exchange.
//!

pub mod cardinality;
pub mod custom_type;
pub mod foreign_key;
pub mod model;
pub mod sanitize;
pub mod schema;
pub mod serialization;
pub mod table;
pub mod validation;

// Re-export commonly used types at crate root
pub use cardinality::{
    RelationshipCardinality, column_is_unique, effective_cardinality, infer_for_foreign_key,
    infer_from_facts, normalize_cardinality,
};
pub use custom_type::{CustomType, TypeKind};
pub use foreign_key::ForeignKey;
pub use model::Model;
pub use sanitize::{SanitizeReport, sanitize_model};
pub use schema::Schema;
pub use serialization::{load_model, model_from_json, model_to_json, save_model};
pub use table::{Column, Table};
pub use validation::{ValidationCode, ValidationIssue, ValidationResult, validate_model};

// Re-export core types that are commonly used with the model
pub use ddlforge_core::{
    Cardinality, ColumnId, EngineError, EngineResult, ForeignKeyId, Position, ReferentialAction,
    SchemaId, TableId, TypeId,
};

/// Current version of the model exchange format
pub const MODEL_VERSION: u32 = 1;

/// Name of the implicit default schema
pub const DEFAULT_SCHEMA_NAME: &str = "public";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
