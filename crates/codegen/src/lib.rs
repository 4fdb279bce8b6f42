//! # ddlforge Codegen
//!
//! Deterministic DDL generation for a ddlforge [`Model`](ddlforge_model::Model).
//!
//! ## Features
//!
//! - **Dependency ordering**: tables are created after the tables they
//!   reference; reference cycles are tolerated and reported
//! - **Schemas and enums**: `CREATE SCHEMA` and `CREATE TYPE ... AS ENUM`
//!   ahead of any table
//! - **Table clauses**: primary keys, unique constraints and foreign keys with
//!   referential actions, inline or as an indented block
//! - **Comments and indexes**: `COMMENT ON` and `CREATE INDEX` right after
//!   their table
//!
//! Identical models always produce byte-identical output.

// ============================================================================
// Modules
// ============================================================================

pub mod generator;
pub mod options;
pub mod ordering;
pub mod statements;

// ============================================================================
// Re-exports
// ============================================================================

pub use generator::{DdlGenerator, DdlReport, SkippedForeignKey, generate_ddl};
pub use options::DdlOptions;
pub use ordering::{TableOrder, dependency_order};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
