//! # DDL Generator
//!
//! [`DdlGenerator`] turns a [`Model`] into one SQL script. Statements come in
//! a fixed order:
//!
//! ```text
//! CREATE SCHEMA IF NOT EXISTS ...     every non-default schema, by name
//! CREATE TYPE ... AS ENUM (...)       grouped by schema
//! CREATE TABLE ...                    dependency order
//!   COMMENT ON TABLE / COLUMN ...     right after their table
//!   CREATE INDEX ...                  right after the comments
//! ```
//!
//! Generation never fails. A foreign key whose column, target table or target
//! column no longer resolves is left out and listed in the [`DdlReport`].
//!
//! ## Usage
//!
//! ```
//! use ddlforge_codegen::DdlGenerator;
//! use ddlforge_model::{Column, Model, Table};
//!
//! let mut model = Model::default();
//! let schema = model.schemas[0].id.clone();
//! model.tables.push(
//!     Table::new(schema, "users").with_column(Column::new("id", "uuid").primary_key()),
//! );
//!
//! let sql = DdlGenerator::with_defaults().generate(&model);
//! assert!(sql.contains("CREATE TABLE \"public\".\"users\""));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use ddlforge_model::{CustomType, ForeignKey, Model, Table};
use tracing::{info, warn};

use crate::DdlOptions;
use crate::ordering::dependency_order;
use crate::statements::{self, ForeignKeyTarget};

// ============================================================================
// DdlReport
// ============================================================================

/// A foreign key left out of the generated script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedForeignKey {
    /// `schema.table` owning the foreign key
    pub table: String,
    pub name: String,
    pub reason: String,
}

/// The generated script plus what the generator decided along the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DdlReport {
    pub sql: String,

    /// `schema.table` in the order the tables were created
    pub table_order: Vec<String>,

    /// Tables emitted after the dependency-ordered ones because of a cycle
    pub cyclic_tables: Vec<String>,

    pub skipped_foreign_keys: Vec<SkippedForeignKey>,

    /// Number of SQL statements in `sql`
    pub statement_count: usize,
}

impl DdlReport {
    pub fn has_cycles(&self) -> bool {
        !self.cyclic_tables.is_empty()
    }

    /// Whether anything in the model could not be expressed in the script
    pub fn is_lossless(&self) -> bool {
        self.skipped_foreign_keys.is_empty()
    }
}

impl fmt::Display for DdlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} statements, {} tables",
            self.statement_count,
            self.table_order.len()
        )?;
        if self.has_cycles() {
            writeln!(f, "Tables in a reference cycle: {}", self.cyclic_tables.join(", "))?;
        }
        for skipped in &self.skipped_foreign_keys {
            writeln!(
                f,
                "Skipped foreign key {} on {}: {}",
                skipped.name, skipped.table, skipped.reason
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// DdlGenerator
// ============================================================================

/// Stateless apart from its options; generation is a pure function of the model
#[derive(Debug, Clone, Default)]
pub struct DdlGenerator {
    options: DdlOptions,
}

impl DdlGenerator {
    pub fn new(options: DdlOptions) -> Self {
        Self { options }
    }

    pub fn with_defaults() -> Self {
        Self::new(DdlOptions::default())
    }

    pub fn options(&self) -> &DdlOptions {
        &self.options
    }

    /// The SQL script for `model`
    pub fn generate(&self, model: &Model) -> String {
        self.generate_report(model).sql
    }

    /// The SQL script for `model` with ordering and skip details
    pub fn generate_report(&self, model: &Model) -> DdlReport {
        let mut report = DdlReport::default();
        let mut blocks: Vec<Vec<String>> = Vec::new();

        // ── Schemas ──────────────────────────────────────────────────────
        let mut schemas: Vec<_> = model
            .schemas
            .iter()
            .filter(|s| s.name != self.options.default_schema)
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas.dedup_by(|a, b| a.name == b.name);

        let mut block = Vec::new();
        for schema in schemas {
            block.push(statements::create_schema(schema));
            if self.options.emit_comments {
                block.extend(statements::comment_on_schema(schema));
            }
        }
        blocks.push(block);

        // ── Enum types ───────────────────────────────────────────────────
        let mut by_schema: BTreeMap<&str, Vec<&CustomType>> = BTreeMap::new();
        for custom_type in &model.types {
            let schema = model
                .schema(&custom_type.schema_id)
                .map(|s| s.name.as_str())
                .unwrap_or(&self.options.default_schema);
            by_schema.entry(schema).or_default().push(custom_type);
        }
        blocks.push(
            by_schema
                .iter()
                .flat_map(|(schema, types)| {
                    types.iter().map(move |t| statements::create_enum(schema, t))
                })
                .collect(),
        );

        // ── Tables ───────────────────────────────────────────────────────
        let order = dependency_order(model);
        for table in &order.tables {
            let schema = self.schema_name(model, table);
            report.table_order.push(format!("{}.{}", schema, table.name));
            blocks.push(self.table_block(model, schema, table, &mut report));
        }
        report.cyclic_tables = order
            .cyclic()
            .iter()
            .map(|t| format!("{}.{}", self.schema_name(model, t), t.name))
            .collect();

        let blocks: Vec<String> = blocks
            .into_iter()
            .filter(|block| !block.is_empty())
            .map(|block| {
                report.statement_count += block.len();
                block.join("\n")
            })
            .collect();
        report.sql = if blocks.is_empty() {
            String::new()
        } else {
            format!("{}\n", blocks.join("\n\n"))
        };

        info!(
            tables = report.table_order.len(),
            statements = report.statement_count,
            cyclic = report.cyclic_tables.len(),
            skipped = report.skipped_foreign_keys.len(),
            "Generated DDL"
        );
        report
    }

    fn schema_name<'a>(&'a self, model: &'a Model, table: &Table) -> &'a str {
        let name = model.schema_name_of(table);
        if name.is_empty() {
            &self.options.default_schema
        } else {
            name
        }
    }

    /// `CREATE TABLE` followed by its comments and indexes
    fn table_block(
        &self,
        model: &Model,
        schema: &str,
        table: &Table,
        report: &mut DdlReport,
    ) -> Vec<String> {
        let mut clauses: Vec<String> = table.columns.iter().map(statements::column_definition).collect();
        clauses.extend(statements::primary_key_clause(table));
        clauses.extend(statements::unique_clauses(table));

        for fk in &table.foreign_keys {
            match self.resolve(model, table, fk) {
                Ok(target) => clauses.push(statements::foreign_key_clause(fk, &target)),
                Err(reason) => {
                    let owner = format!("{}.{}", schema, table.name);
                    warn!(table = %owner, foreign_key = %fk.name, %reason, "Skipping foreign key");
                    report.skipped_foreign_keys.push(SkippedForeignKey {
                        table: owner,
                        name: fk.name.clone(),
                        reason,
                    });
                }
            }
        }

        let name = statements::qualified(schema, &table.name);
        let mut block = vec![statements::create_table(&name, &clauses, &self.options)];
        if self.options.emit_comments {
            block.extend(statements::comments(schema, table));
        }
        if self.options.emit_indexes {
            block.extend(statements::indexes(schema, table));
        }
        block
    }

    fn resolve<'a>(
        &'a self,
        model: &'a Model,
        table: &'a Table,
        fk: &ForeignKey,
    ) -> Result<ForeignKeyTarget<'a>, String> {
        let from_column = table
            .column(&fk.from_column_id)
            .ok_or_else(|| format!("source column '{}' does not exist", fk.from_column_id))?;
        let target = model
            .table(&fk.to_table_id)
            .ok_or_else(|| format!("target table '{}' does not exist", fk.to_table_id))?;
        let column = target.column(&fk.to_column_id).ok_or_else(|| {
            format!(
                "target column '{}' does not exist on '{}'",
                fk.to_column_id, target.name
            )
        })?;
        Ok(ForeignKeyTarget {
            from_column,
            schema: self.schema_name(model, target),
            table: target,
            column,
        })
    }
}

/// Generate the SQL script for `model` with default options
pub fn generate_ddl(model: &Model) -> String {
    DdlGenerator::with_defaults().generate(model)
}

// ============================================================================
// Tests
// ============================================================================
