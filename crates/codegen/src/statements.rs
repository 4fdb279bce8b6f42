//! SQL statement emitters
//!
//! Each function renders one statement (or one clause) as text. Identifiers
//! are always double-quoted; string literals use single quotes with embedded
//! quotes doubled. Default values and data types are inserted verbatim.

use crate::DdlOptions;
use ddlforge_core::{ensure_unique_name, to_snake_case};
use ddlforge_model::{Column, CustomType, ForeignKey, Schema, Table};

// ============================================================================
// Quoting
// ============================================================================

/// `name` as a double-quoted identifier
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `text` as a single-quoted string literal
pub fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// `"schema"."name"`
pub fn qualified(schema: &str, name: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(name))
}

fn column_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names
        .into_iter()
        .map(quote_ident)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Schemas and types
// ============================================================================

pub fn create_schema(schema: &Schema) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {};", quote_ident(&schema.name))
}

pub fn comment_on_schema(schema: &Schema) -> Option<String> {
    schema.comment.as_deref().map(|comment| {
        format!(
            "COMMENT ON SCHEMA {} IS {};",
            quote_ident(&schema.name),
            quote_literal(comment)
        )
    })
}

pub fn create_enum(schema: &str, custom_type: &CustomType) -> String {
    let values = custom_type
        .values
        .iter()
        .map(|v| quote_literal(v))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "CREATE TYPE {} AS ENUM ({});",
        qualified(schema, &custom_type.name),
        values
    )
}

// ============================================================================
// Tables
// ============================================================================

/// `"name" type [NOT NULL] [DEFAULT expr]`
pub fn column_definition(column: &Column) -> String {
    let mut definition = format!("{} {}", quote_ident(&column.name), column.data_type);
    if !column.nullable {
        definition.push_str(" NOT NULL");
    }
    if let Some(default) = column.effective_default() {
        definition.push_str(" DEFAULT ");
        definition.push_str(default);
    }
    definition
}

/// `PRIMARY KEY (...)` over every primary-key column, in column order
pub fn primary_key_clause(table: &Table) -> Option<String> {
    let columns = table.primary_key_columns();
    if columns.is_empty() {
        return None;
    }
    Some(format!(
        "PRIMARY KEY ({})",
        column_list(columns.iter().map(|c| c.name.as_str()))
    ))
}

/// One `UNIQUE (...)` per unique column that is not part of the primary key
pub fn unique_clauses(table: &Table) -> Vec<String> {
    table
        .columns
        .iter()
        .filter(|c| c.is_unique && !c.is_primary_key)
        .map(|c| format!("UNIQUE ({})", quote_ident(&c.name)))
        .collect()
}

/// The resolved endpoints of a foreign key
pub struct ForeignKeyTarget<'a> {
    pub from_column: &'a Column,
    pub schema: &'a str,
    pub table: &'a Table,
    pub column: &'a Column,
}

pub fn foreign_key_clause(fk: &ForeignKey, target: &ForeignKeyTarget<'_>) -> String {
    let mut clause = format!(
        "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
        quote_ident(&fk.name),
        quote_ident(&target.from_column.name),
        qualified(target.schema, &target.table.name),
        quote_ident(&target.column.name)
    );
    if let Some(action) = fk.on_delete {
        clause.push_str(" ON DELETE ");
        clause.push_str(action.to_sql());
    }
    if let Some(action) = fk.on_update {
        clause.push_str(" ON UPDATE ");
        clause.push_str(action.to_sql());
    }
    clause
}

/// Assemble a `CREATE TABLE` from its clauses.
///
/// The statement goes on one line when it has at most
/// `options.inline_max_clauses` clauses and fits in `options.inline_width`;
/// otherwise each clause gets its own indented line.
pub fn create_table(name: &str, clauses: &[String], options: &DdlOptions) -> String {
    let inline = format!("CREATE TABLE {} ({});", name, clauses.join(", "));
    let fits = clauses.len() <= options.inline_max_clauses
        && inline.chars().count() <= options.inline_width;
    if fits || clauses.is_empty() {
        return inline;
    }

    let body = clauses
        .iter()
        .map(|clause| format!("{}{}", options.indent, clause))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("CREATE TABLE {} (\n{}\n);", name, body)
}

// ============================================================================
// Comments and indexes
// ============================================================================

/// `COMMENT ON TABLE` followed by one `COMMENT ON COLUMN` per commented column
pub fn comments(schema: &str, table: &Table) -> Vec<String> {
    let table_name = qualified(schema, &table.name);
    let mut statements = Vec::new();
    if let Some(comment) = table.comment.as_deref() {
        statements.push(format!(
            "COMMENT ON TABLE {} IS {};",
            table_name,
            quote_literal(comment)
        ));
    }
    for column in &table.columns {
        if let Some(comment) = column.comment.as_deref() {
            statements.push(format!(
                "COMMENT ON COLUMN {}.{} IS {};",
                table_name,
                quote_ident(&column.name),
                quote_literal(comment)
            ));
        }
    }
    statements
}

/// `CREATE INDEX` for each indexed column that is neither unique nor part of
/// the primary key. Index names are `idx_<table>_<column>`, snake-cased and
/// de-duplicated within the table.
pub fn indexes(schema: &str, table: &Table) -> Vec<String> {
    let table_name = qualified(schema, &table.name);
    let mut used: Vec<String> = Vec::new();
    let mut statements = Vec::new();

    for column in table
        .columns
        .iter()
        .filter(|c| c.is_indexed && !c.is_unique && !c.is_primary_key)
    {
        let base = to_snake_case(&format!("idx_{}_{}", table.name, column.name));
        let name = ensure_unique_name(&base, &used);
        statements.push(format!(
            "CREATE INDEX {} ON {} ({});",
            quote_ident(&name),
            table_name,
            quote_ident(&column.name)
        ));
        used.push(name);
    }
    statements
}
