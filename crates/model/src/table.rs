//! Table and column definitions
//!
//! A `Table` belongs to exactly one schema and exclusively owns its columns
//! and its outgoing foreign keys. Column order is the declared order and the
//! drag-reorder order, so it is kept as a `Vec`.

use crate::foreign_key::ForeignKey;
use ddlforge_core::{
    ColumnId, EngineError, EngineResult, ForeignKeyId, Position, SchemaId, TableId, Validatable,
    new_id,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Table
// ============================================================================

/// Represents a database table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,

    /// Owning schema
    pub schema_id: SchemaId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Columns in declared order
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Foreign keys whose source column lives on this table
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,

    /// Canvas position, if the table has been placed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Table {
    /// Create an empty table with a fresh id
    pub fn new(schema_id: impl Into<SchemaId>, name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            schema_id: schema_id.into(),
            name: name.into(),
            comment: None,
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            position: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    // ========================================================================
    // Column queries
    // ========================================================================

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn column_mut(&mut self, id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    pub fn column_index(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, id: &str) -> bool {
        self.column(id).is_some()
    }

    /// Names of all columns, optionally skipping one column id
    pub fn column_names_except(&self, except: Option<&str>) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| Some(c.id.as_str()) != except)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Columns flagged as primary key, in declared order
    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_primary_key).collect()
    }

    /// Whether `column_id` is the table's only primary-key column
    pub fn is_single_column_primary_key(&self, column_id: &str) -> bool {
        let pks = self.primary_key_columns();
        pks.len() == 1 && pks[0].id == column_id
    }

    // ========================================================================
    // Foreign key queries
    // ========================================================================

    pub fn foreign_key(&self, id: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.id == id)
    }

    pub fn foreign_key_mut(&mut self, id: &str) -> Option<&mut ForeignKey> {
        self.foreign_keys.iter_mut().find(|fk| fk.id == id)
    }

    /// Constraint names of all foreign keys, optionally skipping one
    pub fn constraint_names_except(&self, except: Option<&str>) -> Vec<&str> {
        self.foreign_keys
            .iter()
            .filter(|fk| Some(fk.id.as_str()) != except)
            .map(|fk| fk.name.as_str())
            .collect()
    }

    /// Remove a foreign key by id
    pub fn remove_foreign_key(&mut self, id: &str) -> Option<ForeignKey> {
        let index = self.foreign_keys.iter().position(|fk| fk.id == id)?;
        Some(self.foreign_keys.remove(index))
    }

    /// Ids of foreign keys whose source is `column_id`
    pub fn foreign_keys_from_column(&self, column_id: &str) -> Vec<ForeignKeyId> {
        self.foreign_keys
            .iter()
            .filter(|fk| fk.from_column_id == column_id)
            .map(|fk| fk.id.clone())
            .collect()
    }

    // ========================================================================
    // Column mutation helpers
    // ========================================================================

    /// Move `column_id` into the slot `target_id` occupied, shifting the rest.
    ///
    /// Returns `false` (and leaves the order alone) when either id is absent
    /// or they are equal.
    pub fn move_column(&mut self, column_id: &str, target_id: &str) -> bool {
        if column_id == target_id {
            return false;
        }
        let (Some(from), Some(to)) = (self.column_index(column_id), self.column_index(target_id))
        else {
            return false;
        };
        let column = self.columns.remove(from);
        self.columns.insert(to, column);
        true
    }
}

impl Validatable for Table {
    fn validate(&self) -> EngineResult<()> {
        let mut names = HashSet::new();
        for column in &self.columns {
            if !names.insert(column.name.as_str()) {
                return Err(EngineError::validation(format!(
                    "Duplicate column name '{}' in table '{}'",
                    column.name, self.name
                )));
            }
        }

        for fk in &self.foreign_keys {
            if !self.has_column(&fk.from_column_id) {
                return Err(EngineError::invalid_reference(format!(
                    "Foreign key '{}' on '{}' uses a column that is not on the table",
                    fk.name, self.name
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Column
// ============================================================================

fn default_nullable() -> bool {
    true
}

/// Represents a table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,

    pub name: String,

    /// SQL type text, emitted verbatim (may name an enum type)
    #[serde(rename = "type")]
    pub data_type: String,

    #[serde(default = "default_nullable")]
    pub nullable: bool,

    /// SQL literal or expression, emitted verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default)]
    pub is_primary_key: bool,

    #[serde(default)]
    pub is_unique: bool,

    #[serde(default)]
    pub is_indexed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Column {
    /// Create a nullable column with a fresh id
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            default_value: None,
            is_primary_key: false,
            is_unique: false,
            is_indexed: false,
            comment: None,
        }
    }

    /// Mark as primary key (implies NOT NULL)
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.is_indexed = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Default value, if one is set and non-blank
    pub fn effective_default(&self) -> Option<&str> {
        self.default_value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

// ============================================================================
// Tests
// ============================================================================
