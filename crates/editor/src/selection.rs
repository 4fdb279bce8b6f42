//! Selection state
//!
//! At most one schema, one table and one column are selected. Every pointer
//! either resolves in the live model or is `None`.

use ddlforge_core::{ColumnId, SchemaId, TableId};
use ddlforge_model::Model;

/// Tracks what is currently selected
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub schema_id: Option<SchemaId>,
    pub table_id: Option<TableId>,
    /// Only set together with `table_id`; the column lives on that table
    pub column_id: Option<ColumnId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.schema_id = None;
        self.table_id = None;
        self.column_id = None;
    }

    pub fn is_empty(&self) -> bool {
        self.schema_id.is_none() && self.table_id.is_none() && self.column_id.is_none()
    }

    /// Select a schema alone
    pub fn select_schema(&mut self, schema_id: impl Into<SchemaId>) {
        self.schema_id = Some(schema_id.into());
        self.table_id = None;
        self.column_id = None;
    }

    /// Select a table (and its schema)
    pub fn select_table(&mut self, schema_id: impl Into<SchemaId>, table_id: impl Into<TableId>) {
        self.schema_id = Some(schema_id.into());
        self.table_id = Some(table_id.into());
        self.column_id = None;
    }

    /// Select a column (and its table and schema)
    pub fn select_column(
        &mut self,
        schema_id: impl Into<SchemaId>,
        table_id: impl Into<TableId>,
        column_id: impl Into<ColumnId>,
    ) {
        self.schema_id = Some(schema_id.into());
        self.table_id = Some(table_id.into());
        self.column_id = Some(column_id.into());
    }

    pub fn is_table_selected(&self, table_id: &str) -> bool {
        self.table_id.as_deref() == Some(table_id)
    }

    pub fn is_column_selected(&self, column_id: &str) -> bool {
        self.column_id.as_deref() == Some(column_id)
    }

    /// Whether every pointer resolves in `model`
    pub fn is_valid_for(&self, model: &Model) -> bool {
        let schema_ok = self.schema_id.as_deref().is_none_or(|id| model.has_schema(id));
        let table_ok = self.table_id.as_deref().is_none_or(|id| model.has_table(id));
        let column_ok = match (&self.table_id, &self.column_id) {
            (_, None) => true,
            (Some(table), Some(column)) => model.find_column(table, column).is_some(),
            (None, Some(_)) => false,
        };
        schema_ok && table_ok && column_ok
    }

    /// Reset every pointer that no longer resolves to `None`
    pub fn retain_valid(&mut self, model: &Model) {
        if self.schema_id.as_deref().is_some_and(|id| !model.has_schema(id)) {
            self.schema_id = None;
        }
        if self.table_id.as_deref().is_some_and(|id| !model.has_table(id)) {
            self.table_id = None;
        }
        let column_ok = match (&self.table_id, &self.column_id) {
            (Some(table), Some(column)) => model.find_column(table, column).is_some(),
            _ => false,
        };
        if !column_ok {
            self.column_id = None;
        }
    }
}
