//! Inputs for create and update operations
//!
//! Every patch field is optional; `None` leaves the current value alone.
//! For optional text values (comments, defaults) an empty string clears.

use ddlforge_core::{ColumnId, ReferentialAction, SchemaId, TableId};
use serde::{Deserialize, Serialize};

/// Empty or blank text becomes `None`
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaPatch {
    pub name: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TablePatch {
    pub name: Option<String>,
    pub comment: Option<String>,
    /// Move the table to another existing schema
    pub schema_id: Option<SchemaId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    pub nullable: Option<bool>,
    pub default_value: Option<String>,
    pub is_primary_key: Option<bool>,
    pub is_unique: Option<bool>,
    pub is_indexed: Option<bool>,
    pub comment: Option<String>,
}

/// A new foreign key on some table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForeignKeySpec {
    /// Constraint name; synthesized from the table and column when absent
    pub name: Option<String>,
    pub from_column_id: ColumnId,
    pub to_table_id: TableId,
    pub to_column_id: ColumnId,
    pub on_delete: Option<ReferentialAction>,
    pub on_update: Option<ReferentialAction>,
    /// External cardinality word for the owning side
    pub start_cardinality: Option<String>,
    /// External cardinality word for the referenced side
    pub end_cardinality: Option<String>,
}

impl ForeignKeySpec {
    pub fn new(
        from_column_id: impl Into<ColumnId>,
        to_table_id: impl Into<TableId>,
        to_column_id: impl Into<ColumnId>,
    ) -> Self {
        Self {
            from_column_id: from_column_id.into(),
            to_table_id: to_table_id.into(),
            to_column_id: to_column_id.into(),
            ..Default::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    pub fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = Some(action);
        self
    }

    pub fn with_cardinality(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_cardinality = Some(start.into());
        self.end_cardinality = Some(end.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForeignKeyPatch {
    pub name: Option<String>,
    pub from_column_id: Option<ColumnId>,
    pub to_table_id: Option<TableId>,
    pub to_column_id: Option<ColumnId>,
    /// `Some(None)` clears the action
    pub on_delete: Option<Option<ReferentialAction>>,
    /// `Some(None)` clears the action
    pub on_update: Option<Option<ReferentialAction>>,
    pub start_cardinality: Option<String>,
    pub end_cardinality: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypePatch {
    pub name: Option<String>,
    /// Replacement label list; must not be empty
    pub values: Option<Vec<String>>,
}
