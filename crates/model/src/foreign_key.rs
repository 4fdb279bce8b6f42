//! Foreign key constraints
//!
//! A `ForeignKey` is owned by the table that holds its source column. The
//! target is addressed by table id and column id, so it stays valid across
//! renames and only breaks when the target is deleted.

use ddlforge_core::{
    Cardinality, ColumnId, ForeignKeyId, ReferentialAction, TableId, new_id,
    types::deserialize_cardinality_hint,
};
use serde::{Deserialize, Serialize};

/// A named constraint binding one column to a column of another (or the same) table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    pub id: ForeignKeyId,

    /// Constraint name, unique within the owning table
    pub name: String,

    /// Source column on the owning table
    pub from_column_id: ColumnId,

    pub to_table_id: TableId,

    pub to_column_id: ColumnId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ReferentialAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ReferentialAction>,

    /// Explicit multiplicity of the owning side; overrides inference
    #[serde(
        default,
        deserialize_with = "deserialize_cardinality_hint",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_cardinality: Option<Cardinality>,

    /// Explicit multiplicity of the referenced side; overrides inference
    #[serde(
        default,
        deserialize_with = "deserialize_cardinality_hint",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_cardinality: Option<Cardinality>,
}

impl ForeignKey {
    /// Create a foreign key with a fresh id and no referential actions
    pub fn new(
        name: impl Into<String>,
        from_column_id: impl Into<ColumnId>,
        to_table_id: impl Into<TableId>,
        to_column_id: impl Into<ColumnId>,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            from_column_id: from_column_id.into(),
            to_table_id: to_table_id.into(),
            to_column_id: to_column_id.into(),
            on_delete: None,
            on_update: None,
            start_cardinality: None,
            end_cardinality: None,
        }
    }

    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    pub fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = Some(action);
        self
    }

    pub fn with_cardinality(mut self, start: Cardinality, end: Cardinality) -> Self {
        self.start_cardinality = Some(start);
        self.end_cardinality = Some(end);
        self
    }

    /// Whether this constraint points at `table_id`
    pub fn targets_table(&self, table_id: &str) -> bool {
        self.to_table_id == table_id
    }

    /// Whether this constraint points at `column_id` of `table_id`
    pub fn targets_column(&self, table_id: &str, column_id: &str) -> bool {
        self.to_table_id == table_id && self.to_column_id == column_id
    }
}
