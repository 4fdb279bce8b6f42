//! Column operations

use super::{SchemaEditor, base_name};
use crate::ColumnPatch;
use crate::patch::non_blank;
use ddlforge_core::{ColumnId, EngineError, EngineResult, ensure_unique_name};
use ddlforge_model::Column;
use tracing::debug;

impl SchemaEditor {
    /// Append a column to a table and select it.
    ///
    /// The column gets the configured default type and is nullable.
    pub fn add_column(&mut self, table_id: &str, name: Option<&str>) -> EngineResult<ColumnId> {
        let default_name = self.config.default_column_name.clone();
        let data_type = self.config.default_column_type.clone();

        let table = self.require_table_mut(table_id)?;
        let base = base_name(name, &default_name);
        let name = ensure_unique_name(base, table.column_names_except(None));
        let column = Column::new(name, data_type);
        let id = column.id.clone();
        let schema_id = table.schema_id.clone();

        debug!(table_id, column_id = %id, name = %column.name, "Added column");
        table.columns.push(column);
        self.selection.select_column(schema_id, table_id, id.clone());
        self.debug_check();
        Ok(id)
    }

    /// Remove a column and every foreign key that uses it as source or
    /// target. Undoable.
    pub fn remove_column(&mut self, table_id: &str, column_id: &str) -> EngineResult<Column> {
        let table = self.require_table(table_id)?;
        if !table.has_column(column_id) {
            return Err(EngineError::column_not_found(&table.name, column_id));
        }

        self.record("Remove column");
        let column = self
            .model
            .remove_column_cascade(table_id, column_id)
            .ok_or_else(|| EngineError::internal("column vanished during removal"))?;

        if self.selection.is_column_selected(column_id) {
            self.selection.column_id = None;
        }
        self.selection.retain_valid(&self.model);

        debug!(table_id, column_id, name = %column.name, "Removed column");
        self.debug_check();
        Ok(column)
    }

    /// Edit a column's attributes. A new name is de-duplicated against the
    /// other columns of the table; marking a column primary key also makes
    /// it NOT NULL.
    pub fn update_column(
        &mut self,
        table_id: &str,
        column_id: &str,
        patch: ColumnPatch,
    ) -> EngineResult<()> {
        let default_name = self.config.default_column_name.clone();
        let table = self.require_table_mut(table_id)?;
        if !table.has_column(column_id) {
            return Err(EngineError::column_not_found(&table.name, column_id));
        }

        let new_name = patch.name.as_deref().map(|name| {
            ensure_unique_name(
                base_name(Some(name), &default_name),
                table.column_names_except(Some(column_id)),
            )
        });

        let Some(column) = table.column_mut(column_id) else {
            return Err(EngineError::internal("column vanished during update"));
        };
        if let Some(name) = new_name {
            column.name = name;
        }
        if let Some(data_type) = patch.data_type {
            column.data_type = data_type;
        }
        if let Some(nullable) = patch.nullable {
            column.nullable = nullable;
        }
        if let Some(default_value) = patch.default_value {
            column.default_value = non_blank(&default_value);
        }
        if let Some(unique) = patch.is_unique {
            column.is_unique = unique;
        }
        if let Some(indexed) = patch.is_indexed {
            column.is_indexed = indexed;
        }
        if let Some(comment) = patch.comment {
            column.comment = non_blank(&comment);
        }
        if let Some(primary_key) = patch.is_primary_key {
            column.is_primary_key = primary_key;
            if primary_key {
                column.nullable = false;
            }
        }

        debug!(table_id, column_id, "Updated column");
        self.debug_check();
        Ok(())
    }

    /// Move `column_id` into the slot `target_column_id` occupies.
    ///
    /// Returns `Ok(false)` when either column is absent or they are the same.
    pub fn move_column(
        &mut self,
        table_id: &str,
        column_id: &str,
        target_column_id: &str,
    ) -> EngineResult<bool> {
        let moved = self
            .require_table_mut(table_id)?
            .move_column(column_id, target_column_id);
        if moved {
            debug!(table_id, column_id, target_column_id, "Moved column");
        }
        Ok(moved)
    }
}
