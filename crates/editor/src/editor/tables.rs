//! Table operations

use super::{SchemaEditor, base_name};
use crate::TablePatch;
use crate::patch::non_blank;
use ddlforge_core::{EngineError, EngineResult, Position, TableId, ensure_unique_name};
use ddlforge_model::{Column, Table};
use tracing::debug;

impl SchemaEditor {
    /// Create a table in `schema_id` and select it.
    ///
    /// The name is de-duplicated against sibling tables of the same schema.
    /// The table starts with the configured primary-key column.
    pub fn add_table(
        &mut self,
        schema_id: &str,
        name: Option<&str>,
        position: Option<Position>,
    ) -> EngineResult<TableId> {
        self.require_schema(schema_id)?;

        let base = base_name(name, &self.config.default_table_name);
        let name = ensure_unique_name(base, self.model.table_names_in_schema(schema_id, None));

        let template = &self.config.primary_key;
        let mut pk = Column::new(template.name.clone(), template.data_type.clone()).primary_key();
        pk.default_value = template.default_value.clone();

        let mut table = Table::new(schema_id, name).with_column(pk);
        table.position = position;
        let id = table.id.clone();

        debug!(table_id = %id, name = %table.name, schema_id, "Added table");
        self.model.tables.push(table);
        self.selection.select_table(schema_id, id.clone());
        self.debug_check();
        Ok(id)
    }

    /// Remove a table and every foreign key that targets it. Undoable.
    pub fn remove_table(&mut self, table_id: &str) -> EngineResult<Table> {
        let schema_id = self.require_table(table_id)?.schema_id.clone();

        self.record("Remove table");
        let table = self
            .model
            .remove_table_cascade(table_id)
            .ok_or_else(|| EngineError::internal("table vanished during removal"))?;

        if self.selection.is_table_selected(table_id) {
            self.selection.select_schema(schema_id);
        }
        self.selection.retain_valid(&self.model);

        debug!(table_id, name = %table.name, "Removed table");
        self.debug_check();
        Ok(table)
    }

    /// Rename, re-comment or move a table to another schema.
    ///
    /// The name is de-duplicated within the (possibly new) schema.
    pub fn update_table(&mut self, table_id: &str, patch: TablePatch) -> EngineResult<()> {
        let table = self.require_table(table_id)?;
        let target_schema = patch.schema_id.clone().unwrap_or_else(|| table.schema_id.clone());
        self.require_schema(&target_schema)?;

        let moving = target_schema != table.schema_id;
        let wanted = patch.name.as_deref().unwrap_or(&table.name);
        let new_name = if moving || patch.name.is_some() {
            let base = base_name(Some(wanted), &self.config.default_table_name);
            Some(ensure_unique_name(
                base,
                self.model.table_names_in_schema(&target_schema, Some(table_id)),
            ))
        } else {
            None
        };

        let table = self.require_table_mut(table_id)?;
        table.schema_id = target_schema.clone();
        if let Some(name) = new_name {
            table.name = name;
        }
        if let Some(comment) = patch.comment {
            table.comment = non_blank(&comment);
        }

        if moving && self.selection.is_table_selected(table_id) {
            self.selection.schema_id = Some(target_schema);
        }

        debug!(table_id, moved = moving, "Updated table");
        self.debug_check();
        Ok(())
    }

    /// Place a table on the canvas
    pub fn set_table_position(&mut self, table_id: &str, position: Position) -> EngineResult<()> {
        self.require_table_mut(table_id)?.position = Some(position);
        Ok(())
    }

    /// Place several tables at once; nothing moves if any id is unknown
    pub fn set_table_positions(&mut self, positions: &[(TableId, Position)]) -> EngineResult<()> {
        for (table_id, _) in positions {
            self.require_table(table_id)?;
        }
        for (table_id, position) in positions {
            self.require_table_mut(table_id)?.position = Some(*position);
        }
        debug!(count = positions.len(), "Moved tables");
        Ok(())
    }
}
