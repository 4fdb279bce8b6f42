//! Foreign key operations, including many-to-many conversion

use super::SchemaEditor;
use crate::many_to_many::convert_to_many_to_many;
use crate::{ForeignKeyPatch, ForeignKeySpec};
use ddlforge_core::{
    Cardinality, EngineError, EngineResult, ForeignKeyId, TableId, ensure_unique_constraint_name,
    sanitize_constraint_name,
};
use ddlforge_model::{ForeignKey, Table};
use tracing::debug;

impl SchemaEditor {
    /// Check that `(to_table_id, to_column_id)` resolves
    fn require_target(&self, to_table_id: &str, to_column_id: &str) -> EngineResult<&Table> {
        let target = self.model.table(to_table_id).ok_or_else(|| {
            EngineError::invalid_reference(format!("target table '{}' does not exist", to_table_id))
        })?;
        if !target.has_column(to_column_id) {
            return Err(EngineError::invalid_reference(format!(
                "target column '{}' does not exist on '{}'",
                to_column_id, target.name
            )));
        }
        Ok(target)
    }


    /// Add a foreign key to `table_id`.
    ///
    /// The source column and the target table and column must exist. The
    /// constraint name is sanitized and de-duplicated against the table's
    /// other constraints. A recognised cardinality hint becomes an explicit
    /// override; an unknown word is dropped so the cardinality stays inferred.
    pub fn add_foreign_key(
        &mut self,
        table_id: &str,
        spec: ForeignKeySpec,
    ) -> EngineResult<ForeignKeyId> {
        let owner = self.require_table(table_id)?;
        let from_column = owner
            .column(&spec.from_column_id)
            .ok_or_else(|| EngineError::column_not_found(&owner.name, &spec.from_column_id))?;
        self.require_target(&spec.to_table_id, &spec.to_column_id)?;

        let fallback = format!("fk_{}_{}", owner.name, from_column.name);
        let candidate = spec.name.as_deref().unwrap_or(&fallback);
        let name = ensure_unique_constraint_name(
            &sanitize_constraint_name(candidate, &fallback),
            owner.constraint_names_except(None),
        );

        let mut fk = ForeignKey::new(name, spec.from_column_id, spec.to_table_id, spec.to_column_id);
        fk.on_delete = spec.on_delete;
        fk.on_update = spec.on_update;
        fk.start_cardinality = spec.start_cardinality.as_deref().and_then(Cardinality::parse);
        fk.end_cardinality = spec.end_cardinality.as_deref().and_then(Cardinality::parse);
        let id = fk.id.clone();

        debug!(table_id, fk_id = %id, name = %fk.name, "Added foreign key");
        self.require_table_mut(table_id)?.foreign_keys.push(fk);
        self.debug_check();
        Ok(id)
    }

    /// Edit a foreign key. A new name is de-duplicated against the table's
    /// other constraints (not against itself); changed references must
    /// resolve.
    pub fn update_foreign_key(
        &mut self,
        table_id: &str,
        fk_id: &str,
        patch: ForeignKeyPatch,
    ) -> EngineResult<()> {
        let owner = self.require_table(table_id)?;
        let current = owner
            .foreign_key(fk_id)
            .ok_or_else(|| EngineError::foreign_key_not_found(&owner.name, fk_id))?;

        let from_column_id = patch
            .from_column_id
            .clone()
            .unwrap_or_else(|| current.from_column_id.clone());
        let from_column = owner
            .column(&from_column_id)
            .ok_or_else(|| EngineError::column_not_found(&owner.name, &from_column_id))?;
        let to_table_id = patch
            .to_table_id
            .clone()
            .unwrap_or_else(|| current.to_table_id.clone());
        let to_column_id = patch
            .to_column_id
            .clone()
            .unwrap_or_else(|| current.to_column_id.clone());
        self.require_target(&to_table_id, &to_column_id)?;

        let new_name = patch.name.as_deref().map(|name| {
            let fallback = format!("fk_{}_{}", owner.name, from_column.name);
            ensure_unique_constraint_name(
                &sanitize_constraint_name(name, &fallback),
                owner.constraint_names_except(Some(fk_id)),
            )
        });
        // Unknown words leave the current override (or inference) alone
        let start = patch.start_cardinality.as_deref().and_then(Cardinality::parse);
        let end = patch.end_cardinality.as_deref().and_then(Cardinality::parse);

        let owner = self.require_table_mut(table_id)?;
        let Some(fk) = owner.foreign_key_mut(fk_id) else {
            return Err(EngineError::internal("foreign key vanished during update"));
        };
        if let Some(name) = new_name {
            fk.name = name;
        }
        fk.from_column_id = from_column_id;
        fk.to_table_id = to_table_id;
        fk.to_column_id = to_column_id;
        if let Some(action) = patch.on_delete {
            fk.on_delete = action;
        }
        if let Some(action) = patch.on_update {
            fk.on_update = action;
        }
        if start.is_some() {
            fk.start_cardinality = start;
        }
        if end.is_some() {
            fk.end_cardinality = end;
        }

        debug!(table_id, fk_id, "Updated foreign key");
        self.debug_check();
        Ok(())
    }

    /// Remove a foreign key. `Ok(None)` when the table has no such key.
    pub fn remove_foreign_key(
        &mut self,
        table_id: &str,
        fk_id: &str,
    ) -> EngineResult<Option<ForeignKey>> {
        let removed = self.require_table_mut(table_id)?.remove_foreign_key(fk_id);
        if let Some(fk) = &removed {
            debug!(table_id, fk_id, name = %fk.name, "Removed foreign key");
        }
        Ok(removed)
    }

    /// Rewrite a foreign key into a join table with two foreign keys.
    ///
    /// On success the join table and its first column are selected and the
    /// previous state is undoable. On failure nothing changes.
    pub fn convert_foreign_key_to_many_to_many(
        &mut self,
        table_id: &str,
        fk_id: &str,
    ) -> EngineResult<TableId> {
        let outcome = convert_to_many_to_many(&self.model, table_id, fk_id, self.config.lane_spacing)?;

        self.record("Convert to many-to-many");
        self.model = outcome.model;

        let schema_id = self
            .model
            .table(&outcome.join_table_id)
            .map(|t| t.schema_id.clone())
            .ok_or_else(|| EngineError::internal("join table missing after conversion"))?;
        self.selection
            .select_column(schema_id, outcome.join_table_id.clone(), outcome.left_column_id);

        debug!(
            table_id,
            fk_id,
            join_table_id = %outcome.join_table_id,
            removed_column = ?outcome.removed_column_id,
            "Converted foreign key to many-to-many"
        );
        self.debug_check();
        Ok(outcome.join_table_id)
    }
}
