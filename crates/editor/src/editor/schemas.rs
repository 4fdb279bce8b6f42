//! Schema operations

use super::{SchemaEditor, base_name};
use crate::SchemaPatch;
use crate::patch::non_blank;
use ddlforge_core::{EngineResult, SchemaId, ensure_unique_name};
use ddlforge_model::Schema;
use tracing::debug;

impl SchemaEditor {
    /// Create a schema with a de-duplicated name and select it
    pub fn add_schema(&mut self, name: Option<&str>) -> SchemaId {
        let base = base_name(name, &self.config.default_schema_name);
        let name = ensure_unique_name(base, self.model.schemas.iter().map(|s| s.name.as_str()));
        let schema = Schema::new(name);
        let id = schema.id.clone();

        debug!(schema_id = %id, name = %schema.name, "Added schema");
        self.model.schemas.push(schema);
        self.selection.select_schema(id.clone());
        self.debug_check();
        id
    }

    /// Remove a schema with its tables and types.
    ///
    /// Returns `Ok(false)` without changing anything when it is the last
    /// schema. Foreign keys elsewhere that target a removed table are removed
    /// too. Undoable.
    pub fn remove_schema(&mut self, schema_id: &str) -> EngineResult<bool> {
        self.require_schema(schema_id)?;
        if self.model.schemas.len() <= 1 {
            debug!(schema_id, "Refused to remove the last schema");
            return Ok(false);
        }

        self.record("Remove schema");

        let doomed: Vec<String> = self
            .model
            .tables_in_schema(schema_id)
            .map(|t| t.id.clone())
            .collect();
        for table_id in &doomed {
            self.model.remove_table_cascade(table_id);
        }
        self.model.types.retain(|t| t.schema_id != schema_id);
        self.model.schemas.retain(|s| s.id != schema_id);

        let lost_selection = self.selection.schema_id.as_deref() == Some(schema_id)
            || self
                .selection
                .table_id
                .as_deref()
                .is_some_and(|t| doomed.iter().any(|d| d == t));
        if lost_selection {
            match self.model.schemas.first() {
                Some(schema) => self.selection.select_schema(schema.id.clone()),
                None => self.selection.clear(),
            }
        }
        self.selection.retain_valid(&self.model);

        debug!(schema_id, tables = doomed.len(), "Removed schema");
        self.debug_check();
        Ok(true)
    }

    /// Rename (de-duplicated against other schemas) and/or edit the comment
    pub fn update_schema(&mut self, schema_id: &str, patch: SchemaPatch) -> EngineResult<()> {
        self.require_schema(schema_id)?;

        let new_name = patch.name.as_deref().map(|name| {
            let base = base_name(Some(name), &self.config.default_schema_name);
            ensure_unique_name(
                base,
                self.model
                    .schemas
                    .iter()
                    .filter(|s| s.id != schema_id)
                    .map(|s| s.name.as_str()),
            )
        });

        if let Some(schema) = self.model.schema_mut(schema_id) {
            if let Some(name) = new_name {
                schema.name = name;
            }
            if let Some(comment) = patch.comment {
                schema.comment = non_blank(&comment);
            }
        }

        debug!(schema_id, "Updated schema");
        self.debug_check();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ForeignKeySpec;

    #[test]
    fn test_add_schema_deduplicates_and_selects() {
        let mut editor = SchemaEditor::new();
        let a = editor.add_schema(Some("sales"));
        let b = editor.add_schema(Some("sales"));
        let c = editor.add_schema(None);

        let names: Vec<&str> = editor.model().schemas.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["public", "sales", "sales_2", "schema"]);
        assert_ne!(a, b);
        assert_eq!(editor.selection().schema_id.as_deref(), Some(c.as_str()));
    }

    #[test]
    fn test_last_schema_protection() {
        let mut editor = SchemaEditor::new();
        let only = editor.model().schemas[0].id.clone();
        let before = editor.snapshot();

        assert!(!editor.remove_schema(&only).unwrap());
        assert_eq!(editor.model(), &before);
        assert_eq!(editor.model().schemas.len(), 1);
        assert_eq!(editor.model().schemas[0].id, only);
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_remove_unknown_schema_fails() {
        let mut editor = SchemaEditor::new();
        let err = editor.remove_schema("missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove_schema_cascades() {
        let mut editor = SchemaEditor::new();
        let public = editor.model().schemas[0].id.clone();
        let sales = editor.add_schema(Some("sales"));

        let customers = editor.add_table(&sales, Some("customers"), None).unwrap();
        let customer_pk = editor.model().table(&customers).unwrap().columns[0].id.clone();
        let invoices = editor.add_table(&public, Some("invoices"), None).unwrap();
        let customer_id = editor.add_column(&invoices, Some("customer_id")).unwrap();
        editor
            .add_foreign_key(&invoices, ForeignKeySpec::new(customer_id, customers.clone(), customer_pk))
            .unwrap();
        editor
            .add_type(&sales, Some("tier"), vec!["gold".into()])
            .unwrap();
        editor.select_table(&customers).unwrap();

        assert!(editor.remove_schema(&sales).unwrap());

        assert!(!editor.model().has_table(&customers));
        assert!(editor.model().has_table(&invoices));
        assert_eq!(editor.model().foreign_key_count(), 0);
        assert!(editor.model().types.is_empty());
        assert_eq!(editor.selection().schema_id.as_deref(), Some(public.as_str()));
        assert_eq!(editor.selection().table_id, None);
        assert!(editor.validate().is_valid());

        assert!(editor.undo());
        assert!(editor.model().has_table(&customers));
        assert_eq!(editor.model().foreign_key_count(), 1);
    }

    #[test]
    fn test_update_schema() {
        let mut editor = SchemaEditor::new();
        let sales = editor.add_schema(Some("sales"));

        editor
            .update_schema(
                &sales,
                SchemaPatch {
                    name: Some("public".into()),
                    comment: Some("Sales data".into()),
                },
            )
            .unwrap();
        let schema = editor.model().schema(&sales).unwrap();
        assert_eq!(schema.name, "public_2");
        assert_eq!(schema.comment.as_deref(), Some("Sales data"));

        // Renaming to its own name is not a collision.
        editor
            .update_schema(
                &sales,
                SchemaPatch {
                    name: Some("public_2".into()),
                    comment: Some("".into()),
                },
            )
            .unwrap();
        let schema = editor.model().schema(&sales).unwrap();
        assert_eq!(schema.name, "public_2");
        assert_eq!(schema.comment, None);

        assert!(editor.update_schema("missing", SchemaPatch::default()).is_err());
    }
}
