//! Enum type operations
//!
//! Columns reference enum types by name through their free-form
//! `data_type`, so renaming or removing a type leaves those columns alone.

use super::{SchemaEditor, base_name};
use crate::TypePatch;
use ddlforge_core::{EngineError, EngineResult, TypeId, ensure_unique_name};
use ddlforge_model::CustomType;
use tracing::debug;

impl SchemaEditor {
    fn type_names_in_schema<'a>(
        &'a self,
        schema_id: &'a str,
        except: Option<&'a str>,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.model
            .types
            .iter()
            .filter(move |t| t.schema_id == schema_id && except.is_none_or(|id| t.id != id))
            .map(|t| t.name.as_str())
    }

    /// Create an enum type in `schema_id`. `values` must not be empty.
    pub fn add_type(
        &mut self,
        schema_id: &str,
        name: Option<&str>,
        values: Vec<String>,
    ) -> EngineResult<TypeId> {
        self.require_schema(schema_id)?;
        let base = base_name(name, &self.config.default_type_name);
        if values.is_empty() {
            return Err(EngineError::EmptyEnum(base.to_string()));
        }

        let name = ensure_unique_name(base, self.type_names_in_schema(schema_id, None));
        let custom_type = CustomType::new_enum(schema_id, name, values);
        let id = custom_type.id.clone();

        debug!(type_id = %id, name = %custom_type.name, schema_id, "Added enum type");
        self.model.types.push(custom_type);
        self.debug_check();
        Ok(id)
    }

    pub fn update_type(&mut self, type_id: &str, patch: TypePatch) -> EngineResult<()> {
        let current = self
            .model
            .custom_type(type_id)
            .ok_or_else(|| EngineError::TypeNotFound(type_id.to_string()))?;
        if patch.values.as_ref().is_some_and(|v| v.is_empty()) {
            return Err(EngineError::EmptyEnum(current.name.clone()));
        }

        let new_name = patch.name.as_deref().map(|name| {
            ensure_unique_name(
                base_name(Some(name), &self.config.default_type_name),
                self.type_names_in_schema(&current.schema_id, Some(type_id)),
            )
        });

        let Some(custom_type) = self.model.custom_type_mut(type_id) else {
            return Err(EngineError::internal("type vanished during update"));
        };
        if let Some(name) = new_name {
            custom_type.name = name;
        }
        if let Some(values) = patch.values {
            custom_type.values = values;
        }

        debug!(type_id, "Updated enum type");
        self.debug_check();
        Ok(())
    }

    pub fn remove_type(&mut self, type_id: &str) -> EngineResult<CustomType> {
        let index = self
            .model
            .types
            .iter()
            .position(|t| t.id == type_id)
            .ok_or_else(|| EngineError::TypeNotFound(type_id.to_string()))?;
        let removed = self.model.types.remove(index);
        debug!(type_id, name = %removed.name, "Removed enum type");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnPatch;
    use pretty_assertions::assert_eq;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_add_type() {
        let mut editor = SchemaEditor::new();
        let public = editor.model().schemas[0].id.clone();
        let audit = editor.add_schema(Some("audit"));

        let status = editor
            .add_type(&public, Some("status"), labels(&["active", "archived"]))
            .unwrap();
        let again = editor.add_type(&public, Some("status"), labels(&["x"])).unwrap();
        let other = editor.add_type(&audit, Some("status"), labels(&["x"])).unwrap();
        let unnamed = editor.add_type(&public, None, labels(&["x"])).unwrap();

        let model = editor.model();
        assert_eq!(model.custom_type(&status).unwrap().values, labels(&["active", "archived"]));
        assert_eq!(model.custom_type(&again).unwrap().name, "status_2");
        assert_eq!(model.custom_type(&other).unwrap().name, "status");
        assert_eq!(model.custom_type(&unnamed).unwrap().name, "enum_type");
        assert!(editor.validate().is_valid());
    }

    #[test]
    fn test_add_type_rejects_empty_and_unknown_schema() {
        let mut editor = SchemaEditor::new();
        let public = editor.model().schemas[0].id.clone();

        let err = editor.add_type(&public, Some("status"), Vec::new()).unwrap_err();
        assert!(matches!(err, EngineError::EmptyEnum(name) if name == "status"));
        assert!(editor.add_type("missing", None, labels(&["x"])).unwrap_err().is_not_found());
        assert!(editor.model().types.is_empty());
    }

    #[test]
    fn test_update_type() {
        let mut editor = SchemaEditor::new();
        let public = editor.model().schemas[0].id.clone();
        let mood = editor.add_type(&public, Some("mood"), labels(&["happy"])).unwrap();
        editor.add_type(&public, Some("status"), labels(&["on"])).unwrap();

        editor
            .update_type(
                &mood,
                TypePatch {
                    name: Some("status".into()),
                    values: Some(labels(&["happy", "sad"])),
                },
            )
            .unwrap();
        let custom_type = editor.model().custom_type(&mood).unwrap();
        assert_eq!(custom_type.name, "status_2");
        assert_eq!(custom_type.values, labels(&["happy", "sad"]));

        let err = editor
            .update_type(
                &mood,
                TypePatch {
                    values: Some(Vec::new()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::EmptyEnum(_)));
        assert_eq!(editor.model().custom_type(&mood).unwrap().values.len(), 2);
        assert!(editor.update_type("missing", TypePatch::default()).is_err());
    }

    #[test]
    fn test_remove_type_leaves_columns_alone() {
        let mut editor = SchemaEditor::new();
        let public = editor.model().schemas[0].id.clone();
        let mood = editor.add_type(&public, Some("mood"), labels(&["happy"])).unwrap();
        let people = editor.add_table(&public, Some("people"), None).unwrap();
        let column = editor.add_column(&people, Some("mood")).unwrap();
        editor
            .update_column(
                &people,
                &column,
                ColumnPatch {
                    data_type: Some("mood".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let removed = editor.remove_type(&mood).unwrap();
        assert_eq!(removed.name, "mood");
        assert!(editor.model().types.is_empty());
        assert_eq!(editor.model().find_column(&people, &column).unwrap().data_type, "mood");
        assert!(matches!(editor.remove_type(&mood), Err(EngineError::TypeNotFound(_))));
    }
}
