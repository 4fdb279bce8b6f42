//! Custom (enum) type definitions

use ddlforge_core::{EngineError, EngineResult, SchemaId, TypeId, Validatable, new_id};
use serde::{Deserialize, Serialize};

/// Kind of a custom type. Only enums are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Enum,
}

/// An enum type declared in a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomType {
    pub id: TypeId,

    pub schema_id: SchemaId,

    pub name: String,

    #[serde(default)]
    pub kind: TypeKind,

    /// Enum labels in declared order; never empty
    pub values: Vec<String>,
}

impl CustomType {
    /// Create an enum type with a fresh id
    pub fn new_enum(
        schema_id: impl Into<SchemaId>,
        name: impl Into<String>,
        values: Vec<String>,
    ) -> Self {
        Self {
            id: new_id(),
            schema_id: schema_id.into(),
            name: name.into(),
            kind: TypeKind::Enum,
            values,
        }
    }
}

impl Validatable for CustomType {
    fn validate(&self) -> EngineResult<()> {
        if self.values.is_empty() {
            return Err(EngineError::EmptyEnum(self.name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_validation() {
        let ok = CustomType::new_enum("s1", "status", vec!["active".into(), "archived".into()]);
        assert!(ok.validate().is_ok());

        let empty = CustomType::new_enum("s1", "status", Vec::new());
        assert!(matches!(empty.validate(), Err(EngineError::EmptyEnum(_))));
    }

    #[test]
    fn test_kind_serde() {
        let t = CustomType::new_enum("s1", "mood", vec!["sad".into()]);
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["kind"], "enum");
        assert_eq!(value["schemaId"], "s1");
    }
}
