//! Schema (namespace) definitions

use ddlforge_core::{SchemaId, new_id};
use serde::{Deserialize, Serialize};

/// A named namespace grouping tables and types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub id: SchemaId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Schema {
    /// Create a schema with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            comment: None,
        }
    }

    /// Set the comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_serde_shape() {
        let schema = Schema {
            id: "s1".into(),
            name: "sales".into(),
            comment: None,
        };
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(json, r#"{"id":"s1","name":"sales"}"#);

        let back: Schema = serde_json::from_str(r#"{"id":"s1","name":"sales","comment":"x"}"#)
            .unwrap();
        assert_eq!(back.comment.as_deref(), Some("x"));
    }
}
