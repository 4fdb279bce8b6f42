//! Editor configuration

use serde::{Deserialize, Serialize};

/// Template for the primary-key column every new table starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKeyTemplate {
    pub name: String,
    pub data_type: String,
    pub default_value: Option<String>,
}

impl Default for PrimaryKeyTemplate {
    fn default() -> Self {
        Self {
            name: "id".to_string(),
            data_type: "uuid".to_string(),
            default_value: Some("gen_random_uuid()".to_string()),
        }
    }
}

/// Settings for a [`SchemaEditor`](crate::SchemaEditor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Maximum number of undo snapshots kept; the oldest is evicted first
    pub history_depth: usize,

    pub default_schema_name: String,
    pub default_table_name: String,
    pub default_column_name: String,
    pub default_type_name: String,

    /// Type given to columns created without one
    pub default_column_type: String,

    pub primary_key: PrimaryKeyTemplate,

    /// Horizontal distance between tables laid out on a many-to-many lane
    pub lane_spacing: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: 50,
            default_schema_name: "schema".to_string(),
            default_table_name: "table".to_string(),
            default_column_name: "column".to_string(),
            default_type_name: "enum_type".to_string(),
            default_column_type: "text".to_string(),
            primary_key: PrimaryKeyTemplate::default(),
            lane_spacing: 320.0,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    pub fn with_default_column_type(mut self, data_type: impl Into<String>) -> Self {
        self.default_column_type = data_type.into();
        self
    }

    pub fn with_primary_key(mut self, template: PrimaryKeyTemplate) -> Self {
        self.primary_key = template;
        self
    }

    pub fn with_lane_spacing(mut self, spacing: f32) -> Self {
        self.lane_spacing = spacing;
        self
    }

    pub fn with_default_names(
        mut self,
        schema: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        self.default_schema_name = schema.into();
        self.default_table_name = table.into();
        self.default_column_name = column.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.history_depth, 50);
        assert_eq!(config.default_column_type, "text");
        assert_eq!(config.primary_key.name, "id");
        assert_eq!(config.primary_key.default_value.as_deref(), Some("gen_random_uuid()"));
    }

    #[test]
    fn test_builder() {
        let config = EditorConfig::new()
            .with_history_depth(3)
            .with_default_column_type("varchar(255)")
            .with_lane_spacing(100.0)
            .with_default_names("ns", "entity", "field");
        assert_eq!(config.history_depth, 3);
        assert_eq!(config.default_column_type, "varchar(255)");
        assert_eq!(config.lane_spacing, 100.0);
        assert_eq!(config.default_table_name, "entity");
    }

    #[test]
    fn test_partial_deserialize() {
        let config: EditorConfig = serde_json::from_str(r#"{"historyDepth": 10}"#).unwrap();
        assert_eq!(config.history_depth, 10);
        assert_eq!(config.lane_spacing, 320.0);
    }
}
