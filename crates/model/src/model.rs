//! The root aggregate
//!
//! `Model` is the only unit persisted or exchanged with external
//! collaborators. It is plain data; the editor crate is its only writer.

use crate::{
    CustomType, DEFAULT_SCHEMA_NAME, MODEL_VERSION, Schema,
    table::{Column, Table},
};
use ddlforge_core::{ColumnId, ForeignKeyId, TableId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Model
// ============================================================================

/// The complete schema design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Exchange format version
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub schemas: Vec<Schema>,

    /// Tables in iteration order (affects default layout and tie-breaking only)
    #[serde(default)]
    pub tables: Vec<Table>,

    #[serde(default)]
    pub types: Vec<CustomType>,
}

fn default_version() -> u32 {
    MODEL_VERSION
}

impl Model {
    /// A model with no schemas at all. Not valid until a schema is added.
    pub fn empty() -> Self {
        Self {
            version: MODEL_VERSION,
            schemas: Vec::new(),
            tables: Vec::new(),
            types: Vec::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_type(mut self, custom_type: CustomType) -> Self {
        self.types.push(custom_type);
        self
    }

    // ========================================================================
    // Schema lookups
    // ========================================================================

    pub fn schema(&self, id: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.id == id)
    }

    pub fn schema_mut(&mut self, id: &str) -> Option<&mut Schema> {
        self.schemas.iter_mut().find(|s| s.id == id)
    }

    pub fn has_schema(&self, id: &str) -> bool {
        self.schema(id).is_some()
    }

    /// Name of the schema owning `table`, or empty if it does not resolve
    pub fn schema_name_of(&self, table: &Table) -> &str {
        self.schema(&table.schema_id)
            .map(|s| s.name.as_str())
            .unwrap_or("")
    }

    // ========================================================================
    // Table lookups
    // ========================================================================

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn table_mut(&mut self, id: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    pub fn table_index(&self, id: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.id == id)
    }

    pub fn has_table(&self, id: &str) -> bool {
        self.table(id).is_some()
    }

    /// Tables owned by a schema, in iteration order
    pub fn tables_in_schema<'a>(&'a self, schema_id: &'a str) -> impl Iterator<Item = &'a Table> {
        self.tables.iter().filter(move |t| t.schema_id == schema_id)
    }

    /// Table names within a schema, optionally skipping one table id
    pub fn table_names_in_schema(&self, schema_id: &str, except: Option<&str>) -> Vec<String> {
        self.tables_in_schema(schema_id)
            .filter(|t| Some(t.id.as_str()) != except)
            .map(|t| t.name.clone())
            .collect()
    }

    /// Resolve a column by table id and column id
    pub fn find_column(&self, table_id: &str, column_id: &str) -> Option<&Column> {
        self.table(table_id).and_then(|t| t.column(column_id))
    }

    // ========================================================================
    // Type lookups
    // ========================================================================

    pub fn custom_type(&self, id: &str) -> Option<&CustomType> {
        self.types.iter().find(|t| t.id == id)
    }

    pub fn custom_type_mut(&mut self, id: &str) -> Option<&mut CustomType> {
        self.types.iter_mut().find(|t| t.id == id)
    }

    // ========================================================================
    // Cascade helpers
    // ========================================================================

    /// Remove every foreign key, on any table, whose target is `table_id`.
    ///
    /// Returns the ids of the removed constraints.
    pub fn remove_foreign_keys_to_table(&mut self, table_id: &str) -> Vec<ForeignKeyId> {
        let mut removed = Vec::new();
        for table in &mut self.tables {
            table.foreign_keys.retain(|fk| {
                if fk.targets_table(table_id) {
                    removed.push(fk.id.clone());
                    false
                } else {
                    true
                }
            });
        }
        removed
    }

    /// Remove every foreign key that uses `column_id` of `table_id`, either as
    /// its source (on the owning table) or as its target (on any table).
    pub fn remove_foreign_keys_referencing_column(
        &mut self,
        table_id: &str,
        column_id: &str,
    ) -> Vec<ForeignKeyId> {
        let mut removed = Vec::new();
        for table in &mut self.tables {
            let owns_column = table.id == table_id;
            table.foreign_keys.retain(|fk| {
                let from_here = owns_column && fk.from_column_id == column_id;
                if from_here || fk.targets_column(table_id, column_id) {
                    removed.push(fk.id.clone());
                    false
                } else {
                    true
                }
            });
        }
        removed
    }

    /// Remove a table and every foreign key that targets it
    pub fn remove_table_cascade(&mut self, table_id: &str) -> Option<Table> {
        let index = self.table_index(table_id)?;
        let table = self.tables.remove(index);
        self.remove_foreign_keys_to_table(table_id);
        Some(table)
    }

    /// Remove a column and every foreign key that uses it
    pub fn remove_column_cascade(&mut self, table_id: &str, column_id: &str) -> Option<Column> {
        let table = self.table_mut(table_id)?;
        let index = table.column_index(column_id)?;
        let column = table.columns.remove(index);
        self.remove_foreign_keys_referencing_column(table_id, column_id);
        Some(column)
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    pub fn foreign_key_count(&self) -> usize {
        self.tables.iter().map(|t| t.foreign_keys.len()).sum()
    }

    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    /// Every (table id, column id) pair in the model
    pub fn column_refs(&self) -> Vec<(TableId, ColumnId)> {
        self.tables
            .iter()
            .flat_map(|t| t.columns.iter().map(|c| (t.id.clone(), c.id.clone())))
            .collect()
    }
}

impl Default for Model {
    /// A model holding the single default schema
    fn default() -> Self {
        Self::empty().with_schema(Schema::new(DEFAULT_SCHEMA_NAME))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ForeignKey;
    use pretty_assertions::assert_eq;

    /// customers <- orders, orders.customer_id -> customers.id,
    /// plus a self-reference on customers.
    fn sample() -> (Model, String, String) {
        let schema = Schema::new("public");
        let customers_id = Column::new("id", "uuid").primary_key();
        let referrer = Column::new("referrer_id", "uuid");
        let mut customers = Table::new(schema.id.clone(), "customers")
            .with_column(customers_id.clone())
            .with_column(referrer.clone());
        customers.foreign_keys.push(ForeignKey::new(
            "fk_referrer",
            referrer.id.clone(),
            customers.id.clone(),
            customers_id.id.clone(),
        ));

        let customer_fk_col = Column::new("customer_id", "uuid");
        let orders = Table::new(schema.id.clone(), "orders")
            .with_column(Column::new("id", "uuid").primary_key())
            .with_column(customer_fk_col.clone())
            .with_foreign_key(ForeignKey::new(
                "fk_orders_customer",
                customer_fk_col.id.clone(),
                customers.id.clone(),
                customers_id.id.clone(),
            ));

        let customers_table_id = customers.id.clone();
        let model = Model::empty()
            .with_schema(schema)
            .with_table(customers)
            .with_table(orders);
        (model, customers_table_id, customers_id.id)
    }

    #[test]
    fn test_default_has_one_public_schema() {
        let model = Model::default();
        assert_eq!(model.schemas.len(), 1);
        assert_eq!(model.schemas[0].name, "public");
        assert!(model.tables.is_empty());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let model: Model = serde_json::from_str(r#"{"schemas":[{"id":"s","name":"public"}]}"#)
            .unwrap();
        assert_eq!(model.version, MODEL_VERSION);
        assert!(model.tables.is_empty());
        assert!(model.types.is_empty());
    }

    #[test]
    fn test_remove_table_cascade_removes_incoming_foreign_keys() {
        let (mut model, customers, _) = sample();
        assert_eq!(model.foreign_key_count(), 2);

        let removed = model.remove_table_cascade(&customers);
        assert!(removed.is_some());
        assert_eq!(model.tables.len(), 1);
        assert_eq!(model.foreign_key_count(), 0);
    }

    #[test]
    fn test_remove_column_cascade_removes_source_and_target_uses() {
        let (mut model, customers, customers_pk) = sample();

        model.remove_column_cascade(&customers, &customers_pk);
        assert_eq!(model.foreign_key_count(), 0);
        assert_eq!(model.table(&customers).map(|t| t.columns.len()), Some(1));
    }

    #[test]
    fn test_remove_column_cascade_source_only() {
        let (mut model, customers, _) = sample();
        let referrer = model.tables[0].columns[1].id.clone();

        model.remove_column_cascade(&customers, &referrer);
        // The self-reference goes; orders -> customers stays.
        assert_eq!(model.foreign_key_count(), 1);
        assert_eq!(model.tables[1].foreign_keys.len(), 1);
    }

    #[test]
    fn test_lookups() {
        let (model, customers, customers_pk) = sample();
        let schema_id = model.schemas[0].id.clone();

        assert!(model.has_table(&customers));
        assert_eq!(model.table_index(&customers), Some(0));
        assert_eq!(model.tables_in_schema(&schema_id).count(), 2);
        assert_eq!(
            model.table_names_in_schema(&schema_id, Some(&customers)),
            vec!["orders".to_string()]
        );
        assert_eq!(
            model.find_column(&customers, &customers_pk).map(|c| c.name.as_str()),
            Some("id")
        );
        assert_eq!(model.schema_name_of(&model.tables[0]), "public");
        assert_eq!(model.column_refs().len(), 4);
    }
}
