//! Model invariant checking
//!
//! `validate_model` checks every structural invariant a live model must hold
//! and reports violations as errors. Softer problems (duplicate schema names,
//! tables without a primary key) are warnings.

use crate::Model;
use ddlforge_core::{EngineError, EngineResult, Validatable};
use std::collections::HashSet;

// ============================================================================
// ValidationResult
// ============================================================================

/// Outcome of a model check
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// No errors (warnings allowed)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether any error carries `code`
    pub fn has_error(&self, code: ValidationCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    pub fn has_warning(&self, code: ValidationCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Convert to EngineResult (fails if any errors)
    pub fn into_result(self) -> EngineResult<()> {
        if self.is_valid() {
            return Ok(());
        }
        let msg = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(EngineError::validation(msg))
    }
}

// ============================================================================
// ValidationIssue
// ============================================================================

/// A single finding
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub code: ValidationCode,

    pub message: String,

    /// Path to the problematic element (e.g. `tables.orders.foreignKeys.fk_x`)
    pub path: Option<String>,
}

impl ValidationIssue {
    pub fn new(code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] {}", path, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

// ============================================================================
// ValidationCode
// ============================================================================

/// Machine-readable finding codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCode {
    // Errors
    NoSchema,
    DuplicateId,
    OrphanTable,
    DuplicateTableName,
    DuplicateColumnName,
    DanglingForeignKeySource,
    DanglingForeignKeyTarget,
    DuplicateConstraintName,
    OrphanType,
    EmptyEnum,

    // Warnings
    DuplicateSchemaName,
    DuplicateTypeName,
    NoPrimaryKey,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::NoSchema => "no_schema",
            ValidationCode::DuplicateId => "duplicate_id",
            ValidationCode::OrphanTable => "orphan_table",
            ValidationCode::DuplicateTableName => "duplicate_table_name",
            ValidationCode::DuplicateColumnName => "duplicate_column_name",
            ValidationCode::DanglingForeignKeySource => "dangling_foreign_key_source",
            ValidationCode::DanglingForeignKeyTarget => "dangling_foreign_key_target",
            ValidationCode::DuplicateConstraintName => "duplicate_constraint_name",
            ValidationCode::OrphanType => "orphan_type",
            ValidationCode::EmptyEnum => "empty_enum",
            ValidationCode::DuplicateSchemaName => "duplicate_schema_name",
            ValidationCode::DuplicateTypeName => "duplicate_type_name",
            ValidationCode::NoPrimaryKey => "no_primary_key",
        }
    }
}

impl std::fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Checks
// ============================================================================

/// Check a model against every structural invariant
pub fn validate_model(model: &Model) -> ValidationResult {
    let mut result = ValidationResult::ok();

    check_schemas(model, &mut result);
    check_ids(model, &mut result);
    check_tables(model, &mut result);
    check_foreign_keys(model, &mut result);
    check_types(model, &mut result);

    result
}

fn check_schemas(model: &Model, result: &mut ValidationResult) {
    if model.schemas.is_empty() {
        result.add_error(ValidationIssue::new(
            ValidationCode::NoSchema,
            "Model must contain at least one schema",
        ));
    }

    let mut names = HashSet::new();
    for schema in &model.schemas {
        if !names.insert(schema.name.as_str()) {
            result.add_warning(
                ValidationIssue::new(
                    ValidationCode::DuplicateSchemaName,
                    format!("Schema name '{}' is used more than once", schema.name),
                )
                .with_path(format!("schemas.{}", schema.name)),
            );
        }
    }
}

fn check_ids(model: &Model, result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    let mut check = |kind: &str, id: &str, result: &mut ValidationResult| {
        if !seen.insert(id.to_string()) {
            result.add_error(ValidationIssue::new(
                ValidationCode::DuplicateId,
                format!("{} id '{}' is not unique", kind, id),
            ));
        }
    };

    for schema in &model.schemas {
        check("Schema", &schema.id, result);
    }
    for table in &model.tables {
        check("Table", &table.id, result);
        for column in &table.columns {
            check("Column", &column.id, result);
        }
        for fk in &table.foreign_keys {
            check("Foreign key", &fk.id, result);
        }
    }
    for custom_type in &model.types {
        check("Type", &custom_type.id, result);
    }
}

fn check_tables(model: &Model, result: &mut ValidationResult) {
    let mut table_names = HashSet::new();

    for table in &model.tables {
        let path = format!("tables.{}", table.name);

        if !model.has_schema(&table.schema_id) {
            result.add_error(
                ValidationIssue::new(
                    ValidationCode::OrphanTable,
                    format!("Table '{}' belongs to a schema that does not exist", table.name),
                )
                .with_path(path.clone()),
            );
        }

        if !table_names.insert((table.schema_id.as_str(), table.name.as_str())) {
            result.add_error(
                ValidationIssue::new(
                    ValidationCode::DuplicateTableName,
                    format!("Table name '{}' is used twice in one schema", table.name),
                )
                .with_path(path.clone()),
            );
        }

        let mut column_names = HashSet::new();
        for column in &table.columns {
            if !column_names.insert(column.name.as_str()) {
                result.add_error(
                    ValidationIssue::new(
                        ValidationCode::DuplicateColumnName,
                        format!("Column name '{}' is used twice", column.name),
                    )
                    .with_path(format!("{}.columns.{}", path, column.name)),
                );
            }
        }

        if table.primary_key_columns().is_empty() {
            result.add_warning(
                ValidationIssue::new(
                    ValidationCode::NoPrimaryKey,
                    format!("Table '{}' has no primary key", table.name),
                )
                .with_path(path),
            );
        }
    }
}

fn check_foreign_keys(model: &Model, result: &mut ValidationResult) {
    for table in &model.tables {
        let mut constraint_names = HashSet::new();

        for fk in &table.foreign_keys {
            let path = format!("tables.{}.foreignKeys.{}", table.name, fk.name);

            if !table.has_column(&fk.from_column_id) {
                result.add_error(
                    ValidationIssue::new(
                        ValidationCode::DanglingForeignKeySource,
                        format!(
                            "Foreign key '{}' uses a source column that is not on '{}'",
                            fk.name, table.name
                        ),
                    )
                    .with_path(path.clone()),
                );
            }

            if model.find_column(&fk.to_table_id, &fk.to_column_id).is_none() {
                result.add_error(
                    ValidationIssue::new(
                        ValidationCode::DanglingForeignKeyTarget,
                        format!("Foreign key '{}' references a missing table or column", fk.name),
                    )
                    .with_path(path.clone()),
                );
            }

            if !constraint_names.insert(fk.name.as_str()) {
                result.add_error(
                    ValidationIssue::new(
                        ValidationCode::DuplicateConstraintName,
                        format!(
                            "Constraint name '{}' is used twice on '{}'",
                            fk.name, table.name
                        ),
                    )
                    .with_path(path),
                );
            }
        }
    }
}

fn check_types(model: &Model, result: &mut ValidationResult) {
    let mut names = HashSet::new();

    for custom_type in &model.types {
        let path = format!("types.{}", custom_type.name);

        if !model.has_schema(&custom_type.schema_id) {
            result.add_error(
                ValidationIssue::new(
                    ValidationCode::OrphanType,
                    format!(
                        "Type '{}' belongs to a schema that does not exist",
                        custom_type.name
                    ),
                )
                .with_path(path.clone()),
            );
        }

        if custom_type.validate().is_err() {
            result.add_error(
                ValidationIssue::new(
                    ValidationCode::EmptyEnum,
                    format!("Enum '{}' has no values", custom_type.name),
                )
                .with_path(path.clone()),
            );
        }

        if !names.insert((custom_type.schema_id.as_str(), custom_type.name.as_str())) {
            result.add_warning(
                ValidationIssue::new(
                    ValidationCode::DuplicateTypeName,
                    format!("Type name '{}' is used twice in one schema", custom_type.name),
                )
                .with_path(path),
            );
        }
    }
}

impl Validatable for Model {
    fn validate(&self) -> EngineResult<()> {
        validate_model(self).into_result()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Column, CustomType, ForeignKey, Schema, Table};

    fn valid_model() -> Model {
        let schema = Schema::new("public");
        let users_pk = Column::new("id", "uuid").primary_key();
        let users = Table::new(schema.id.clone(), "users").with_column(users_pk.clone());
        let author = Column::new("author_id", "uuid");
        let posts = Table::new(schema.id.clone(), "posts")
            .with_column(Column::new("id", "uuid").primary_key())
            .with_column(author.clone())
            .with_foreign_key(ForeignKey::new(
                "fk_posts_author",
                author.id,
                users.id.clone(),
                users_pk.id,
            ));
        let status = CustomType::new_enum(schema.id.clone(), "status", vec!["draft".into()]);

        Model::empty()
            .with_schema(schema)
            .with_table(users)
            .with_table(posts)
            .with_type(status)
    }

    #[test]
    fn test_valid_model_passes() {
        let result = validate_model(&valid_model());
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(!result.has_warnings());
        assert!(valid_model().is_valid());
    }

    #[test]
    fn test_no_schema() {
        let result = validate_model(&Model::empty());
        assert!(result.has_error(ValidationCode::NoSchema));
    }

    #[test]
    fn test_orphan_table_and_type() {
        let mut model = valid_model();
        model.tables[0].schema_id = "nowhere".into();
        model.types[0].schema_id = "nowhere".into();

        let result = validate_model(&model);
        assert!(result.has_error(ValidationCode::OrphanTable));
        assert!(result.has_error(ValidationCode::OrphanType));
    }

    #[test]
    fn test_dangling_foreign_keys() {
        let mut model = valid_model();
        model.tables[1].foreign_keys[0].to_column_id = "gone".into();
        let result = validate_model(&model);
        assert!(result.has_error(ValidationCode::DanglingForeignKeyTarget));
        assert!(!result.has_error(ValidationCode::DanglingForeignKeySource));

        let mut model = valid_model();
        model.tables[1].foreign_keys[0].from_column_id = "gone".into();
        let result = validate_model(&model);
        assert!(result.has_error(ValidationCode::DanglingForeignKeySource));
    }

    #[test]
    fn test_duplicate_names() {
        let mut model = valid_model();
        model.tables[1].name = "users".into();
        let extra = model.tables[1].foreign_keys[0].clone();
        model.tables[1].foreign_keys.push(ForeignKey { id: "other".into(), ..extra });
        model.tables[0].columns.push(Column::new("id", "int"));

        let result = validate_model(&model);
        assert!(result.has_error(ValidationCode::DuplicateTableName));
        assert!(result.has_error(ValidationCode::DuplicateConstraintName));
        assert!(result.has_error(ValidationCode::DuplicateColumnName));
    }

    #[test]
    fn test_same_table_name_in_two_schemas_is_fine() {
        let mut model = valid_model();
        let other = Schema::new("audit");
        model.tables.push(
            Table::new(other.id.clone(), "users").with_column(Column::new("id", "uuid").primary_key()),
        );
        model.schemas.push(other);
        assert!(validate_model(&model).is_valid());
    }

    #[test]
    fn test_duplicate_ids_and_empty_enum() {
        let mut model = valid_model();
        model.tables[1].id = model.tables[0].id.clone();
        model.types[0].values.clear();

        let result = validate_model(&model);
        assert!(result.has_error(ValidationCode::DuplicateId));
        assert!(result.has_error(ValidationCode::EmptyEnum));
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_warnings() {
        let mut model = valid_model();
        model.schemas.push(Schema::new("public"));
        model.tables[0].columns[0].is_primary_key = false;

        let result = validate_model(&model);
        assert!(result.is_valid());
        assert!(result.has_warning(ValidationCode::DuplicateSchemaName));
        assert!(result.has_warning(ValidationCode::NoPrimaryKey));
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::new(ValidationCode::NoSchema, "boom").with_path("schemas");
        assert_eq!(issue.to_string(), "[schemas] boom");
        assert_eq!(ValidationCode::EmptyEnum.to_string(), "empty_enum");
    }
}
