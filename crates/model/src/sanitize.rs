//! Import sanitization
//!
//! A model arriving from outside (storage, a reverse parser, a file) is
//! untrusted. `sanitize_model` repairs it into a model that passes
//! [`validate_model`](crate::validate_model), recording every repair.

use crate::{DEFAULT_SCHEMA_NAME, Model, Schema};
use ddlforge_core::{
    ensure_unique_constraint_name, ensure_unique_name, sanitize_constraint_name, Validatable,
};
use std::collections::HashSet;
use tracing::warn;

/// Repairs applied by [`sanitize_model`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizeReport {
    pub repairs: Vec<String>,
}

impl SanitizeReport {
    fn record(&mut self, message: String) {
        warn!(repair = %message, "Sanitized imported model");
        self.repairs.push(message);
    }

    pub fn is_clean(&self) -> bool {
        self.repairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.repairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repairs.is_empty()
    }
}

/// Repair an untrusted model so every structural invariant holds
pub fn sanitize_model(mut model: Model) -> (Model, SanitizeReport) {
    let mut report = SanitizeReport::default();

    ensure_schema(&mut model, &mut report);
    drop_duplicate_ids(&mut model, &mut report);
    rehome_orphans(&mut model, &mut report);
    drop_empty_enums(&mut model, &mut report);
    dedupe_names(&mut model, &mut report);
    drop_dangling_foreign_keys(&mut model, &mut report);
    fix_constraint_names(&mut model, &mut report);

    (model, report)
}

fn ensure_schema(model: &mut Model, report: &mut SanitizeReport) {
    if model.schemas.is_empty() {
        model.schemas.push(Schema::new(DEFAULT_SCHEMA_NAME));
        report.record(format!("Added missing schema '{}'", DEFAULT_SCHEMA_NAME));
    }
}

fn drop_duplicate_ids(model: &mut Model, report: &mut SanitizeReport) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut dropped = Vec::new();

    model.schemas.retain(|s| {
        let fresh = seen.insert(s.id.clone());
        if !fresh {
            dropped.push(format!("schema '{}'", s.name));
        }
        fresh
    });
    model.tables.retain(|t| {
        let fresh = seen.insert(t.id.clone());
        if !fresh {
            dropped.push(format!("table '{}'", t.name));
        }
        fresh
    });
    for table in &mut model.tables {
        let table_name = table.name.clone();
        table.columns.retain(|c| {
            let fresh = seen.insert(c.id.clone());
            if !fresh {
                dropped.push(format!("column '{}.{}'", table_name, c.name));
            }
            fresh
        });
        table.foreign_keys.retain(|fk| {
            let fresh = seen.insert(fk.id.clone());
            if !fresh {
                dropped.push(format!("foreign key '{}.{}'", table_name, fk.name));
            }
            fresh
        });
    }
    model.types.retain(|t| {
        let fresh = seen.insert(t.id.clone());
        if !fresh {
            dropped.push(format!("type '{}'", t.name));
        }
        fresh
    });

    for what in dropped {
        report.record(format!("Dropped {} with a duplicate id", what));
    }
}

fn rehome_orphans(model: &mut Model, report: &mut SanitizeReport) {
    let schema_ids: HashSet<String> = model.schemas.iter().map(|s| s.id.clone()).collect();
    let Some(home) = model.schemas.first().map(|s| s.id.clone()) else {
        return;
    };

    for table in &mut model.tables {
        if !schema_ids.contains(&table.schema_id) {
            table.schema_id = home.clone();
            report.record(format!("Moved table '{}' into the first schema", table.name));
        }
    }
    for custom_type in &mut model.types {
        if !schema_ids.contains(&custom_type.schema_id) {
            custom_type.schema_id = home.clone();
            report.record(format!("Moved type '{}' into the first schema", custom_type.name));
        }
    }
}

fn drop_empty_enums(model: &mut Model, report: &mut SanitizeReport) {
    let mut dropped = Vec::new();
    model.types.retain(|t| {
        let keep = t.validate().is_ok();
        if !keep {
            dropped.push(t.name.clone());
        }
        keep
    });
    for name in dropped {
        report.record(format!("Dropped enum '{}' with no values", name));
    }
}

fn dedupe_names(model: &mut Model, report: &mut SanitizeReport) {
    // Table names, per schema
    let mut taken: Vec<(String, String)> = Vec::new();
    for table in &mut model.tables {
        let siblings = taken
            .iter()
            .filter(|(schema, _)| *schema == table.schema_id)
            .map(|(_, name)| name.as_str());
        let unique = ensure_unique_name(&table.name, siblings);
        if unique != table.name {
            report.record(format!("Renamed table '{}' to '{}'", table.name, unique));
            table.name = unique;
        }
        taken.push((table.schema_id.clone(), table.name.clone()));
    }

    // Column names, per table
    for table in &mut model.tables {
        let mut names: Vec<String> = Vec::new();
        for column in &mut table.columns {
            let unique = ensure_unique_name(&column.name, &names);
            if unique != column.name {
                report.record(format!(
                    "Renamed column '{}.{}' to '{}'",
                    table.name, column.name, unique
                ));
                column.name = unique;
            }
            names.push(column.name.clone());
        }
    }

    // Type names, per schema
    let mut taken: Vec<(String, String)> = Vec::new();
    for custom_type in &mut model.types {
        let siblings = taken
            .iter()
            .filter(|(schema, _)| *schema == custom_type.schema_id)
            .map(|(_, name)| name.as_str());
        let unique = ensure_unique_name(&custom_type.name, siblings);
        if unique != custom_type.name {
            report.record(format!("Renamed type '{}' to '{}'", custom_type.name, unique));
            custom_type.name = unique;
        }
        taken.push((custom_type.schema_id.clone(), custom_type.name.clone()));
    }
}

fn drop_dangling_foreign_keys(model: &mut Model, report: &mut SanitizeReport) {
    let columns: HashSet<(String, String)> = model.column_refs().into_iter().collect();

    for table in &mut model.tables {
        let own: HashSet<&str> = table.columns.iter().map(|c| c.id.as_str()).collect();
        let mut dropped = Vec::new();
        table.foreign_keys.retain(|fk| {
            let source_ok = own.contains(fk.from_column_id.as_str());
            let target_ok =
                columns.contains(&(fk.to_table_id.clone(), fk.to_column_id.clone()));
            if !(source_ok && target_ok) {
                dropped.push(fk.name.clone());
            }
            source_ok && target_ok
        });
        for name in dropped {
            report.record(format!(
                "Dropped foreign key '{}' on '{}' with an unresolved reference",
                name, table.name
            ));
        }
    }
}

fn fix_constraint_names(model: &mut Model, report: &mut SanitizeReport) {
    for table in &mut model.tables {
        let mut names: Vec<String> = Vec::new();
        for fk in &mut table.foreign_keys {
            let column_name = table
                .columns
                .iter()
                .find(|c| c.id == fk.from_column_id)
                .map(|c| c.name.as_str())
                .unwrap_or("column");
            let fallback = format!("fk_{}_{}", table.name, column_name);
            let cleaned = sanitize_constraint_name(&fk.name, &fallback);
            let unique = ensure_unique_constraint_name(&cleaned, &names);
            if unique != fk.name {
                report.record(format!(
                    "Renamed constraint '{}' on '{}' to '{}'",
                    fk.name, table.name, unique
                ));
                fk.name = unique;
            }
            names.push(fk.name.clone());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
