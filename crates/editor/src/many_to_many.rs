//! Many-to-many normalization
//!
//! Rewrites a direct foreign key A -> B into a join table J holding two
//! foreign keys J -> A and J -> B. The structural transform is a pure
//! function over the model and does not look at positions; the lane layout
//! from [`crate::layout`] is applied afterwards as a separate step.

use crate::layout::{lane_layout, self_reference_layout};
use ddlforge_core::{
    Cardinality, ColumnId, EngineError, EngineResult, Position, TableId, ensure_unique_constraint_name,
    ensure_unique_name, sanitize_constraint_name, to_snake_case,
};
use ddlforge_model::{Column, ForeignKey, Model, Table};

/// Join table name used when both table names reduce to nothing
const FALLBACK_JOIN_NAME: &str = "source_target";

/// Result of a successful conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ManyToManyOutcome {
    /// The rewritten model
    pub model: Model,
    pub join_table_id: TableId,
    /// Join column referencing the source table
    pub left_column_id: ColumnId,
    /// Join column referencing the target table
    pub right_column_id: ColumnId,
    /// Source column removed from the source table, if it was not a primary key
    pub removed_column_id: Option<ColumnId>,
}

/// Pick the column a join-table foreign key should reference.
///
/// Preference: `preferred`, then a primary-key column, then a unique column,
/// then any column. `exclude` is never picked.
pub fn pick_reference_column<'a>(
    table: &'a Table,
    preferred: Option<&str>,
    exclude: Option<&str>,
) -> Option<&'a Column> {
    let candidates = || {
        table
            .columns
            .iter()
            .filter(move |c| Some(c.id.as_str()) != exclude)
    };

    preferred
        .and_then(|id| candidates().find(|c| c.id == id))
        .or_else(|| candidates().find(|c| c.is_primary_key))
        .or_else(|| candidates().find(|c| c.is_unique))
        .or_else(|| candidates().next())
}

/// Synthesize the join table name from the two table names.
///
/// Each name is snake-cased first and the normalized names are sorted, so
/// neither argument order nor letter case changes the result.
pub fn join_table_name(source: &str, target: &str) -> String {
    let mut names: Vec<String> = [source, target]
        .into_iter()
        .map(to_snake_case)
        .filter(|name| !name.is_empty())
        .collect();
    names.sort_unstable();
    if names.is_empty() {
        FALLBACK_JOIN_NAME.to_string()
    } else {
        names.join("_")
    }
}

fn label(name: &str, fallback: &str) -> String {
    let snake = to_snake_case(name);
    if snake.is_empty() {
        fallback.to_string()
    } else {
        snake
    }
}

/// Convert foreign key `fk_id` on `table_id` into a join table.
///
/// Fails without touching anything when the foreign key, its source column,
/// its target table or column is missing, or when either side has no usable
/// reference column.
pub fn convert_to_many_to_many(
    model: &Model,
    table_id: &str,
    fk_id: &str,
    lane_spacing: f32,
) -> EngineResult<ManyToManyOutcome> {
    // ------------------------------------------------------------------
    // Preconditions
    // ------------------------------------------------------------------
    let source = model
        .table(table_id)
        .ok_or_else(|| EngineError::TableNotFound(table_id.to_string()))?;
    let fk = source
        .foreign_key(fk_id)
        .ok_or_else(|| EngineError::foreign_key_not_found(&source.name, fk_id))?;
    let source_column = source.column(&fk.from_column_id).ok_or_else(|| {
        EngineError::many_to_many(format!(
            "source column of '{}' is missing from '{}'",
            fk.name, source.name
        ))
    })?;
    let target = model.table(&fk.to_table_id).ok_or_else(|| {
        EngineError::many_to_many(format!("target table of '{}' does not exist", fk.name))
    })?;
    if !target.has_column(&fk.to_column_id) {
        return Err(EngineError::many_to_many(format!(
            "target column of '{}' does not exist on '{}'",
            fk.name, target.name
        )));
    }

    let self_reference = source.id == target.id;
    let delete_source = !source_column.is_primary_key;
    let excluded = delete_source.then_some(source_column.id.as_str());

    let source_ref =
        pick_reference_column(source, Some(&fk.to_column_id), excluded).ok_or_else(|| {
            EngineError::many_to_many(format!("'{}' has no usable reference column", source.name))
        })?;
    let target_excluded = if self_reference { excluded } else { None };
    let target_ref = pick_reference_column(target, Some(&fk.to_column_id), target_excluded)
        .ok_or_else(|| {
            EngineError::many_to_many(format!("'{}' has no usable reference column", target.name))
        })?;

    // ------------------------------------------------------------------
    // Join table
    // ------------------------------------------------------------------
    let source_label = label(&source.name, "source");
    let target_label = label(&target.name, "target");

    let join_name = ensure_unique_name(
        &join_table_name(&source.name, &target.name),
        model.table_names_in_schema(&source.schema_id, None),
    );

    let left_name = ensure_unique_name(
        &format!("fk_{}_{}", source_label, label(&source_ref.name, "ref")),
        Vec::<String>::new(),
    );
    let right_name = ensure_unique_name(
        &format!("fk_{}_{}", target_label, label(&target_ref.name, "ref")),
        [left_name.as_str()],
    );

    let left = Column::new(left_name, source_ref.data_type.clone()).primary_key();
    let right = Column::new(right_name, target_ref.data_type.clone()).primary_key();

    let mut join = Table::new(source.schema_id.clone(), join_name);

    let left_fk_name = ensure_unique_constraint_name(
        &sanitize_constraint_name(
            &format!("fk_{}_{}_{}", join.name, left.name, source_label),
            &format!("fk_{}_left", join.name),
        ),
        Vec::<String>::new(),
    );
    let right_fk_name = ensure_unique_constraint_name(
        &sanitize_constraint_name(
            &format!("fk_{}_{}_{}", join.name, right.name, target_label),
            &format!("fk_{}_right", join.name),
        ),
        [left_fk_name.as_str()],
    );

    let left_fk = ForeignKey::new(left_fk_name, left.id.clone(), source.id.clone(), source_ref.id.clone())
        .with_cardinality(Cardinality::Many, Cardinality::One);
    let right_fk = ForeignKey::new(right_fk_name, right.id.clone(), target.id.clone(), target_ref.id.clone())
        .with_cardinality(Cardinality::Many, Cardinality::One);

    let left_column_id = left.id.clone();
    let right_column_id = right.id.clone();
    join.columns.push(left);
    join.columns.push(right);
    join.foreign_keys.push(left_fk);
    join.foreign_keys.push(right_fk);
    let join_table_id = join.id.clone();

    // ------------------------------------------------------------------
    // Rewrite
    // ------------------------------------------------------------------
    let source_id = source.id.clone();
    let target_id = target.id.clone();
    let source_column_id = source_column.id.clone();
    let (source_pos, target_pos) = (source.position, target.position);

    let mut next = model.clone();
    let owner = next
        .table_mut(&source_id)
        .ok_or_else(|| EngineError::internal("source table vanished during conversion"))?;
    owner.remove_foreign_key(fk_id);

    let removed_column_id = if delete_source {
        next.remove_column_cascade(&source_id, &source_column_id);
        Some(source_column_id)
    } else {
        None
    };

    let insert_at = next.table_index(&source_id).map_or(next.tables.len(), |i| i + 1);
    next.tables.insert(insert_at, join);

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------
    if self_reference {
        let (table_pos, join_pos) = self_reference_layout(source_pos, lane_spacing);
        set_position(&mut next, &source_id, table_pos);
        set_position(&mut next, &join_table_id, join_pos);
    } else {
        let lane = lane_layout(source_pos, target_pos, lane_spacing);
        set_position(&mut next, &source_id, lane.source);
        set_position(&mut next, &join_table_id, lane.join);
        set_position(&mut next, &target_id, lane.target);
    }

    Ok(ManyToManyOutcome {
        model: next,
        join_table_id,
        left_column_id,
        right_column_id,
        removed_column_id,
    })
}

fn set_position(model: &mut Model, table_id: &str, position: Position) {
    if let Some(table) = model.table_mut(table_id) {
        table.position = Some(position);
    }
}
