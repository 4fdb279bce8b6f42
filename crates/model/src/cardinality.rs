//! Relationship cardinality inference
//!
//! Each end of a foreign key is either `one` or `many`. Explicit overrides
//! stored on the foreign key always win; otherwise the kind is derived from
//! the uniqueness of the columns at each end.
//!
//! Nullability of the foreign-key column is not consulted. A nullable unique
//! column still infers `one` on the owning side.

use crate::{ForeignKey, Model, Table};
use ddlforge_core::Cardinality;
use serde::{Deserialize, Serialize};

/// Multiplicity of both ends of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipCardinality {
    /// Side holding the foreign key
    pub start: Cardinality,
    /// Referenced side
    pub end: Cardinality,
}

impl RelationshipCardinality {
    pub fn new(start: Cardinality, end: Cardinality) -> Self {
        Self { start, end }
    }

    /// The shape used for both foreign keys of a join table
    pub fn many_to_one() -> Self {
        Self::new(Cardinality::Many, Cardinality::One)
    }
}

impl std::fmt::Display for RelationshipCardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Normalize an external cardinality word, falling back when unknown or absent
pub fn normalize_cardinality(value: Option<&str>, fallback: Cardinality) -> Cardinality {
    Cardinality::normalize(value, fallback)
}

/// Derive both ends from column facts
pub fn infer_from_facts(fk_is_unique: bool, ref_is_unique: bool) -> RelationshipCardinality {
    let side = |unique: bool| {
        if unique {
            Cardinality::One
        } else {
            Cardinality::Many
        }
    };
    RelationshipCardinality::new(side(fk_is_unique), side(ref_is_unique))
}

/// Whether a column identifies at most one row: unique, or the table's
/// single-column primary key
pub fn column_is_unique(table: &Table, column_id: &str) -> bool {
    match table.column(column_id) {
        Some(column) => column.is_unique || table.is_single_column_primary_key(column_id),
        None => false,
    }
}

/// Infer cardinality from the columns a foreign key binds, ignoring overrides.
///
/// `None` when the owning table or either column does not resolve.
pub fn infer_for_foreign_key(
    model: &Model,
    owner: &Table,
    fk: &ForeignKey,
) -> Option<RelationshipCardinality> {
    owner.column(&fk.from_column_id)?;
    let target = model.table(&fk.to_table_id)?;
    target.column(&fk.to_column_id)?;

    Some(infer_from_facts(
        column_is_unique(owner, &fk.from_column_id),
        column_is_unique(target, &fk.to_column_id),
    ))
}

/// Cardinality as the user sees it: explicit overrides first, then inference.
///
/// An end with an override is reported even when the references no longer
/// resolve; an end without one needs inference and yields `None` then.
pub fn effective_cardinality(
    model: &Model,
    owner: &Table,
    fk: &ForeignKey,
) -> Option<RelationshipCardinality> {
    if let (Some(start), Some(end)) = (fk.start_cardinality, fk.end_cardinality) {
        return Some(RelationshipCardinality::new(start, end));
    }

    let inferred = infer_for_foreign_key(model, owner, fk)?;
    Some(RelationshipCardinality::new(
        fk.start_cardinality.unwrap_or(inferred.start),
        fk.end_cardinality.unwrap_or(inferred.end),
    ))
}
