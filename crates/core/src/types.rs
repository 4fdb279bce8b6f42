//! Core types used throughout ddlforge
//!
//! This module contains the small value types shared by the model, the
//! editor, and the DDL generator.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

// ============================================================================
// Unique Identifiers
// ============================================================================

/// Identifier of a schema. Ids are opaque strings, stable for the entity's lifetime.
pub type SchemaId = String;

/// Identifier of a table
pub type TableId = String;

/// Identifier of a column
pub type ColumnId = String;

/// Identifier of a foreign key constraint
pub type ForeignKeyId = String;

/// Identifier of a custom (enum) type
pub type TypeId = String;

// ============================================================================
// Geometry Types
// ============================================================================

/// Position on the 2D canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a position at the origin (0, 0)
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Calculate the Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Add an offset to this position
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Point halfway between two positions
    pub fn midpoint(&self, other: &Position) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::zero()
    }
}

// ============================================================================
// Referential Actions
// ============================================================================

/// Actions for foreign key constraints
///
/// Deserialization accepts both the snake_case form (`set_null`) and the SQL
/// keyword form (`SET NULL`) so models produced by external parsers load as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialAction {
    /// Delete related records when parent is deleted
    #[serde(alias = "CASCADE")]
    Cascade,
    /// Set foreign key to NULL when parent is deleted
    #[serde(alias = "SET NULL", alias = "SET_NULL")]
    SetNull,
    /// Prevent deletion if related records exist
    #[serde(alias = "RESTRICT")]
    Restrict,
    /// Do nothing (database default)
    #[serde(alias = "NO ACTION", alias = "NO_ACTION")]
    NoAction,
    /// Set to default value
    #[serde(alias = "SET DEFAULT", alias = "SET_DEFAULT")]
    SetDefault,
}

impl ReferentialAction {
    /// Get SQL keyword
    pub fn to_sql(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::SetDefault => "SET DEFAULT",
        }
    }

    /// Get all referential actions
    pub fn all() -> &'static [ReferentialAction] {
        &[
            ReferentialAction::NoAction,
            ReferentialAction::Restrict,
            ReferentialAction::Cascade,
            ReferentialAction::SetNull,
            ReferentialAction::SetDefault,
        ]
    }
}

impl FromStr for ReferentialAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase().replace(['_', '-'], " ");
        ReferentialAction::all()
            .iter()
            .find(|action| action.to_sql() == key)
            .copied()
            .ok_or_else(|| format!("unknown referential action '{}'", s))
    }
}

impl std::fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

// ============================================================================
// Cardinality
// ============================================================================

/// Multiplicity of one end of a foreign-key relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    One,
    Many,
}

impl Cardinality {
    /// Map the external cardinality vocabulary onto the binary domain.
    ///
    /// `one`, `one_and_only_one`, `zero_or_one` are "one"; `many`,
    /// `one_or_many`, `zero_or_many` are "many". Matching ignores case and
    /// treats `-` and spaces like `_`. Anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let key = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "one" | "one_and_only_one" | "zero_or_one" => Some(Cardinality::One),
            "many" | "one_or_many" | "zero_or_many" => Some(Cardinality::Many),
            _ => None,
        }
    }

    /// Normalize an optional external hint, falling back when it is absent or unknown.
    pub fn normalize(value: Option<&str>, fallback: Cardinality) -> Cardinality {
        value.and_then(Cardinality::parse).unwrap_or(fallback)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::One => "one",
            Cardinality::Many => "many",
        }
    }

    pub fn is_many(&self) -> bool {
        matches!(self, Cardinality::Many)
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deserialize an optional cardinality hint from any string.
///
/// Unknown or missing values become `None`, so inference takes over instead
/// of the whole model failing to load.
pub fn deserialize_cardinality_hint<'de, D>(deserializer: D) -> Result<Option<Cardinality>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Cardinality::parse))
}

// ============================================================================
// Tests
// ============================================================================
