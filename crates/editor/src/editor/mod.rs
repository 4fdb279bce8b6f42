//! The schema editor: single writer of the model
//!
//! `SchemaEditor` exclusively owns the live [`Model`], the [`Selection`] and
//! the undo [`History`]. Readers get shared references or cloned snapshots;
//! every write goes through one of the operations defined in the submodules.
//!
//! Each operation is atomic. It checks every reference it needs before
//! touching anything, so an `Err` leaves model, selection and history
//! exactly as they were.

mod columns;
mod enums;
mod foreign_keys;
mod schemas;
mod tables;

use crate::{EditorConfig, History, HistorySnapshot, Selection};
use ddlforge_core::{EngineError, EngineResult, Validatable};
use ddlforge_model::{
    Model, SanitizeReport, Schema, Table, ValidationResult, sanitize_model, validate_model,
};
use tracing::{debug, info};

/// Owns the live model and applies edits to it
#[derive(Debug, Clone)]
pub struct SchemaEditor {
    model: Model,
    selection: Selection,
    history: History,
    config: EditorConfig,
}

impl Default for SchemaEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaEditor {
    /// Editor over a model holding the single default schema
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let model = Model::default();
        let mut selection = Selection::new();
        if let Some(schema) = model.schemas.first() {
            selection.select_schema(schema.id.clone());
        }
        Self {
            model,
            selection,
            history: History::with_max_size(config.history_depth),
            config,
        }
    }

    /// Editor over an external model, sanitized first
    pub fn from_model(model: Model, config: EditorConfig) -> (Self, SanitizeReport) {
        let mut editor = Self::with_config(config);
        let report = editor.load_model(model);
        (editor, report)
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// An owned copy of the live model
    pub fn snapshot(&self) -> Model {
        self.model.clone()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Run the invariant checker over the live model
    pub fn validate(&self) -> ValidationResult {
        validate_model(&self.model)
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Replace the live model with an external one.
    ///
    /// The model is sanitized, history is cleared, and selection pointers
    /// that no longer resolve are reset.
    pub fn load_model(&mut self, model: Model) -> SanitizeReport {
        let (model, report) = sanitize_model(model);
        info!(
            schemas = model.schemas.len(),
            tables = model.tables.len(),
            repairs = report.len(),
            "Loaded model into editor"
        );
        self.model = model;
        self.history.clear();
        self.selection.retain_valid(&self.model);
        report
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Record the current state before a destructive edit
    fn record(&mut self, action: &str) {
        self.history
            .push(HistorySnapshot::new(action, &self.model, &self.selection));
    }

    /// Restore the state before the most recent destructive edit
    pub fn undo(&mut self) -> bool {
        let current = HistorySnapshot::new("current", &self.model, &self.selection);
        match self.history.undo(current) {
            Some(previous) => {
                debug!(action = %previous.action, "Undo");
                self.model = previous.model;
                self.selection = previous.selection;
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone edit
    pub fn redo(&mut self) -> bool {
        let current = HistorySnapshot::new("current", &self.model, &self.selection);
        match self.history.redo(current) {
            Some(next) => {
                debug!("Redo");
                self.model = next.model;
                self.selection = next.selection;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select_schema(&mut self, schema_id: &str) -> EngineResult<()> {
        self.require_schema(schema_id)?;
        self.selection.select_schema(schema_id);
        Ok(())
    }

    pub fn select_table(&mut self, table_id: &str) -> EngineResult<()> {
        let schema_id = self.require_table(table_id)?.schema_id.clone();
        self.selection.select_table(schema_id, table_id);
        Ok(())
    }

    pub fn select_column(&mut self, table_id: &str, column_id: &str) -> EngineResult<()> {
        let table = self.require_table(table_id)?;
        if !table.has_column(column_id) {
            return Err(EngineError::column_not_found(&table.name, column_id));
        }
        let schema_id = table.schema_id.clone();
        self.selection.select_column(schema_id, table_id, column_id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ========================================================================
    // Lookup helpers
    // ========================================================================

    fn require_schema(&self, schema_id: &str) -> EngineResult<&Schema> {
        self.model
            .schema(schema_id)
            .ok_or_else(|| EngineError::SchemaNotFound(schema_id.to_string()))
    }

    fn require_table(&self, table_id: &str) -> EngineResult<&Table> {
        self.model
            .table(table_id)
            .ok_or_else(|| EngineError::TableNotFound(table_id.to_string()))
    }

    fn require_table_mut(&mut self, table_id: &str) -> EngineResult<&mut Table> {
        self.model
            .table_mut(table_id)
            .ok_or_else(|| EngineError::TableNotFound(table_id.to_string()))
    }

    /// Debug-build check that an edit left every invariant intact
    fn debug_check(&self) {
        debug_assert!(
            self.model.is_valid(),
            "edit broke an invariant: {:?}",
            validate_model(&self.model).errors
        );
        debug_assert!(self.selection.is_valid_for(&self.model));
    }
}

/// Trimmed `name`, or `default` when absent or blank
fn base_name<'a>(name: Option<&'a str>, default: &'a str) -> &'a str {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => default,
    }
}

// ============================================================================
// Tests
// ============================================================================
