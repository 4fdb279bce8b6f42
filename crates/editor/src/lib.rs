//! # ddlforge Editor
//!
//! The mutation engine. [`SchemaEditor`] is the single writer of the live
//! [`ddlforge_model::Model`]: every edit goes through it, is checked before
//! it is applied, and leaves the model satisfying all structural
//! invariants.
//!
//! ## Responsibilities
//!
//! - Add, update, remove and reorder schemas, tables, columns, foreign keys
//!   and enum types with collision-free names
//! - Cascade removals so no foreign key is left dangling
//! - Undo/redo for destructive edits through a bounded [`History`]
//! - Rewrite a foreign key into a join table ([`convert_to_many_to_many`])
//! - Track the user's current [`Selection`]
//!
//! ## Example
//!
//! ```
//! use ddlforge_editor::{ForeignKeySpec, SchemaEditor};
//!
//! let mut editor = SchemaEditor::new();
//! let schema = editor.model().schemas[0].id.clone();
//! let users = editor.add_table(&schema, Some("users"), None).unwrap();
//! let users_pk = editor.model().table(&users).unwrap().columns[0].id.clone();
//! let posts = editor.add_table(&schema, Some("posts"), None).unwrap();
//! let author = editor.add_column(&posts, Some("author_id")).unwrap();
//! editor
//!     .add_foreign_key(&posts, ForeignKeySpec::new(author, users.clone(), users_pk))
//!     .unwrap();
//!
//! editor.remove_table(&users).unwrap();
//! assert_eq!(editor.model().foreign_key_count(), 0);
//! assert!(editor.undo());
//! assert_eq!(editor.model().foreign_key_count(), 1);
//! ```

pub mod config;
pub mod editor;
pub mod history;
pub mod layout;
pub mod many_to_many;
pub mod patch;
pub mod selection;

pub use config::{EditorConfig, PrimaryKeyTemplate};
pub use editor::SchemaEditor;
pub use history::{History, HistorySnapshot};
pub use layout::{DEFAULT_LANE_ORIGIN, LanePositions, lane_layout, self_reference_layout};
pub use many_to_many::{
    ManyToManyOutcome, convert_to_many_to_many, join_table_name, pick_reference_column,
};
pub use patch::{ColumnPatch, ForeignKeyPatch, ForeignKeySpec, SchemaPatch, TablePatch, TypePatch};
pub use selection::Selection;
