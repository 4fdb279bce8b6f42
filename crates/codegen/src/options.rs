//! Generator options

use ddlforge_model::DEFAULT_SCHEMA_NAME;

/// Formatting and feature switches for [`DdlGenerator`](crate::DdlGenerator)
#[derive(Debug, Clone, PartialEq)]
pub struct DdlOptions {
    /// Schema that exists implicitly and gets no `CREATE SCHEMA`
    pub default_schema: String,

    /// Most clauses a `CREATE TABLE` may have and still be written on one line
    pub inline_max_clauses: usize,

    /// Longest single-line `CREATE TABLE` statement, in characters
    pub inline_width: usize,

    /// Indentation for clauses of a multi-line `CREATE TABLE`
    pub indent: String,

    /// Emit `COMMENT ON` statements
    pub emit_comments: bool,

    /// Emit `CREATE INDEX` statements
    pub emit_indexes: bool,
}

impl Default for DdlOptions {
    fn default() -> Self {
        Self {
            default_schema: DEFAULT_SCHEMA_NAME.to_string(),
            inline_max_clauses: 3,
            inline_width: 80,
            indent: "  ".to_string(),
            emit_comments: true,
            emit_indexes: true,
        }
    }
}

impl DdlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_schema(mut self, name: impl Into<String>) -> Self {
        self.default_schema = name.into();
        self
    }

    pub fn with_inline_width(mut self, width: usize) -> Self {
        self.inline_width = width;
        self
    }

    pub fn with_inline_max_clauses(mut self, clauses: usize) -> Self {
        self.inline_max_clauses = clauses;
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Never write a table on one line
    pub fn always_multiline(mut self) -> Self {
        self.inline_max_clauses = 0;
        self
    }

    pub fn without_comments(mut self) -> Self {
        self.emit_comments = false;
        self
    }

    pub fn without_indexes(mut self) -> Self {
        self.emit_indexes = false;
        self
    }
}
