//! JSON exchange of the model
//!
//! The model is the only unit exchanged with external collaborators. These
//! functions move it to and from JSON text and files. They do not sanitize:
//! callers that accept an external model pass it through
//! [`sanitize_model`](crate::sanitize_model) first.

use crate::{MODEL_VERSION, Model};
use ddlforge_core::{EngineError, EngineResult};
use std::path::Path;
use tracing::info;

// ============================================================================
// String Functions
// ============================================================================

/// Serialize a model to pretty-printed JSON
pub fn model_to_json(model: &Model) -> EngineResult<String> {
    Ok(serde_json::to_string_pretty(model)?)
}

/// Parse a model from JSON text.
///
/// Fails on malformed JSON or a format version newer than this build
/// understands.
pub fn model_from_json(json: &str) -> EngineResult<Model> {
    let model: Model = serde_json::from_str(json)?;
    if model.version > MODEL_VERSION {
        return Err(EngineError::validation(format!(
            "Model format version {} is newer than supported version {}",
            model.version, MODEL_VERSION
        )));
    }
    Ok(model)
}

// ============================================================================
// File Functions
// ============================================================================

/// Load a model from a JSON file
pub fn load_model(path: impl AsRef<Path>) -> EngineResult<Model> {
    let path = path.as_ref();

    let json = std::fs::read_to_string(path).map_err(|e| EngineError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let model = model_from_json(&json).map_err(|e| match e {
        EngineError::JsonSerialization(je) => EngineError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid model file format: {}", je),
        },
        other => other,
    })?;

    info!(
        path = %path.display(),
        schemas = model.schemas.len(),
        tables = model.tables.len(),
        "Loaded model"
    );
    Ok(model)
}

/// Save a model to a JSON file, creating parent directories as needed
pub fn save_model(model: &Model, path: impl AsRef<Path>) -> EngineResult<()> {
    let path = path.as_ref();
    let json = model_to_json(model)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| EngineError::FileWrite {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| EngineError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    info!(path = %path.display(), "Saved model");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
