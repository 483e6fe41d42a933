#![deny(missing_docs)]

//! # Document Loading
//!
//! Entry points that parse a Swagger 2.0 or OpenAPI 3.x description (YAML or
//! JSON) into a `SchemaDocument`.

use crate::error::{AppError, AppResult};
use crate::oas::routes::convert_operations;
use crate::oas::schemas::convert_models;
use crate::oas::shims::ShimDocument;
use crate::schema::SchemaDocument;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// The description dialect, detected from the root version field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `swagger: "2.0"`
    Swagger2,
    /// `openapi: 3.x`
    OpenApi3,
}

fn version_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validates the root version field and returns the dialect.
pub fn detect_dialect(doc: &ShimDocument) -> AppResult<Dialect> {
    if let Some(version) = doc.openapi.as_ref().map(version_text) {
        if version.starts_with("3.") {
            return Ok(Dialect::OpenApi3);
        }
        return Err(AppError::General(format!(
            "Unsupported OpenAPI version: {}",
            version
        )));
    }
    if let Some(version) = doc.swagger.as_ref().map(version_text) {
        if version.starts_with("2.") {
            return Ok(Dialect::Swagger2);
        }
        return Err(AppError::General(format!(
            "Unsupported Swagger version: {}",
            version
        )));
    }
    Err(AppError::General(
        "Document is missing the 'swagger' or 'openapi' version field".into(),
    ))
}

/// Parses a description from text. JSON is accepted as a subset of YAML.
pub fn load_document(content: &str) -> AppResult<SchemaDocument> {
    let shim: ShimDocument = serde_yaml::from_str(content)
        .map_err(|e| AppError::Parse(format!("Failed to parse API description: {}", e)))?;
    let dialect = detect_dialect(&shim)?;

    let models = convert_models(&shim)?;
    let operations = convert_operations(&shim)?;
    info!(
        ?dialect,
        models = models.len(),
        operations = operations.len(),
        "loaded API description"
    );
    Ok(SchemaDocument { models, operations })
}

/// Reads and parses a description file.
pub fn load_document_file(path: &Path) -> AppResult<SchemaDocument> {
    let content = fs::read_to_string(path)?;
    load_document(&content)
}
