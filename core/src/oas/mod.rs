#![deny(missing_docs)]

//! # API Description Loading
//!
//! Parses Swagger 2.0 and OpenAPI 3.x documents into the `schema` input model.
//!
//! - `shims`: serde mirrors of the document objects the generator reads.
//! - `refs`: local `$ref` helpers.
//! - `schemas`: schema and model conversion, including one-level `allOf` flattening.
//! - `routes`: operation extraction.
//! - `document`: version detection and entry points.

pub mod document;
pub mod refs;
pub mod routes;
pub mod schemas;
pub mod shims;

pub use document::{detect_dialect, load_document, load_document_file, Dialect};
