#![deny(missing_docs)]

//! # CDD Scala Core
//!
//! Core library for the schema-to-Scala generator: type mapping, identifier
//! normalization, model annotation and route pattern derivation.

/// Shared error types.
pub mod error;

/// Reserved words and primitive type sets.
pub mod primitives;

/// Identifier normalization.
pub mod naming;

/// Loaded (input) schema model.
pub mod schema;

/// Type mapping logic (schema -> Scala).
pub mod type_mapping;

/// Annotated (output) model consumed by templates.
pub mod model;

/// Generator configuration and variant profiles.
pub mod config;

/// Swagger / OpenAPI document loading.
pub mod oas;

/// View builders (schemas -> annotated definitions).
pub mod views;

/// Model annotation passes.
pub mod annotate;

/// Route pattern derivation.
pub mod routes;

/// Pipeline, renderer seam and emission.
pub mod pipeline;

pub use annotate::{
    expand_enum_variants, run_passes, standard_passes, ExtractEnumMetadata, FlagReferences,
    FlagTimestamps, ModelPass, PruneSamePackageImports,
};
pub use config::{GeneratorConfig, GeneratorVariant, SupportingFile, VariantProfile};
pub use error::{AppError, AppResult};
pub use model::{
    ApiDefinition, EnumMetadata, EnumVariant, ModelDefinition, OperationDefinition, ParameterView,
    PropertyView,
};
pub use oas::{load_document, load_document_file};
pub use pipeline::{
    emit, plan_files, write_files, AnnotatedBundle, GeneratedFile, Generator, PlannedFile,
    Renderer,
};
pub use routes::{annotate_operations, derive_pattern};
pub use schema::{
    ModelSchema, OperationSchema, ParamLocation, ParameterSchema, PropertySchema, SchemaDocument,
    SchemaKind,
};
pub use type_mapping::{ScalaTypeMapper, TypeMapper, TypeMappings};
