//! # Model Annotation
//!
//! Passes over the built model collection that attach derived metadata for
//! templates. Each pass only mutates flags and caches; properties are never
//! added or removed and their order is preserved.
//!
//! Passes only read state of the model they are applied to, so a host may
//! run them per model in parallel.

use crate::model::{EnumMetadata, EnumVariant, ModelDefinition, PropertyView};
use crate::naming::{enum_literal_expression, enum_variable_name};
use crate::primitives::TIMESTAMP_FORMAT;
use tracing::debug;

/// Marker identifying a cross-reference inside raw schema text.
pub const REF_MARKER: &str = "$ref";

/// One annotation pass over a model.
pub trait ModelPass {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Annotates one model in place.
    fn apply(&self, model: &mut ModelDefinition);
}

/// Removes imports of types living in the package the model is generated into.
#[derive(Debug, Clone)]
pub struct PruneSamePackageImports {
    prefix: String,
}

impl PruneSamePackageImports {
    /// Creates the pass for models generated into `package`.
    pub fn new(package: &str) -> Self {
        Self {
            prefix: format!("{}.", package),
        }
    }
}

impl ModelPass for PruneSamePackageImports {
    fn name(&self) -> &'static str {
        "prune-imports"
    }

    fn apply(&self, model: &mut ModelDefinition) {
        model.imports.retain(|import| !import.starts_with(&self.prefix));
    }
}

/// Flags `timestamp`-formatted properties as timestamps instead of strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagTimestamps;

impl ModelPass for FlagTimestamps {
    fn name(&self) -> &'static str {
        "flag-timestamps"
    }

    fn apply(&self, model: &mut ModelDefinition) {
        for var in model
            .vars
            .iter_mut()
            .filter(|v| v.format.as_deref() == Some(TIMESTAMP_FORMAT))
        {
            var.is_string = false;
            var.is_timestamp = true;
        }
    }
}

/// Flags properties that are themselves direct references.
///
/// Containers are never flagged, even when their items are references.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagReferences;

impl ModelPass for FlagReferences {
    fn name(&self) -> &'static str {
        "flag-references"
    }

    fn apply(&self, model: &mut ModelDefinition) {
        for var in model.vars.iter_mut() {
            if !var.is_container && var.raw_schema.contains(REF_MARKER) {
                var.is_reference = true;
            }
        }
    }
}

/// Refreshes the first-variant-name cache of every enum.
///
/// Must run after `expand_enum_variants`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractEnumMetadata;

impl ModelPass for ExtractEnumMetadata {
    fn name(&self) -> &'static str {
        "extract-enum-metadata"
    }

    fn apply(&self, model: &mut ModelDefinition) {
        let property_enums = model
            .vars
            .iter_mut()
            .filter(|v| v.is_enum)
            .filter_map(|v| v.enum_metadata.as_mut());
        for meta in property_enums.chain(model.enum_metadata.as_mut()) {
            meta.refresh_first_name();
        }
    }
}

/// The standard passes, in the order they must run.
pub fn standard_passes(model_package: &str) -> Vec<Box<dyn ModelPass>> {
    vec![
        Box::new(PruneSamePackageImports::new(model_package)),
        Box::new(FlagTimestamps),
        Box::new(FlagReferences),
        Box::new(ExtractEnumMetadata),
    ]
}

/// Runs each pass over every model, pass by pass.
pub fn run_passes(models: &mut [ModelDefinition], passes: &[Box<dyn ModelPass>]) {
    for pass in passes {
        for model in models.iter_mut() {
            pass.apply(model);
        }
        debug!(pass = pass.name(), models = models.len(), "applied model pass");
    }
}

fn expand_variants(literals: &[String], base_type: &str) -> EnumMetadata {
    let variants = literals
        .iter()
        .map(|literal| EnumVariant {
            name: enum_variable_name(literal, base_type),
            value: enum_literal_expression(literal, base_type),
        })
        .collect();
    EnumMetadata::new(variants)
}

fn expand_property(var: &mut PropertyView) {
    if var.is_enum {
        var.enum_metadata = Some(expand_variants(&var.allowable_values, &var.data_type));
    }
}

/// Fills the ordered `(name, value)` pairs of every enum property and enum model.
pub fn expand_enum_variants(models: &mut [ModelDefinition]) {
    for model in models.iter_mut() {
        model.vars.iter_mut().for_each(expand_property);
        if model.is_enum {
            let base_type = model.data_type.as_deref().unwrap_or("String");
            model.enum_metadata = Some(expand_variants(&model.allowable_values, base_type));
        }
    }
}
