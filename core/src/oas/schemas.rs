#![deny(missing_docs)]

//! # Schema Conversion
//!
//! Converts document schema shims into the typed `PropertySchema` and
//! `ModelSchema` input model.

use crate::error::{AppError, AppResult};
use crate::oas::refs::{extract_ref_name, is_local_schema_ref};
use crate::oas::shims::{ShimAdditionalProperties, ShimDocument, ShimSchema};
use crate::schema::{ModelSchema, PropertySchema};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Converts one schema node.
///
/// Shapes are recognised in this order: `$ref`, `enum`, `array`, maps
/// (an object with `additionalProperties` and no own properties), then
/// anything else as a primitive of the declared type. A node without any
/// type is a free-form `object`.
pub fn convert_schema(name: &str, shim: &ShimSchema, required: bool) -> AppResult<PropertySchema> {
    let raw = serde_json::to_string(shim)?;

    let schema = if let Some(reference) = &shim.reference {
        let target = extract_ref_name(reference)
            .ok_or_else(|| AppError::MissingReference(name.to_string()))?;
        PropertySchema::reference(name, target)
    } else if shim.is_enum() {
        let raw_type = shim.primary_type().unwrap_or("string");
        PropertySchema::enumeration(name, raw_type, shim.enum_literals())
    } else {
        match shim.primary_type() {
            Some("array") => match &shim.items {
                Some(items) => PropertySchema::array(name, convert_schema(name, items, false)?),
                None => {
                    // Left without items; view building reports it.
                    let mut array =
                        PropertySchema::array(name, PropertySchema::primitive(name, "object"));
                    array.item_schema = None;
                    array
                }
            },
            Some("object") | None => convert_object(name, shim)?,
            Some(other) => PropertySchema::primitive(name, other),
        }
    };

    let mut schema = schema.with_required(required).with_raw_schema(raw);
    if let Some(format) = &shim.format {
        schema = schema.with_format(format.clone());
    }
    schema.description = shim.description.clone();
    Ok(schema)
}

fn convert_object(name: &str, shim: &ShimSchema) -> AppResult<PropertySchema> {
    if !shim.properties.is_empty() {
        return Ok(PropertySchema::primitive(name, "object"));
    }
    let schema = match &shim.additional_properties {
        Some(ShimAdditionalProperties::Schema(values)) => {
            PropertySchema::map(name, convert_schema(name, values, false)?)
        }
        Some(ShimAdditionalProperties::Flag(true)) => {
            PropertySchema::map(name, PropertySchema::primitive(name, "object"))
        }
        _ => PropertySchema::primitive(name, "object"),
    };
    Ok(schema)
}

/// Properties and required names gathered from a schema and its `allOf` parts.
#[derive(Default)]
struct FlatObject<'a> {
    properties: IndexMap<&'a str, &'a ShimSchema>,
    required: Vec<&'a str>,
}

impl<'a> FlatObject<'a> {
    fn absorb(&mut self, shim: &'a ShimSchema) {
        for (key, value) in &shim.properties {
            self.properties.insert(key.as_str(), value);
        }
        self.required.extend(shim.required.iter().map(String::as_str));
    }
}

/// Flattens `allOf` one level deep; referenced parts contribute their own
/// properties but their own `allOf` is not followed.
fn flatten<'a>(shim: &'a ShimSchema, doc: &'a ShimDocument) -> FlatObject<'a> {
    let mut flat = FlatObject::default();
    for part in &shim.all_of {
        match &part.reference {
            Some(reference) if is_local_schema_ref(reference) => {
                let target = extract_ref_name(reference)
                    .and_then(|name| doc.schema_named(&name));
                match target {
                    Some(target) => flat.absorb(target),
                    None => warn!(reference = %reference, "allOf reference not found"),
                }
            }
            Some(reference) => warn!(reference = %reference, "skipping non-local allOf reference"),
            None => flat.absorb(part),
        }
    }
    flat.absorb(shim);
    flat
}

/// Converts a named top-level schema into a model.
///
/// Returns `None` for shapes that do not describe a model (aliases of
/// primitives or arrays).
pub fn convert_model(
    name: &str,
    shim: &ShimSchema,
    doc: &ShimDocument,
) -> AppResult<Option<ModelSchema>> {
    if shim.is_enum() {
        return Ok(Some(ModelSchema {
            name: name.to_string(),
            description: shim.description.clone(),
            properties: Vec::new(),
            enum_schema: Some(convert_schema(name, shim, false)?),
        }));
    }

    let is_object = shim.primary_type() == Some("object")
        || !shim.properties.is_empty()
        || !shim.all_of.is_empty();
    if !is_object {
        warn!(model = %name, "skipping schema that is not an object or enum");
        return Ok(None);
    }

    let flat = flatten(shim, doc);
    let properties = flat
        .properties
        .iter()
        .map(|(key, value)| convert_schema(key, value, flat.required.contains(key)))
        .collect::<AppResult<Vec<_>>>()?;

    debug!(model = %name, properties = properties.len(), "converted model");
    Ok(Some(ModelSchema {
        name: name.to_string(),
        description: shim.description.clone(),
        properties,
        enum_schema: None,
    }))
}

/// Converts every named schema of the document, in document order.
pub fn convert_models(doc: &ShimDocument) -> AppResult<Vec<ModelSchema>> {
    let mut models = Vec::new();
    for (name, shim) in doc.named_schemas() {
        if let Some(model) = convert_model(name, shim, doc)? {
            models.push(model);
        }
    }
    Ok(models)
}
