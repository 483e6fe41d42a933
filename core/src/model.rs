//! # Annotated Models
//!
//! Definition of the annotated structures handed to the template renderer.
//!
//! Field names serialize in camelCase since templates address them directly.

use indexmap::IndexSet;
use serde::Serialize;

/// One `(variable name, literal expression)` pair of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumVariant {
    /// Scala identifier for the case (e.g. `InProgress`, `Number1`).
    pub name: String,
    /// Scala expression for the literal (e.g. `"in progress"`, `1`).
    pub value: String,
}

/// Ordered enum variants plus the cached name of the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumMetadata {
    /// Variants in declared order.
    pub variants: Vec<EnumVariant>,
    first_name: String,
}

impl EnumMetadata {
    /// Creates metadata with an empty first-name cache.
    pub fn new(variants: Vec<EnumVariant>) -> Self {
        Self {
            variants,
            first_name: String::new(),
        }
    }

    /// The cached first variant name (empty until refreshed, or for zero variants).
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Recomputes the first-name cache from `variants`.
    pub fn refresh_first_name(&mut self) {
        self.first_name = self
            .variants
            .first()
            .map(|v| v.name.clone())
            .unwrap_or_default();
    }
}

/// A property of a generated model, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyView {
    /// Escaped Scala field name.
    pub name: String,
    /// The name as declared in the description.
    pub base_name: String,
    /// Full type expression, e.g. `List[Widget]`.
    pub data_type: String,
    /// The outer type: the container name for containers, else `data_type`.
    pub base_type: String,
    /// The model type behind a reference, including container items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complex_type: Option<String>,
    /// Declared format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Escaped description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the model requires the property.
    pub required: bool,
    /// Rendered as an ordinary string.
    pub is_string: bool,
    /// Rendered as a timestamp.
    pub is_timestamp: bool,
    /// A direct cross-reference (never set on containers).
    pub is_reference: bool,
    /// An array or map.
    pub is_container: bool,
    /// An array.
    pub is_list_container: bool,
    /// A map.
    pub is_map_container: bool,
    /// The type needs no import.
    pub is_primitive_type: bool,
    /// `date` format.
    pub is_date: bool,
    /// `date-time` format.
    pub is_date_time: bool,
    /// An enum.
    pub is_enum: bool,
    /// Enum type name derived from the property name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_name: Option<String>,
    /// Raw enum literals in declared order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowable_values: Vec<String>,
    /// Expanded enum variants and first-name cache.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_metadata: Option<EnumMetadata>,
    /// Source text of the schema node.
    #[serde(skip)]
    pub raw_schema: String,
}

/// One generated data type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinition {
    /// Declared name.
    pub name: String,
    /// Scala class name.
    pub class_name: String,
    /// Lower camel-case name for values of this type.
    pub class_var_name: String,
    /// Escaped description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties in declared order.
    pub vars: Vec<PropertyView>,
    /// Qualified imports, insertion ordered.
    pub imports: IndexSet<String>,
    /// True for a top-level enum model.
    pub is_enum: bool,
    /// Underlying type of an enum model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Raw literals of an enum model.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowable_values: Vec<String>,
    /// Variants of an enum model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_metadata: Option<EnumMetadata>,
}

/// An operation parameter, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterView {
    /// Escaped Scala parameter name.
    pub param_name: String,
    /// Declared name.
    pub base_name: String,
    /// Type expression.
    pub data_type: String,
    /// Carrier, e.g. `path`, `query`.
    pub location: String,
    /// Whether the parameter is mandatory.
    pub required: bool,
    /// Escaped description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One API operation, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDefinition {
    /// Declared `operationId`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Scala method name.
    pub nickname: String,
    /// Upper-case HTTP method.
    pub http_method: String,
    /// Path template.
    pub path: String,
    /// Raw path segments (split on `/`, leading empty segment dropped).
    pub path_segments: Vec<String>,
    /// Escaped summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Grouping tag.
    pub tag: String,
    /// All parameters in declared order.
    pub all_params: Vec<ParameterView>,
    /// Path parameters only.
    pub path_params: Vec<ParameterView>,
    /// Query parameters only.
    pub query_params: Vec<ParameterView>,
    /// The body parameter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_param: Option<ParameterView>,
    /// Success response type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    /// Segment-matching pattern, e.g. `"users" :: userId`.
    pub route_pattern: String,
}

/// Operations sharing a tag; rendered into one API source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDefinition {
    /// The tag.
    pub tag: String,
    /// Scala class name, e.g. `PetsApi`.
    pub class_name: String,
    /// Operations in document order.
    pub operations: Vec<OperationDefinition>,
    /// Qualified imports needed by the operations.
    pub imports: IndexSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(name: &str) -> EnumVariant {
        EnumVariant {
            name: name.to_string(),
            value: format!("\"{}\"", name.to_lowercase()),
        }
    }

    #[test]
    fn test_first_name_tracks_variants() {
        let mut meta = EnumMetadata::new(vec![variant("Active"), variant("Closed")]);
        assert_eq!(meta.first_name(), "");
        meta.refresh_first_name();
        assert_eq!(meta.first_name(), "Active");

        meta.variants.remove(0);
        meta.refresh_first_name();
        assert_eq!(meta.first_name(), "Closed");
    }

    #[test]
    fn test_first_name_of_empty_enum() {
        let mut meta = EnumMetadata::new(Vec::new());
        meta.refresh_first_name();
        assert_eq!(meta.first_name(), "");
    }

    #[test]
    fn test_property_serializes_camel_case() {
        let prop = PropertyView {
            name: "createdAt".into(),
            base_name: "created_at".into(),
            data_type: "Instant".into(),
            base_type: "Instant".into(),
            is_timestamp: true,
            raw_schema: "{}".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&prop).unwrap();
        assert_eq!(json["baseName"], "created_at");
        assert_eq!(json["isTimestamp"], true);
        assert!(json.get("rawSchema").is_none());
    }
}
