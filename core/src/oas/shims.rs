//! # Document Shims
//!
//! Intermediate deserialization layer mapping directly onto Swagger 2.0 and
//! OpenAPI 3.x YAML/JSON objects. Only the fields the generator consumes are
//! modelled; everything else is ignored.

use indexmap::IndexMap;
use serde::de::{Error as DeError, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A `type` field: a single token, or an OAS 3.1 list of tokens.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ShimType {
    /// `type: string`
    Single(String),
    /// `type: [string, "null"]`
    Multiple(Vec<String>),
}

impl ShimType {
    /// The first non-`null` type token.
    pub fn primary(&self) -> Option<&str> {
        match self {
            ShimType::Single(t) => Some(t.as_str()),
            ShimType::Multiple(ts) => ts.iter().map(String::as_str).find(|t| *t != "null"),
        }
    }
}

/// `additionalProperties`: a flag or a value schema.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ShimAdditionalProperties {
    /// `additionalProperties: true|false`
    Flag(bool),
    /// `additionalProperties: { ... }`
    Schema(Box<ShimSchema>),
}

/// A Schema Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct ShimSchema {
    /// Cross-reference.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Declared type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<ShimType>,
    /// Declared format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object properties in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, ShimSchema>,
    /// Required property names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Array items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ShimSchema>>,
    /// Map values.
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<ShimAdditionalProperties>,
    /// Enum literals.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Composition parts.
    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<ShimSchema>,
}

impl ShimSchema {
    /// The primary type token, if declared.
    pub fn primary_type(&self) -> Option<&str> {
        self.schema_type.as_ref().and_then(ShimType::primary)
    }

    /// Enum literals rendered as strings; `null` entries are dropped.
    pub fn enum_literals(&self) -> Vec<String> {
        self.enum_values
            .iter()
            .flatten()
            .filter_map(|v| match v {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect()
    }

    /// True if the schema declares an enum, even an empty one.
    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }
}

/// A Parameter Object (Swagger 2.0 inline fields or OAS 3 `schema`).
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct ShimParameter {
    /// `$ref` to a shared parameter.
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,
    /// Parameter name.
    #[serde(default)]
    pub name: String,
    /// Location token.
    #[serde(rename = "in", default)]
    pub location: String,
    /// Required flag.
    #[serde(default)]
    pub required: bool,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Value schema (OAS 3, or Swagger 2.0 body).
    #[serde(default)]
    pub schema: Option<ShimSchema>,
    /// Swagger 2.0 inline type.
    #[serde(rename = "type", default)]
    pub schema_type: Option<ShimType>,
    /// Swagger 2.0 inline format.
    #[serde(default)]
    pub format: Option<String>,
    /// Swagger 2.0 inline items.
    #[serde(default)]
    pub items: Option<Box<ShimSchema>>,
    /// Swagger 2.0 inline enum.
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<Value>>,
}

impl ShimParameter {
    /// The value schema, falling back to Swagger 2.0 inline fields.
    pub fn value_schema(&self) -> ShimSchema {
        if let Some(schema) = &self.schema {
            return schema.clone();
        }
        ShimSchema {
            schema_type: self.schema_type.clone(),
            format: self.format.clone(),
            items: self.items.clone(),
            enum_values: self.enum_values.clone(),
            ..Default::default()
        }
    }
}

/// A Media Type Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct ShimMediaType {
    /// Payload schema.
    #[serde(default)]
    pub schema: Option<ShimSchema>,
}

/// Picks the JSON media type when present, else the first one.
fn pick_media_schema(content: &IndexMap<String, ShimMediaType>) -> Option<&ShimSchema> {
    content
        .iter()
        .find(|(mime, _)| mime.contains("json"))
        .or_else(|| content.first())
        .and_then(|(_, media)| media.schema.as_ref())
}

/// A Request Body Object (OAS 3).
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct ShimRequestBody {
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Required flag.
    #[serde(default)]
    pub required: bool,
    /// Payload by media type.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
}

impl ShimRequestBody {
    /// The payload schema.
    pub fn schema(&self) -> Option<&ShimSchema> {
        pick_media_schema(&self.content)
    }
}

/// A Response Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct ShimResponse {
    /// Swagger 2.0 payload schema.
    #[serde(default)]
    pub schema: Option<ShimSchema>,
    /// OAS 3 payload by media type.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
}

impl ShimResponse {
    /// The payload schema.
    pub fn payload(&self) -> Option<&ShimSchema> {
        self.schema
            .as_ref()
            .or_else(|| pick_media_schema(&self.content))
    }
}

/// An Operation Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct ShimOperation {
    /// `operationId`.
    #[serde(rename = "operationId", default)]
    pub operation_id: Option<String>,
    /// Summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Operation-level parameters.
    #[serde(default)]
    pub parameters: Vec<ShimParameter>,
    /// OAS 3 request body.
    #[serde(rename = "requestBody", default)]
    pub request_body: Option<ShimRequestBody>,
    /// Responses by status code, in document order.
    #[serde(default)]
    pub responses: IndexMap<String, ShimResponse>,
}

/// A Path Item Object.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct ShimPathItem {
    /// GET.
    #[serde(default)]
    pub get: Option<ShimOperation>,
    /// PUT.
    #[serde(default)]
    pub put: Option<ShimOperation>,
    /// POST.
    #[serde(default)]
    pub post: Option<ShimOperation>,
    /// DELETE.
    #[serde(default)]
    pub delete: Option<ShimOperation>,
    /// OPTIONS.
    #[serde(default)]
    pub options: Option<ShimOperation>,
    /// HEAD.
    #[serde(default)]
    pub head: Option<ShimOperation>,
    /// PATCH.
    #[serde(default)]
    pub patch: Option<ShimOperation>,
    /// Parameters shared by every operation of the path.
    #[serde(default)]
    pub parameters: Vec<ShimParameter>,
}

impl ShimPathItem {
    /// Declared operations with their method, in a fixed method order.
    pub fn operations(&self) -> Vec<(&'static str, &ShimOperation)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
        .collect()
    }
}

/// The Paths Object; `x-` extension keys are skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShimPaths {
    /// Path items keyed by path template, in document order.
    pub items: IndexMap<String, ShimPathItem>,
}

impl<'de> Deserialize<'de> for ShimPaths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathsVisitor;

        impl<'de> Visitor<'de> for PathsVisitor {
            type Value = ShimPaths;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of path templates to path items")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut items = IndexMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key.starts_with("x-") {
                        map.next_value::<IgnoredAny>()?;
                        continue;
                    }
                    let path_item = map.next_value::<ShimPathItem>().map_err(|e| {
                        <A::Error as DeError>::custom(format!(
                            "Failed to parse path item '{}': {}",
                            key, e
                        ))
                    })?;
                    items.insert(key, path_item);
                }
                Ok(ShimPaths { items })
            }
        }

        deserializer.deserialize_map(PathsVisitor)
    }
}

/// The OAS 3 Components Object.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ShimComponents {
    /// Named schemas in document order.
    #[serde(default)]
    pub schemas: IndexMap<String, ShimSchema>,
}

/// The document root.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ShimDocument {
    /// Swagger 2.0 version marker (may be numeric in YAML).
    #[serde(default)]
    pub swagger: Option<Value>,
    /// OAS 3 version marker.
    #[serde(default)]
    pub openapi: Option<Value>,
    /// Swagger 2.0 model definitions.
    #[serde(default)]
    pub definitions: IndexMap<String, ShimSchema>,
    /// OAS 3 components.
    #[serde(default)]
    pub components: Option<ShimComponents>,
    /// Paths.
    #[serde(default)]
    pub paths: ShimPaths,
}

impl ShimDocument {
    /// Every named schema: Swagger 2.0 definitions, then OAS 3 components.
    pub fn named_schemas(&self) -> impl Iterator<Item = (&String, &ShimSchema)> {
        self.definitions
            .iter()
            .chain(self.components.iter().flat_map(|c| c.schemas.iter()))
    }

    /// Looks up a named schema by its simple name.
    pub fn schema_named(&self, name: &str) -> Option<&ShimSchema> {
        self.definitions.get(name).or_else(|| {
            self.components
                .as_ref()
                .and_then(|c| c.schemas.get(name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_list_primary() {
        let schema: ShimSchema = serde_yaml::from_str("type: [\"null\", integer]").unwrap();
        assert_eq!(schema.primary_type(), Some("integer"));
    }

    #[test]
    fn test_enum_literals_stringified() {
        let schema: ShimSchema = serde_yaml::from_str("enum: [1, two, null]").unwrap();
        assert_eq!(schema.enum_literals(), vec!["1", "two"]);
        assert!(schema.is_enum());
    }

    #[test]
    fn test_additional_properties_forms() {
        let flag: ShimSchema = serde_yaml::from_str("additionalProperties: true").unwrap();
        assert_eq!(
            flag.additional_properties,
            Some(ShimAdditionalProperties::Flag(true))
        );

        let schema: ShimSchema =
            serde_yaml::from_str("additionalProperties: {type: string}").unwrap();
        assert!(matches!(
            schema.additional_properties,
            Some(ShimAdditionalProperties::Schema(_))
        ));
    }

    #[test]
    fn test_raw_schema_text_keeps_ref_marker() {
        let schema: ShimSchema =
            serde_yaml::from_str("$ref: '#/definitions/User'").unwrap();
        let text = serde_json::to_string(&schema).unwrap();
        assert_eq!(text, r##"{"$ref":"#/definitions/User"}"##);
    }

    #[test]
    fn test_paths_skip_extensions() {
        let yaml = r#"
/pets:
  get:
    operationId: listPets
x-internal: true
"#;
        let paths: ShimPaths = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(paths.items.len(), 1);
        let ops = paths.items["/pets"].operations();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].0, "get");
    }

    #[test]
    fn test_response_payload_prefers_json() {
        let yaml = r#"
content:
  text/plain:
    schema: {type: string}
  application/json:
    schema: {type: integer}
"#;
        let response: ShimResponse = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(response.payload().unwrap().primary_type(), Some("integer"));
    }

    #[test]
    fn test_inline_parameter_schema() {
        let yaml = "{name: limit, in: query, type: integer, format: int32}";
        let param: ShimParameter = serde_yaml::from_str(yaml).unwrap();
        let schema = param.value_schema();
        assert_eq!(schema.primary_type(), Some("integer"));
        assert_eq!(schema.format.as_deref(), Some("int32"));
    }
}
