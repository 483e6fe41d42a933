//! # Schema Input Model
//!
//! The loaded, not-yet-annotated shape of an API description: typed property
//! schemas, model schemas and operation schemas. Produced by the `oas` loader
//! (or any other producer) and consumed by the view builders.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The structural kind of a property schema.
///
/// (De)serialized through its lowercase name; an unknown name fails with
/// `AppError::UnknownKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SchemaKind {
    /// A scalar value described by its declared type token.
    Primitive,
    /// An ordered sequence of `item_schema`.
    Array,
    /// A string-keyed map whose values are `item_schema`.
    Map,
    /// A cross-reference to a named model.
    Reference,
    /// A primitive restricted to a list of literals.
    Enum,
}

impl FromStr for SchemaKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primitive" => Ok(SchemaKind::Primitive),
            "array" => Ok(SchemaKind::Array),
            "map" => Ok(SchemaKind::Map),
            "reference" => Ok(SchemaKind::Reference),
            "enum" => Ok(SchemaKind::Enum),
            other => Err(AppError::UnknownKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for SchemaKind {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SchemaKind> for String {
    fn from(kind: SchemaKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SchemaKind::Primitive => "primitive",
            SchemaKind::Array => "array",
            SchemaKind::Map => "map",
            SchemaKind::Reference => "reference",
            SchemaKind::Enum => "enum",
        };
        write!(f, "{}", s)
    }
}

/// The concrete representation a primitive schema takes once its declared
/// type and format are combined.
///
/// `Email` and `Password` are refinements of a string: they share the string
/// base token but are never eligible for format redirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// A plain string with no refining format.
    String,
    /// `string` / `email`.
    Email,
    /// `string` / `password`.
    Password,
    /// `string` / `uuid`.
    Uuid,
    /// `string` / `date`.
    Date,
    /// `string` / `date-time`.
    DateTime,
    /// `string` / `byte`.
    ByteArray,
    /// `string` / `binary`.
    Binary,
    /// `integer` without `int64`.
    Integer,
    /// `integer` / `int64`.
    Long,
    /// `number` / `float`.
    Float,
    /// `number` / `double`.
    Double,
    /// `number` without a size format.
    Number,
    /// `boolean`.
    Boolean,
    /// Free-form `object`.
    Object,
    /// Swagger 2.0 `file`.
    File,
}

impl PrimitiveType {
    /// Classifies a declared type token and optional format.
    pub fn classify(raw_type: &str, format: Option<&str>) -> AppResult<Self> {
        let ty = match raw_type {
            "string" => match format {
                Some("date") => PrimitiveType::Date,
                Some("date-time") => PrimitiveType::DateTime,
                Some("uuid") => PrimitiveType::Uuid,
                Some("email") => PrimitiveType::Email,
                Some("password") => PrimitiveType::Password,
                Some("byte") => PrimitiveType::ByteArray,
                Some("binary") => PrimitiveType::Binary,
                _ => PrimitiveType::String,
            },
            "integer" => match format {
                Some("int64") => PrimitiveType::Long,
                _ => PrimitiveType::Integer,
            },
            "number" => match format {
                Some("float") => PrimitiveType::Float,
                Some("double") => PrimitiveType::Double,
                _ => PrimitiveType::Number,
            },
            "boolean" => PrimitiveType::Boolean,
            "object" => PrimitiveType::Object,
            "file" => PrimitiveType::File,
            other => return Err(AppError::UnknownKind(other.to_string())),
        };
        Ok(ty)
    }

    /// The schema type token looked up in the type mapping table.
    pub fn base_token(self) -> &'static str {
        match self {
            PrimitiveType::String | PrimitiveType::Email | PrimitiveType::Password => "string",
            PrimitiveType::Uuid => "UUID",
            PrimitiveType::Date => "date",
            PrimitiveType::DateTime => "DateTime",
            PrimitiveType::ByteArray => "ByteArray",
            PrimitiveType::Binary => "binary",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Number => "number",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Object => "object",
            PrimitiveType::File => "file",
        }
    }

    /// True only for the unrefined string representation.
    pub fn is_plain_string(self) -> bool {
        self == PrimitiveType::String
    }

    /// True for the plain string and its refinements.
    pub fn is_string_family(self) -> bool {
        matches!(
            self,
            PrimitiveType::String | PrimitiveType::Email | PrimitiveType::Password
        )
    }
}

/// A node describing one typed value from the API description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    /// The raw property name as declared.
    pub name: String,
    /// Structural kind.
    pub kind: SchemaKind,
    /// The declared type token (`string`, `integer`, ...). Meaningful for
    /// primitives and enums.
    #[serde(default)]
    pub raw_type_name: String,
    /// Declared format, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Present iff `kind` is `Array` or `Map`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_schema: Option<Box<PropertySchema>>,
    /// Present iff `kind` is `Reference`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_name: Option<String>,
    /// Enum literals in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    /// Whether the owning model lists this property as required.
    #[serde(default)]
    pub required: bool,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The schema node as it appeared in the source document (JSON text).
    #[serde(default)]
    pub raw_schema: String,
}

impl PropertySchema {
    fn new(name: impl Into<String>, kind: SchemaKind) -> Self {
        Self {
            name: name.into(),
            kind,
            raw_type_name: String::new(),
            format: None,
            item_schema: None,
            reference_name: None,
            enum_values: Vec::new(),
            required: false,
            description: None,
            raw_schema: String::new(),
        }
    }

    /// A primitive schema with the given declared type token.
    pub fn primitive(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        let mut schema = Self::new(name, SchemaKind::Primitive);
        schema.raw_type_name = raw_type.into();
        schema
    }

    /// An array of `item`.
    pub fn array(name: impl Into<String>, item: PropertySchema) -> Self {
        let mut schema = Self::new(name, SchemaKind::Array);
        schema.raw_type_name = "array".to_string();
        schema.item_schema = Some(Box::new(item));
        schema
    }

    /// A string-keyed map of `item`.
    pub fn map(name: impl Into<String>, item: PropertySchema) -> Self {
        let mut schema = Self::new(name, SchemaKind::Map);
        schema.raw_type_name = "object".to_string();
        schema.item_schema = Some(Box::new(item));
        schema
    }

    /// A reference to the model named `target`.
    pub fn reference(name: impl Into<String>, target: impl Into<String>) -> Self {
        let mut schema = Self::new(name, SchemaKind::Reference);
        let target = target.into();
        schema.raw_type_name = target.clone();
        schema.reference_name = Some(target);
        schema
    }

    /// An enum over `raw_type` restricted to `values`.
    pub fn enumeration<I, S>(name: impl Into<String>, raw_type: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schema = Self::new(name, SchemaKind::Enum);
        schema.raw_type_name = raw_type.into();
        schema.enum_values = values.into_iter().map(Into::into).collect();
        schema
    }

    /// Sets the declared format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Marks the schema as required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Attaches the raw source text of the schema node.
    pub fn with_raw_schema(mut self, raw: impl Into<String>) -> Self {
        self.raw_schema = raw.into();
        self
    }

    /// True for arrays and maps.
    pub fn is_container(&self) -> bool {
        matches!(self.kind, SchemaKind::Array | SchemaKind::Map)
    }

    /// The item schema of a container, or a `MissingItemSchema` error.
    pub fn items(&self) -> AppResult<&PropertySchema> {
        self.item_schema
            .as_deref()
            .ok_or_else(|| AppError::MissingItemSchema(self.name.clone()))
    }

    /// Classifies the primitive representation of a primitive or enum schema.
    pub fn primitive_type(&self) -> AppResult<PrimitiveType> {
        PrimitiveType::classify(&self.raw_type_name, self.format.as_deref())
    }
}

/// A named data model as loaded from the description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSchema {
    /// Declared model name.
    pub name: String,
    /// Model description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties in declared order.
    #[serde(default)]
    pub properties: Vec<PropertySchema>,
    /// For top-level enum models, the enum schema itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_schema: Option<PropertySchema>,
}

/// Where an operation parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    /// A `{name}` segment of the path template.
    Path,
    /// A query string parameter.
    Query,
    /// A request header.
    Header,
    /// A cookie.
    Cookie,
    /// The request body.
    Body,
    /// A form field (Swagger 2.0 `formData`).
    FormData,
}

impl FromStr for ParamLocation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(ParamLocation::Path),
            "query" => Ok(ParamLocation::Query),
            "header" => Ok(ParamLocation::Header),
            "cookie" => Ok(ParamLocation::Cookie),
            "body" => Ok(ParamLocation::Body),
            "formData" => Ok(ParamLocation::FormData),
            other => Err(AppError::Parse(format!(
                "Unknown parameter location: {}",
                other
            ))),
        }
    }
}

impl ParamLocation {
    /// The location token as written in the description.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Cookie => "cookie",
            ParamLocation::Body => "body",
            ParamLocation::FormData => "formData",
        }
    }
}

/// One operation parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSchema {
    /// Declared parameter name.
    pub name: String,
    /// Where the value is carried.
    pub location: ParamLocation,
    /// Whether the parameter is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The value schema.
    pub schema: PropertySchema,
}

/// One API operation as loaded from the description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSchema {
    /// Declared `operationId`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// HTTP method, any case.
    pub method: String,
    /// Path template, e.g. `/users/{userId}`.
    pub path: String,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Grouping tag.
    pub tag: String,
    /// Parameters in declared order.
    #[serde(default)]
    pub parameters: Vec<ParameterSchema>,
    /// Schema of the success response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_schema: Option<PropertySchema>,
}

/// A fully loaded API description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Models in document order.
    #[serde(default)]
    pub models: Vec<ModelSchema>,
    /// Operations in document order.
    #[serde(default)]
    pub operations: Vec<OperationSchema>,
}
