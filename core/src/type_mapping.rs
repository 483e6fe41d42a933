//! # Type Mapping
//!
//! Converts property schemas into Scala type expressions.
//! Handles primitives, containers (`List`, `Map`), temporal formats and
//! references to other models.

use crate::error::{AppError, AppResult};
use crate::naming::to_model_name;
use crate::primitives::is_temporal_format;
use crate::schema::{PropertySchema, SchemaKind};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Schema type token -> Scala type name.
const TYPE_MAPPING: &[(&str, &str)] = &[
    ("array", "List"),
    ("map", "Map"),
    ("List", "List"),
    ("boolean", "Boolean"),
    ("string", "String"),
    ("char", "String"),
    ("int", "Int"),
    ("integer", "Int"),
    ("Integer", "Int"),
    ("long", "Long"),
    ("float", "Float"),
    ("double", "Double"),
    ("number", "BigDecimal"),
    ("object", "Any"),
    ("UUID", "UUID"),
    ("ByteArray", "Array[Byte]"),
    ("binary", "Array[Byte]"),
    ("file", "File"),
    ("date", "LocalDate"),
    ("DateTime", "ZonedDateTime"),
    ("date-time", "ZonedDateTime"),
    ("timestamp", "Instant"),
    ("local-time", "LocalTime"),
    ("local-date-time", "LocalDateTime"),
];

/// Scala type name -> fully qualified import.
const IMPORT_MAPPING: &[(&str, &str)] = &[
    ("UUID", "java.util.UUID"),
    ("File", "java.io.File"),
    ("LocalDate", "java.time.LocalDate"),
    ("ZonedDateTime", "java.time.ZonedDateTime"),
    ("Instant", "java.time.Instant"),
    ("LocalTime", "java.time.LocalTime"),
    ("LocalDateTime", "java.time.LocalDateTime"),
];

/// Immutable lookup tables used by the type mapper.
///
/// Lookups are exact, case-sensitive string matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMappings {
    types: HashMap<String, String>,
    imports: HashMap<String, String>,
}

impl TypeMappings {
    /// The built-in Scala tables.
    pub fn scala() -> Self {
        Self::with_overrides(&IndexMap::new(), &IndexMap::new())
    }

    /// The built-in tables with extra entries layered on top.
    pub fn with_overrides(
        type_overrides: &IndexMap<String, String>,
        import_overrides: &IndexMap<String, String>,
    ) -> Self {
        let types = TYPE_MAPPING
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .chain(type_overrides.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect();
        let imports = IMPORT_MAPPING
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .chain(import_overrides.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect();
        Self { types, imports }
    }

    /// Looks up the Scala type for a schema token.
    pub fn type_for(&self, token: &str) -> Option<&str> {
        self.types.get(token).map(String::as_str)
    }

    /// Looks up the qualified import for a Scala type name.
    pub fn import_for(&self, type_name: &str) -> Option<&str> {
        self.imports.get(type_name).map(String::as_str)
    }
}

impl Default for TypeMappings {
    fn default() -> Self {
        Self::scala()
    }
}

/// Trait for converting property schemas into target type expressions.
pub trait TypeMapper {
    /// Maps a property schema to a type expression (e.g. `List[Widget]`).
    fn resolve(&self, schema: &PropertySchema) -> AppResult<String>;

    /// The qualified import needed to use `type_name`, if any.
    fn import_for(&self, type_name: &str) -> Option<&str>;

    /// The container type name used for a container kind.
    fn container_name(&self, kind: SchemaKind) -> String;
}

/// The Scala implementation of `TypeMapper`.
#[derive(Debug, Clone, Default)]
pub struct ScalaTypeMapper {
    mappings: TypeMappings,
}

impl ScalaTypeMapper {
    /// Creates a mapper over the given tables.
    pub fn new(mappings: TypeMappings) -> Self {
        Self { mappings }
    }

    /// The schema token looked up in the mapping table for a non-container schema.
    ///
    /// A plain string carrying a temporal format uses the format itself as the
    /// token. Refined strings and non-string kinds are never redirected.
    pub fn base_token(&self, schema: &PropertySchema) -> AppResult<String> {
        match schema.kind {
            SchemaKind::Reference => schema
                .reference_name
                .clone()
                .ok_or_else(|| AppError::MissingReference(schema.name.clone())),
            SchemaKind::Primitive => {
                let primitive = schema.primitive_type()?;
                match schema.format.as_deref() {
                    Some(format) if primitive.is_plain_string() && is_temporal_format(format) => {
                        Ok(format.to_string())
                    }
                    _ => Ok(primitive.base_token().to_string()),
                }
            }
            SchemaKind::Enum => Ok(schema.primitive_type()?.base_token().to_string()),
            SchemaKind::Array | SchemaKind::Map => Ok(container_token(schema.kind).to_string()),
        }
    }

    /// Maps a schema token through the table; unmapped tokens are model names.
    fn map_token(&self, token: &str) -> String {
        let candidate = self.mappings.type_for(token).unwrap_or(token);
        to_model_name(candidate)
    }
}

fn container_token(kind: SchemaKind) -> &'static str {
    match kind {
        SchemaKind::Map => "map",
        _ => "array",
    }
}

impl TypeMapper for ScalaTypeMapper {
    fn resolve(&self, schema: &PropertySchema) -> AppResult<String> {
        match schema.kind {
            SchemaKind::Array => {
                let inner = self.resolve(schema.items()?)?;
                Ok(format!("{}[{}]", self.container_name(SchemaKind::Array), inner))
            }
            SchemaKind::Map => {
                let inner = self.resolve(schema.items()?)?;
                Ok(format!(
                    "{}[String, {}]",
                    self.container_name(SchemaKind::Map),
                    inner
                ))
            }
            _ => {
                let token = self.base_token(schema)?;
                Ok(self.map_token(&token))
            }
        }
    }

    fn import_for(&self, type_name: &str) -> Option<&str> {
        self.mappings.import_for(type_name)
    }

    fn container_name(&self, kind: SchemaKind) -> String {
        self.map_token(container_token(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::is_language_primitive;

    fn string() -> PropertySchema {
        PropertySchema::primitive("value", "string")
    }

    #[test]
    fn test_primitive_mapping() {
        let mapper = ScalaTypeMapper::default();

        let cases = vec![
            (PropertySchema::primitive("a", "string"), "String"),
            (PropertySchema::primitive("a", "integer"), "Int"),
            (
                PropertySchema::primitive("a", "integer").with_format("int64"),
                "Long",
            ),
            (PropertySchema::primitive("a", "boolean"), "Boolean"),
            (
                PropertySchema::primitive("a", "number").with_format("double"),
                "Double",
            ),
            (PropertySchema::primitive("a", "number"), "BigDecimal"),
            (
                PropertySchema::primitive("a", "string").with_format("date"),
                "LocalDate",
            ),
            (
                PropertySchema::primitive("a", "string").with_format("date-time"),
                "ZonedDateTime",
            ),
            (
                PropertySchema::primitive("a", "string").with_format("uuid"),
                "UUID",
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(mapper.resolve(&input).unwrap(), expected, "{:?}", input);
        }
    }

    #[test]
    fn test_mapped_primitives_are_canonical() {
        let primitives: Vec<&str> = TYPE_MAPPING
            .iter()
            .map(|(_, scala)| *scala)
            .filter(|scala| is_language_primitive(scala))
            .collect();
        assert!(!primitives.is_empty());

        for name in primitives {
            assert_eq!(to_model_name(name), name);
            assert_eq!(to_model_name(&to_model_name(name)), name);
        }
    }

    #[test]
    fn test_nested_arrays() {
        let mapper = ScalaTypeMapper::default();
        let schema = PropertySchema::array("matrix", PropertySchema::array("row", string()));
        assert_eq!(mapper.resolve(&schema).unwrap(), "List[List[String]]");
    }

    #[test]
    fn test_map_keys_are_strings() {
        let mapper = ScalaTypeMapper::default();
        let schema = PropertySchema::map("byName", PropertySchema::reference("", "Widget"));
        assert_eq!(mapper.resolve(&schema).unwrap(), "Map[String, Widget]");
    }

    #[test]
    fn test_timestamp_format_redirects_plain_strings() {
        let mapper = ScalaTypeMapper::default();
        let cases = [
            ("timestamp", "Instant"),
            ("local-time", "LocalTime"),
            ("local-date-time", "LocalDateTime"),
        ];
        for (format, expected) in cases {
            let schema = string().with_format(format);
            assert_eq!(mapper.resolve(&schema).unwrap(), expected);
        }
    }

    #[test]
    fn test_format_never_redirects_non_strings() {
        let mapper = ScalaTypeMapper::default();
        let schema = PropertySchema::primitive("at", "integer").with_format("timestamp");
        assert_eq!(mapper.resolve(&schema).unwrap(), "Int");
    }

    #[test]
    fn test_format_redirect_is_not_applied_to_enums() {
        let mapper = ScalaTypeMapper::default();
        let schema =
            PropertySchema::enumeration("at", "string", ["a"]).with_format("timestamp");
        assert_eq!(mapper.resolve(&schema).unwrap(), "String");
    }

    #[test]
    fn test_references_are_model_names() {
        let mapper = ScalaTypeMapper::default();
        let schema = PropertySchema::reference("owner", "user");
        assert_eq!(mapper.resolve(&schema).unwrap(), "User");
    }

    #[test]
    fn test_missing_item_schema_is_fatal() {
        let mapper = ScalaTypeMapper::default();
        let mut schema = PropertySchema::array("tags", string());
        schema.item_schema = None;
        let err = mapper.resolve(&schema).unwrap_err();
        assert!(matches!(err, AppError::MissingItemSchema(ref n) if n == "tags"));
    }

    #[test]
    fn test_missing_reference_is_fatal() {
        let mapper = ScalaTypeMapper::default();
        let mut schema = PropertySchema::reference("owner", "User");
        schema.reference_name = None;
        assert!(matches!(
            mapper.resolve(&schema),
            Err(AppError::MissingReference(_))
        ));
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let mapper = ScalaTypeMapper::default();
        let schema = PropertySchema::primitive("x", "tuple");
        assert!(matches!(
            mapper.resolve(&schema),
            Err(AppError::UnknownKind(ref t)) if t == "tuple"
        ));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut types = IndexMap::new();
        types.insert("number".to_string(), "Double".to_string());
        let mut imports = IndexMap::new();
        imports.insert("Money".to_string(), "com.acme.Money".to_string());

        let mapper = ScalaTypeMapper::new(TypeMappings::with_overrides(&types, &imports));
        let schema = PropertySchema::primitive("price", "number");
        assert_eq!(mapper.resolve(&schema).unwrap(), "Double");
        assert_eq!(mapper.import_for("Money"), Some("com.acme.Money"));
        assert_eq!(mapper.import_for("Instant"), Some("java.time.Instant"));
    }

    #[test]
    fn test_every_import_is_reachable_from_a_type() {
        let mappings = TypeMappings::scala();
        for (type_name, _) in IMPORT_MAPPING {
            assert!(
                TYPE_MAPPING.iter().any(|(_, v)| v == type_name),
                "{} has an import but no mapping reaches it",
                type_name
            );
            assert!(mappings.import_for(type_name).is_some());
        }
    }

    #[test]
    fn test_container_names() {
        let mapper = ScalaTypeMapper::default();
        assert_eq!(mapper.container_name(SchemaKind::Array), "List");
        assert_eq!(mapper.container_name(SchemaKind::Map), "Map");
    }
}
