//! # Language Tables
//!
//! Static registries of Scala primitive type names, reserved identifiers,
//! numeric type names and the temporal formats that redirect string schemas.

/// Scala keywords that must be wrapped in backticks when used as identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "abstract",
    "case",
    "catch",
    "class",
    "def",
    "do",
    "else",
    "extends",
    "false",
    "final",
    "finally",
    "for",
    "forSome",
    "if",
    "implicit",
    "import",
    "lazy",
    "match",
    "new",
    "null",
    "object",
    "override",
    "package",
    "private",
    "protected",
    "return",
    "sealed",
    "super",
    "this",
    "throw",
    "trait",
    "try",
    "true",
    "type",
    "val",
    "var",
    "while",
    "with",
    "yield",
];

/// Type names that never trigger an import.
pub const LANGUAGE_PRIMITIVES: &[&str] = &[
    "Boolean", "Double", "Float", "Int", "Long", "List", "Map", "String",
];

/// Type names whose enum literals are rendered as numeric constants.
pub const NUMBER_TYPES: &[&str] = &["Int", "Long", "Float", "Double"];

/// String formats that select a richer temporal type on a plain string schema.
pub const TEMPORAL_FORMATS: &[&str] = &["timestamp", "local-time", "local-date-time"];

/// The format token flagged by the timestamp pass.
pub const TIMESTAMP_FORMAT: &str = "timestamp";

/// Returns true if `word` is a Scala reserved word (case-sensitive).
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

/// Returns true if `type_name` is a Scala language primitive.
pub fn is_language_primitive(type_name: &str) -> bool {
    LANGUAGE_PRIMITIVES.contains(&type_name)
}

/// Returns true if `type_name` is one of the numeric enum base types.
pub fn is_number_type(type_name: &str) -> bool {
    NUMBER_TYPES.contains(&type_name)
}

/// Returns true if `format` redirects a plain string schema to a temporal type.
pub fn is_temporal_format(format: &str) -> bool {
    TEMPORAL_FORMATS.contains(&format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words_are_case_sensitive() {
        assert!(is_reserved_word("class"));
        assert!(is_reserved_word("forSome"));
        assert!(!is_reserved_word("Class"));
        assert!(!is_reserved_word("widgetId"));
    }

    #[test]
    fn test_number_types() {
        for t in ["Int", "Long", "Float", "Double"] {
            assert!(is_number_type(t), "{} should be numeric", t);
        }
        assert!(!is_number_type("Integer"));
        assert!(!is_number_type("String"));
    }

    #[test]
    fn test_temporal_formats() {
        assert!(is_temporal_format("timestamp"));
        assert!(is_temporal_format("local-date-time"));
        assert!(!is_temporal_format("date-time"));
        assert!(!is_temporal_format("date"));
    }

    #[test]
    fn test_containers_are_primitives() {
        assert!(is_language_primitive("List"));
        assert!(is_language_primitive("Map"));
        assert!(!is_language_primitive("Instant"));
    }
}
