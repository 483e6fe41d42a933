//! # Naming Utilities
//!
//! Converts raw schema names and values into Scala-safe identifiers:
//! reserved-word escaping, type-name casing, enum variable names and enum
//! literal expressions, parameter names and API class names.

use crate::primitives::{is_number_type, is_reserved_word};

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cases the first character, leaving the rest untouched.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalizes every part and concatenates them without separators.
pub fn camelize<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    parts.into_iter().map(capitalize).collect()
}

/// Wraps a Scala reserved word in backticks; other identifiers pass through.
///
/// Apply exactly once, where an identifier becomes user-facing.
pub fn escape(identifier: &str) -> String {
    if is_reserved_word(identifier) {
        format!("`{}`", identifier)
    } else {
        identifier.to_string()
    }
}

/// Canonical type-name casing.
pub fn to_model_name(name: &str) -> String {
    capitalize(name)
}

/// The enum type name derived from a property name: `order_status` -> `OrderStatus`.
pub fn enum_name(property_name: &str) -> String {
    camelize(property_name.split('_'))
}

/// The variable name for one enum literal.
///
/// Numeric base types get a `Number` prefix since identifiers may not start
/// with a digit; everything else is camel-cased on spaces and underscores.
pub fn enum_variable_name(literal: &str, base_type: &str) -> String {
    if is_number_type(base_type) {
        format!("Number{}", literal)
    } else {
        camelize(literal.split([' ', '_']))
    }
}

/// The Scala expression for one enum literal.
///
/// Numeric base types render the bare literal. Anything else is escaped,
/// lower-cased and quoted.
pub fn enum_literal_expression(literal: &str, base_type: &str) -> String {
    if is_number_type(base_type) {
        literal.to_string()
    } else {
        format!("\"{}\"", escape_text(literal).to_lowercase())
    }
}

/// Neutralizes comment delimiters so text cannot break out of a block comment.
pub fn escape_unsafe_characters(input: &str) -> String {
    input.replace("*/", "*_/").replace("/*", "/_*")
}

/// Escapes text for embedding inside a double-quoted string literal.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\t' | '\n' | '\r' => out.push(' '),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    escape_unsafe_characters(&out)
}

/// Converts a raw name into a lower camel-case Scala value name.
///
/// Non-alphanumeric characters act as word separators and are dropped.
/// A leading digit gets an underscore prefix. Reserved words are escaped.
pub fn to_var_name(name: &str) -> String {
    let mut words = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty());

    let mut ident = match words.next() {
        Some(first) => decapitalize(first),
        None => return name.to_string(),
    };
    for word in words {
        ident.push_str(&capitalize(word));
    }

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    escape(&ident)
}

/// Parameter names follow the value naming rules.
pub fn to_param_name(name: &str) -> String {
    to_var_name(name)
}

/// The API class name for an operation tag: `pet store` -> `PetStoreApi`.
pub fn to_api_name(tag: &str) -> String {
    let base = camelize(
        tag.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty()),
    );
    if base.is_empty() {
        "DefaultApi".to_string()
    } else {
        format!("{}Api", base)
    }
}

/// Derives an operation name from the HTTP Method and URL path when `operationId` is missing.
///
/// e.g. `GET /users/{id}` -> `get_users_id`
pub fn derive_operation_name(method: &str, path: &str) -> String {
    let clean_path = path.replace(['{', '}'], "").replace(['/', '-', '.'], "_");
    let clean_path = clean_path.trim_matches('_');
    if clean_path.is_empty() {
        method.to_lowercase()
    } else {
        format!("{}_{}", method.to_lowercase(), clean_path)
    }
}

/// The method name used for an operation in generated sources.
pub fn to_operation_nickname(operation_id: Option<&str>, method: &str, path: &str) -> String {
    match operation_id {
        Some(id) if !id.trim().is_empty() => to_var_name(id),
        _ => to_var_name(&derive_operation_name(method, path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_reserved() {
        assert_eq!(escape("class"), "`class`");
        assert_eq!(escape("type"), "`type`");
        assert_eq!(escape("widgetId"), "widgetId");
    }

    #[test]
    fn test_model_name_capitalizes() {
        assert_eq!(to_model_name("widget"), "Widget");
        assert_eq!(to_model_name(""), "");
    }

    #[test]
    fn test_enum_variable_names() {
        assert_eq!(enum_variable_name("1", "Int"), "Number1");
        assert_eq!(enum_variable_name("3.5", "Double"), "Number3.5");
        assert_eq!(enum_variable_name("in progress", "String"), "InProgress");
        assert_eq!(enum_variable_name("on_hold", "String"), "OnHold");
        assert_eq!(enum_variable_name("ACTIVE", "String"), "ACTIVE");
    }

    #[test]
    fn test_enum_literal_expressions() {
        assert_eq!(enum_literal_expression("ACTIVE", "String"), "\"active\"");
        assert_eq!(enum_literal_expression("2", "Long"), "2");
        assert_eq!(
            enum_literal_expression("Say \"Hi\"", "String"),
            "\"say \\\"hi\\\"\""
        );
    }

    #[test]
    fn test_enum_name() {
        assert_eq!(enum_name("order_status"), "OrderStatus");
        assert_eq!(enum_name("status"), "Status");
    }

    #[test]
    fn test_escape_unsafe_characters() {
        assert_eq!(escape_unsafe_characters("a */ b /* c"), "a *_/ b /_* c");
    }

    #[test]
    fn test_escape_text_flattens_whitespace() {
        assert_eq!(escape_text("line\nbreak\ttab"), "line break tab");
        assert_eq!(escape_text("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_var_names() {
        assert_eq!(to_var_name("user_id"), "userId");
        assert_eq!(to_var_name("userId"), "userId");
        assert_eq!(to_var_name("X-Request-Id"), "xRequestId");
        assert_eq!(to_var_name("type"), "`type`");
        assert_eq!(to_var_name("2fa"), "_2fa");
    }

    #[test]
    fn test_api_names() {
        assert_eq!(to_api_name("pets"), "PetsApi");
        assert_eq!(to_api_name("pet store"), "PetStoreApi");
        assert_eq!(to_api_name(""), "DefaultApi");
    }

    #[test]
    fn test_derive_operation_name() {
        assert_eq!(derive_operation_name("GET", "/users"), "get_users");
        assert_eq!(
            derive_operation_name("POST", "/users/{id}/activate"),
            "post_users_id_activate"
        );
        assert_eq!(derive_operation_name("GET", "/"), "get");
    }

    #[test]
    fn test_operation_nickname() {
        assert_eq!(
            to_operation_nickname(Some("ListPets"), "GET", "/pets"),
            "listPets"
        );
        assert_eq!(
            to_operation_nickname(None, "GET", "/users/{id}"),
            "getUsersId"
        );
    }
}
