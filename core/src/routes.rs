//! # Route Patterns
//!
//! Converts URL path templates into Scala segment-matching expressions, e.g.
//! `/users/{userId}/posts` -> `"users" :: userId :: "posts"`.

use crate::error::{AppError, AppResult};
use crate::model::OperationDefinition;
use crate::naming::{escape_text, to_param_name};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Infix operator joining segment tokens.
pub const SEGMENT_SEPARATOR: &str = " :: ";

/// A classified path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    /// A fixed segment, matched verbatim.
    Literal(String),
    /// A `{name}` segment binding a value.
    Variable(String),
}

/// Splits a path template on `/`, dropping the empty segment before a leading slash.
///
/// Empty segments from consecutive slashes are kept so the raw shape survives.
pub fn split_path(path: &str) -> Vec<String> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').map(str::to_string).collect()
}

/// Classifies one non-empty segment.
///
/// A segment wrapped whole in braces is a variable; anything else, including
/// a segment with embedded braces such as `{id}.json`, is a literal. Only an
/// empty variable name (`{}`) cannot be classified.
pub fn classify_segment(segment: &str) -> AppResult<PathToken> {
    static VARIABLE_RE: OnceLock<Regex> = OnceLock::new();
    let variable_re =
        VARIABLE_RE.get_or_init(|| Regex::new(r"^\{(.*)\}$").expect("Invalid regex"));

    match variable_re.captures(segment) {
        Some(caps) if caps[1].is_empty() => {
            Err(AppError::UnclassifiedSegment(segment.to_string()))
        }
        Some(caps) => Ok(PathToken::Variable(caps[1].to_string())),
        None => Ok(PathToken::Literal(segment.to_string())),
    }
}

/// Derives the segment-matching pattern for a path template.
///
/// Variable names go through `param_name`; literals are quoted. Empty
/// segments contribute nothing, and a path without segments yields `""`.
pub fn derive_pattern<F>(path: &str, param_name: F) -> AppResult<String>
where
    F: Fn(&str) -> String,
{
    let mut tokens = Vec::new();
    for segment in split_path(path).iter().filter(|s| !s.is_empty()) {
        let token = match classify_segment(segment)? {
            PathToken::Variable(name) => param_name(&name),
            PathToken::Literal(text) => format!("\"{}\"", escape_text(&text)),
        };
        tokens.push(token);
    }
    Ok(tokens.join(SEGMENT_SEPARATOR))
}

/// Fills `route_pattern` on every operation using Scala parameter naming.
pub fn annotate_operations(operations: &mut [OperationDefinition]) -> AppResult<()> {
    for op in operations.iter_mut() {
        op.route_pattern = derive_pattern(&op.path, to_param_name)?;
        debug!(path = %op.path, pattern = %op.route_pattern, "derived route pattern");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn test_three_token_pattern() {
        let pattern = derive_pattern("/users/{userId}/posts", identity).unwrap();
        assert_eq!(pattern, "\"users\" :: userId :: \"posts\"");
    }

    #[test]
    fn test_resolver_is_applied_to_variables() {
        let pattern = derive_pattern("/orders/{order_id}", to_param_name).unwrap();
        assert_eq!(pattern, "\"orders\" :: orderId");

        let pattern = derive_pattern("/things/{type}", to_param_name).unwrap();
        assert_eq!(pattern, "\"things\" :: `type`");
    }

    #[test]
    fn test_empty_segments_are_skipped() {
        let pattern = derive_pattern("/users//{id}/", identity).unwrap();
        assert_eq!(pattern, "\"users\" :: id");
    }

    #[test]
    fn test_root_path_is_empty_pattern() {
        assert_eq!(derive_pattern("/", identity).unwrap(), "");
        assert_eq!(derive_pattern("", identity).unwrap(), "");
    }

    #[test]
    fn test_embedded_braces_are_literals() {
        let pattern = derive_pattern("/pets/{id}.json", identity).unwrap();
        assert_eq!(pattern, "\"pets\" :: \"{id}.json\"");

        let pattern = derive_pattern("/api/v{version}/items", identity).unwrap();
        assert_eq!(pattern, "\"api\" :: \"v{version}\" :: \"items\"");
    }

    #[test]
    fn test_empty_variable_name_is_unclassifiable() {
        let err = derive_pattern("/files/{}", identity).unwrap_err();
        assert!(matches!(err, AppError::UnclassifiedSegment(ref s) if s == "{}"));
    }

    #[test]
    fn test_split_path_keeps_raw_segments() {
        assert_eq!(split_path("/a//b"), vec!["a", "", "b"]);
        assert_eq!(split_path("/"), Vec::<String>::new());
        assert_eq!(split_path("/pets/{id}"), vec!["pets", "{id}"]);
    }
}
