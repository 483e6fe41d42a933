//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Malformed input (an unknown schema kind, a container without its item
//! schema, an unclassifiable path segment) is always fatal and carries the
//! offending identifier. Degenerate-but-valid input never produces an error.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON (de)serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// A schema declared a kind or type token the generator does not know.
    #[from(ignore)]
    #[display("Unknown schema kind: {_0}")]
    UnknownKind(String),

    /// An array or map schema without its item schema.
    #[from(ignore)]
    #[display("Container schema '{_0}' has no item schema")]
    MissingItemSchema(String),

    /// A reference schema without a reference target.
    #[from(ignore)]
    #[display("Reference schema '{_0}' has no target")]
    MissingReference(String),

    /// A path segment that is neither a literal nor a `{name}` variable.
    #[from(ignore)]
    #[display("Cannot classify path segment: {_0}")]
    UnclassifiedSegment(String),

    /// The API description could not be deserialized.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Whether the error indicates a malformed input model produced upstream.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            AppError::UnknownKind(_)
                | AppError::MissingItemSchema(_)
                | AppError::MissingReference(_)
                | AppError::UnclassifiedSegment(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_malformed_input_carries_identifier() {
        let err = AppError::MissingItemSchema("tags".into());
        assert!(err.is_malformed_input());
        assert_eq!(err.to_string(), "Container schema 'tags' has no item schema");

        let err = AppError::UnknownKind("tuple".into());
        assert_eq!(err.to_string(), "Unknown schema kind: tuple");
    }

    #[test]
    fn test_parse_is_not_malformed_input() {
        assert!(!AppError::Parse("bad yaml".into()).is_malformed_input());
    }
}
