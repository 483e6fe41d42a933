#![deny(missing_docs)]

//! # Reference Helpers
//!
//! Local `$ref` handling. Only same-document pointers into `#/definitions`
//! (Swagger 2.0) and `#/components/schemas` (OAS 3) are followed.

/// Extracts the simple model name from a reference string.
///
/// `#/definitions/User` and `#/components/schemas/User` both yield `User`;
/// a bare name is returned unchanged. An empty tail yields `None`.
pub fn extract_ref_name(ref_str: &str) -> Option<String> {
    let name = ref_str.rsplit('/').next().unwrap_or(ref_str);
    if name.is_empty() || name == "#" {
        return None;
    }
    Some(decode_pointer_segment(name))
}

/// True if the reference points into this document's schema sections.
pub fn is_local_schema_ref(ref_str: &str) -> bool {
    ref_str.starts_with("#/definitions/") || ref_str.starts_with("#/components/schemas/")
}

/// Decodes JSON Pointer escapes (`~1` -> `/`, `~0` -> `~`).
fn decode_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ref_name() {
        assert_eq!(
            extract_ref_name("#/definitions/User").as_deref(),
            Some("User")
        );
        assert_eq!(
            extract_ref_name("#/components/schemas/Pet").as_deref(),
            Some("Pet")
        );
        assert_eq!(extract_ref_name("Order").as_deref(), Some("Order"));
        assert_eq!(extract_ref_name("#/definitions/"), None);
    }

    #[test]
    fn test_pointer_escapes() {
        assert_eq!(
            extract_ref_name("#/definitions/a~1b~0c").as_deref(),
            Some("a/b~c")
        );
    }

    #[test]
    fn test_local_schema_ref() {
        assert!(is_local_schema_ref("#/definitions/User"));
        assert!(is_local_schema_ref("#/components/schemas/User"));
        assert!(!is_local_schema_ref("other.yaml#/definitions/User"));
        assert!(!is_local_schema_ref("#/components/parameters/Limit"));
    }
}
