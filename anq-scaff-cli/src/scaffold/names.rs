//! Resource naming conventions
//!
//! Everything a template needs to know about *where* a resource lives is a
//! pure function of its name and the API version:
//!
//! | name | class | module | model path | route |
//! |---|---|---|---|---|
//! | `user` | `User` | `user` | `src/models/user.rs` | `/user/actions` |
//! | `userProfile` | `UserProfile` | `userProfile` | `src/models/userProfile.rs` | `/userProfile/actions` |
//! | `order-item` | `Order_item` | `order_item` | `src/models/order_item.rs` | `/order-item/actions` |

use super::error::{Result, ScaffoldError};
use std::path::PathBuf;

/// Shortest accepted resource name
pub const MIN_NAME_LEN: usize = 2;

/// Longest accepted resource name
pub const MAX_NAME_LEN: usize = 50;

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

const RESERVED_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Names derived from a resource identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNames {
    /// Resource name as given, used in the route
    pub resource_name: String,
    /// Type prefix for generated structs, e.g. `User` in `UserService`
    pub class_name: String,
    /// File and module name, `-` replaced by `_`
    pub module_name: String,
    /// `/<resource_name>/actions`
    pub route_path: String,
    /// API version directory, e.g. `v1`
    pub api_version: String,
    /// `src/models/<module>.rs`
    pub model_path: PathBuf,
    /// `src/schemas/<module>.rs`
    pub schema_path: PathBuf,
    /// `src/services/<module>.rs`
    pub service_path: PathBuf,
    /// `src/api/<version>/<module>.rs`
    pub api_path: PathBuf,
}

/// Derive every name and path for a resource
///
/// The caller validates `resource_name` first; see [`validate_resource_name`].
#[must_use]
pub fn derive(resource_name: &str, api_version: &str) -> DerivedNames {
    let module_name = resource_name.replace('-', "_");
    let class_name = capitalize(&module_name);

    DerivedNames {
        resource_name: resource_name.to_string(),
        route_path: format!("/{resource_name}/actions"),
        api_version: api_version.to_string(),
        model_path: PathBuf::from(format!("src/models/{module_name}.rs")),
        schema_path: PathBuf::from(format!("src/schemas/{module_name}.rs")),
        service_path: PathBuf::from(format!("src/services/{module_name}.rs")),
        api_path: PathBuf::from(format!("src/api/{api_version}/{module_name}.rs")),
        class_name,
        module_name,
    }
}

/// Upper-case the first character, leave the rest untouched
#[must_use]
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Check a resource name and return it trimmed
///
/// # Errors
///
/// Returns [`ScaffoldError::InvalidName`] when the name is too short or too
/// long, does not start with a letter, contains characters other than ASCII
/// letters, digits, `_` and `-`, or is a Rust keyword or reserved device name.
pub fn validate_resource_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    let invalid = |reason| ScaffoldError::InvalidName {
        name: name.to_string(),
        reason,
    };

    let len = trimmed.chars().count();
    if len < MIN_NAME_LEN {
        return Err(invalid("must be at least 2 characters"));
    }
    if len > MAX_NAME_LEN {
        return Err(invalid("must be at most 50 characters"));
    }
    if trimmed.contains("..") || trimmed.contains('/') || trimmed.contains('\\') {
        return Err(invalid("must not contain path characters"));
    }
    if !trimmed.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(invalid("must start with a letter"));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid("may only contain letters, digits, '_' and '-'"));
    }
    if RUST_KEYWORDS.contains(&trimmed) {
        return Err(invalid("is a Rust keyword"));
    }
    if RESERVED_DEVICE_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(trimmed))
    {
        return Err(invalid("is a reserved system name"));
    }

    Ok(trimmed.to_string())
}

/// Check an API version (`v1`, `v2`, ...) and return it trimmed
///
/// # Errors
///
/// Returns [`ScaffoldError::InvalidVersion`] unless the value is `v`
/// followed by one or more ASCII digits.
pub fn validate_api_version(version: &str) -> Result<String> {
    let trimmed = version.trim();
    let valid = trimmed
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));

    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(ScaffoldError::InvalidVersion(version.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_simple() {
        let names = derive("user", "v1");

        assert_eq!(names.class_name, "User");
        assert_eq!(names.module_name, "user");
        assert_eq!(names.route_path, "/user/actions");
        assert_eq!(names.model_path, PathBuf::from("src/models/user.rs"));
        assert_eq!(names.schema_path, PathBuf::from("src/schemas/user.rs"));
        assert_eq!(names.service_path, PathBuf::from("src/services/user.rs"));
        assert_eq!(names.api_path, PathBuf::from("src/api/v1/user.rs"));
    }

    #[test]
    fn test_class_name_keeps_remainder() {
        assert_eq!(derive("userProfile", "v1").class_name, "UserProfile");
        assert_eq!(derive("HTTPlog", "v1").class_name, "HTTPlog");
    }

    #[test]
    fn test_hyphen_becomes_underscore() {
        let names = derive("order-item", "v2");

        assert_eq!(names.module_name, "order_item");
        assert_eq!(names.class_name, "Order_item");
        assert_eq!(names.route_path, "/order-item/actions");
        assert_eq!(names.api_path, PathBuf::from("src/api/v2/order_item.rs"));
    }

    #[test]
    fn test_derive_is_idempotent() {
        assert_eq!(derive("article", "v1"), derive("article", "v1"));
        let class = derive("article", "v1").class_name;
        assert_eq!(derive(&class, "v1").class_name, class);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    #[test]
    fn test_valid_resource_names() {
        for name in ["user", "ab", "order-item", "user_profile", "Item2", "  padded  "] {
            assert!(validate_resource_name(name).is_ok(), "should accept {name:?}");
        }
        assert_eq!(validate_resource_name("  padded  ").unwrap(), "padded");
    }

    #[test]
    fn test_invalid_resource_names() {
        let long = "a".repeat(51);
        for name in [
            "", "a", "1user", "_user", "user name", "user.name", "../etc", "a/b", "a\\b", "fn",
            "type", "CON", "nul", "Com1", "lpt9", "ūser", long.as_str(),
        ] {
            assert!(
                matches!(
                    validate_resource_name(name),
                    Err(ScaffoldError::InvalidName { .. })
                ),
                "should reject {name:?}"
            );
        }
    }

    #[test]
    fn test_api_version() {
        assert_eq!(validate_api_version("v1").unwrap(), "v1");
        assert_eq!(validate_api_version(" v12 ").unwrap(), "v12");

        for version in ["", "v", "1", "V1", "v1a", "version1"] {
            assert!(
                matches!(
                    validate_api_version(version),
                    Err(ScaffoldError::InvalidVersion(_))
                ),
                "should reject {version:?}"
            );
        }
    }
}
