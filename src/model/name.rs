//! File system name validation
//!
//! Names are checked only where the user proposes a new or changed name
//! (the add field and the name column). A valid name is non-empty, contains
//! none of [`FORBIDDEN_CHARS`] and no control character below U+0020, and is
//! not already used by another entry.

use std::fmt;

/// Characters that may never appear in a file system name
pub const FORBIDDEN_CHARS: [char; 5] = ['/', ':', '"', '=', '\\'];

/// Why a proposed name was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Empty, or contains a forbidden or control character
    Invalid,
    /// Another entry already uses this name
    Duplicate(String),
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::Invalid => write!(
                f,
                "Invalid file system name. It cannot be empty nor contain '/', ':', '=', '\\' or '\"'"
            ),
            NameError::Duplicate(name) => {
                write!(f, "A file system with the name '{name}' already exists.")
            }
        }
    }
}

impl std::error::Error for NameError {}

/// Character-level check, ignoring emptiness and uniqueness
pub fn is_valid_name_text(name: &str) -> bool {
    name.chars()
        .all(|c| !FORBIDDEN_CHARS.contains(&c) && (c as u32) >= 0x20)
}

/// Validate a proposed name against the names already in use
pub fn validate_name<'a, I>(candidate: &str, existing: I) -> Result<(), NameError>
where
    I: IntoIterator<Item = &'a str>,
{
    if candidate.is_empty() || !is_valid_name_text(candidate) {
        return Err(NameError::Invalid);
    }

    if existing.into_iter().any(|name| name == candidate) {
        return Err(NameError::Duplicate(candidate.to_string()));
    }

    Ok(())
}

/// Reason a proposed name is rejected, or an empty string when it is fine.
///
/// This is the text shown as the add button tooltip.
pub fn check_new_name<'a, I>(candidate: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    match validate_name(candidate, existing) {
        Ok(()) => String::new(),
        Err(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_name("", NONE), Err(NameError::Invalid));
    }

    #[test]
    fn test_rejects_each_forbidden_char() {
        for c in FORBIDDEN_CHARS {
            let name = format!("a{c}b");
            assert_eq!(validate_name(&name, NONE), Err(NameError::Invalid), "{name}");
        }
    }

    #[test]
    fn test_rejects_control_chars() {
        assert_eq!(validate_name("tab\there", NONE), Err(NameError::Invalid));
        assert_eq!(validate_name("line\n", NONE), Err(NameError::Invalid));
        assert_eq!(validate_name("\u{1f}", NONE), Err(NameError::Invalid));
        // DEL is above the control range that is rejected
        assert_eq!(validate_name("del\u{7f}", NONE), Ok(()));
    }

    #[test]
    fn test_rejects_duplicates() {
        let existing = ["default", "user"];
        assert_eq!(
            validate_name("user", existing),
            Err(NameError::Duplicate("user".to_string()))
        );
        assert_eq!(validate_name("User", existing), Ok(()));
    }

    #[test]
    fn test_invalid_takes_precedence_over_duplicate() {
        assert_eq!(validate_name("a/b", ["a/b"]), Err(NameError::Invalid));
    }

    #[test]
    fn test_check_new_name_messages() {
        assert_eq!(check_new_name("assets", ["default"]), "");
        assert_eq!(
            check_new_name("default", ["default"]),
            "A file system with the name 'default' already exists."
        );
        assert!(check_new_name("", NONE).starts_with("Invalid file system name."));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn forbidden_char() -> impl Strategy<Value = char> {
            prop_oneof![
                prop::sample::select(FORBIDDEN_CHARS.to_vec()),
                (0u32..0x20).prop_map(|c| char::from_u32(c).unwrap()),
            ]
        }

        fn allowed_name() -> impl Strategy<Value = String> {
            r#"[^/:"=\\\x00-\x1f]{1,24}"#
        }

        proptest! {
            /// Any name containing a forbidden or control character is rejected
            #[test]
            fn prop_forbidden_char_rejected(
                prefix in ".{0,8}",
                bad in forbidden_char(),
                suffix in ".{0,8}",
            ) {
                let name = format!("{prefix}{bad}{suffix}");
                prop_assert_eq!(validate_name(&name, NONE), Err(NameError::Invalid));
            }

            /// Any non-empty, character-valid name that is not taken is accepted
            #[test]
            fn prop_valid_unused_name_accepted(
                name in allowed_name(),
                others in prop::collection::vec(allowed_name(), 0..6),
            ) {
                let existing: Vec<&str> = others
                    .iter()
                    .map(String::as_str)
                    .filter(|other| *other != name)
                    .collect();
                prop_assert_eq!(validate_name(&name, existing), Ok(()));
                prop_assert!(check_new_name(&name, NONE).is_empty());
            }
        }
    }
}
