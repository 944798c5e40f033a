//! Struct tag parsing.
//!
//! Field tags follow the Go convention of space-separated `key:"value"`
//! pairs. Only the `gooptions` key is interpreted.

use crate::types::TagOptions;

/// Tag key read by the generator.
pub const TAG_KEY: &str = "gooptions";

/// Looks up `key` in a struct tag.
///
/// Returns `None` if the key is absent or the tag is malformed before the
/// key is reached, matching Go's `reflect.StructTag.Lookup`.
#[must_use]
pub fn lookup(tag: &str, key: &str) -> Option<String> {
    let mut rest = tag;

    while !rest.is_empty() {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }

        let name_end = rest
            .find(|c: char| c <= ' ' || c == ':' || c == '"' || c == '\u{7f}')
            .unwrap_or(rest.len());
        if name_end == 0 || !rest[name_end..].starts_with(":\"") {
            break;
        }
        let name = &rest[..name_end];
        rest = &rest[name_end + 1..];

        // Scan the quoted value, honouring backslash escapes.
        let bytes = rest.as_bytes();
        let mut i = 1;
        while i < bytes.len() && bytes[i] != b'"' {
            if bytes[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        let quoted = &rest[..=i];
        rest = &rest[i + 1..];

        if name == key {
            return serde_json::from_str::<String>(quoted).ok();
        }
    }

    None
}

/// Parses the generator's options out of a struct tag.
#[must_use]
pub fn parse_tag_options(tag: &str) -> TagOptions {
    let mut options = TagOptions::default();

    let Some(value) = lookup(tag, TAG_KEY) else {
        return options;
    };

    for option in value.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        match option {
            "-" | "ignore" => options.ignore = true,
            other => tracing::debug!("ignoring unknown {} tag option '{}'", TAG_KEY, other),
        }
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_single_key() {
        assert_eq!(lookup(r#"gooptions:"-""#, "gooptions"), Some("-".to_string()));
    }

    #[test]
    fn test_lookup_among_several_keys() {
        let tag = r#"json:"email,omitempty" gooptions:"ignore" yaml:"mail""#;
        assert_eq!(lookup(tag, "json"), Some("email,omitempty".to_string()));
        assert_eq!(lookup(tag, "gooptions"), Some("ignore".to_string()));
        assert_eq!(lookup(tag, "yaml"), Some("mail".to_string()));
        assert_eq!(lookup(tag, "xml"), None);
    }

    #[test]
    fn test_lookup_escaped_quote() {
        let tag = r#"doc:"say \"hi\"" gooptions:"-""#;
        assert_eq!(lookup(tag, "doc"), Some("say \"hi\"".to_string()));
        assert_eq!(lookup(tag, "gooptions"), Some("-".to_string()));
    }

    #[test]
    fn test_lookup_malformed() {
        assert_eq!(lookup("gooptions", "gooptions"), None);
        assert_eq!(lookup(r#"gooptions:"unterminated"#, "gooptions"), None);
        assert_eq!(lookup("", "gooptions"), None);
    }

    #[test]
    fn test_parse_tag_options() {
        assert!(parse_tag_options(r#"gooptions:"-""#).ignore);
        assert!(parse_tag_options(r#"json:"x" gooptions:"ignore""#).ignore);
        assert!(!parse_tag_options(r#"gooptions:"foobar""#).ignore);
        assert!(!parse_tag_options(r#"json:"-""#).ignore);
        assert!(!parse_tag_options("").ignore);
    }
}
