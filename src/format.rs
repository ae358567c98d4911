//! # Text Formatter
//!
//! Reversible pretty/compact rendering for JSON body text. Both
//! directions are parse-or-passthrough: unparseable input comes back
//! unchanged and nothing here ever raises to the caller.

use serde_json::Value;

/// Parse and re-render; the `Err` branch carries the reason the input
/// was left alone.
fn reformat(text: &str, pretty: bool) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
}

/// Re-render `text` with two-space indentation. Unparseable input is
/// returned unchanged.
pub fn beautify(text: &str) -> String {
    reformat(text, true).unwrap_or_else(|_| text.to_string())
}

/// Re-render `text` with no insignificant whitespace. Unparseable input
/// is returned unchanged.
pub fn minify(text: &str) -> String {
    reformat(text, false).unwrap_or_else(|_| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPACT: &str = r#"{"a":1,"b":[true,null,"s"]}"#;

    #[test]
    fn beautify_should_indent_with_two_spaces() {
        assert_eq!(
            beautify(r#"{"a":1}"#),
            "{\n  \"a\": 1\n}"
        );
    }

    #[test]
    fn minify_should_strip_insignificant_whitespace() {
        let pretty = beautify(COMPACT);

        assert_eq!(minify(&pretty), COMPACT);
    }

    #[test]
    fn beautify_should_be_idempotent() {
        let once = beautify(COMPACT);

        assert_eq!(beautify(&once), once);
    }

    #[test]
    fn minify_should_be_idempotent() {
        let once = minify(COMPACT);

        assert_eq!(minify(&once), once);
    }

    #[test]
    fn both_should_pass_invalid_input_through_unchanged() {
        let garbage = "{not json at all";

        assert_eq!(beautify(garbage), garbage);
        assert_eq!(minify(garbage), garbage);
    }

    #[test]
    fn round_trip_should_preserve_semantic_content() {
        let value: Value = serde_json::from_str(COMPACT).unwrap();
        let round_tripped: Value =
            serde_json::from_str(&minify(&beautify(COMPACT))).unwrap();

        assert_eq!(round_tripped, value);
    }

    #[test]
    fn scalars_should_format_too() {
        assert_eq!(beautify("42"), "42");
        assert_eq!(minify("\"text\""), "\"text\"");
    }
}
