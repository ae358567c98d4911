//! # Command-Line Serializer
//!
//! Renders a request spec as an equivalent multi-line curl invocation.
//! Line order and flag spelling are a stable contract other tooling may
//! parse against.

use crate::spec::model::{Body, RequestSpec};
use crate::spec::url::{build_url, form_encode};

/// Make `text` safe inside a single-quoted shell word: close the quote,
/// emit an escaped literal quote, reopen.
fn escape_single_quotes(text: &str) -> String {
    text.replace('\'', "'\\''")
}

/// Render `spec` as a curl command joined with line continuations.
///
/// Authentication is deliberately not rendered; an Authorization header
/// added by the user comes through like any other header.
pub fn to_curl(spec: &RequestSpec) -> String {
    let url = build_url(&spec.url, &spec.query_params);

    let mut lines = vec![
        format!("curl -X {} \\", spec.method),
        format!("  '{url}' \\"),
    ];
    for header in spec.headers.active_entries() {
        lines.push(format!("  -H '{}: {}' \\", header.name, header.value));
    }

    match &spec.body {
        Body::Json(payload) if !payload.is_null() => {
            let compact = serde_json::to_string(payload).unwrap_or_default();
            lines.push("  -H 'Content-Type: application/json' \\".to_string());
            lines.push(format!("  -d '{}'", escape_single_quotes(&compact)));
        }
        Body::Form(fields) if fields.active_entries().next().is_some() => {
            lines.push("  -H 'Content-Type: application/x-www-form-urlencoded' \\".to_string());
            lines.push(format!("  -d '{}'", escape_single_quotes(&form_encode(fields))));
        }
        Body::Raw { content, .. } if !content.is_empty() => {
            // Content-Type for raw bodies is the caller's responsibility
            lines.push(format!("  -d '{}'", escape_single_quotes(content)));
        }
        _ => {}
    }

    lines.join("\n")
}
