//! # URL Builder
//!
//! Combines a base URL string with query rows into the final request
//! URL. The base is passed through untouched, malformed or not; only the
//! appended query string is encoded.

use url::form_urlencoded;

use crate::spec::kv::KvList;

/// Form-urlencode the active rows of `list` as `name=value` pairs joined
/// with `&`. Spaces become `+`, reserved characters are percent-encoded.
pub fn form_encode(list: &KvList) -> String {
    let mut encoder = form_urlencoded::Serializer::new(String::new());
    for row in list.active_entries() {
        encoder.append_pair(&row.name, &row.value);
    }
    encoder.finish()
}

/// Append the active query rows to `base`. With no active rows the base
/// comes back unchanged.
pub fn build_url(base: &str, params: &KvList) -> String {
    let query = form_encode(params);
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{query}")
    }
}
