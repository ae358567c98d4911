//! # Persistence Adapter
//!
//! Last-request snapshot storage and portable file import/export, both
//! speaking the canonical JSON shape of [`RequestSpec`]. Store reads and
//! writes never raise past this module; only user-initiated import
//! surfaces an error, because silent partial success there would be
//! misleading.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::spec::model::RequestSpec;

/// Import rejects structurally incompatible files with a user-visible
/// error instead of silently defaulting.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("request file is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("request file must contain a JSON object")]
    NotAnObject,
}

/// Port for the process-wide "last request" slot: one snapshot,
/// overwritten on every save, read once at session start.
pub trait RequestStore {
    /// Missing or unreadable state reads as absent
    fn load(&self) -> Option<RequestSpec>;
    /// Overwrites the previous snapshot; failures are logged, not raised
    fn save(&self, spec: &RequestSpec);
}

/// File-backed store holding the canonical JSON at a fixed path
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RequestStore for FileStore {
    fn load(&self) -> Option<RequestSpec> {
        let bytes = fs::read(&self.path).ok()?;
        match import_bytes(&bytes) {
            Ok(spec) => Some(spec),
            Err(e) => {
                tracing::warn!(
                    "ignoring unreadable last-request state at {}: {e}",
                    self.path.display()
                );
                None
            }
        }
    }

    fn save(&self, spec: &RequestSpec) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!("could not create state directory {}: {e}", parent.display());
                return;
            }
        }
        let bytes = serde_json::to_vec(spec).unwrap_or_default();
        if let Err(e) = fs::write(&self.path, bytes) {
            tracing::warn!(
                "could not save last request to {}: {e}",
                self.path.display()
            );
        }
    }
}

/// Serialize `spec` for file export, human readable
pub fn export_bytes(spec: &RequestSpec) -> Vec<u8> {
    serde_json::to_vec_pretty(spec).unwrap_or_default()
}

/// Suggested export file name: `request-<timestamp>.json` with
/// filesystem-unsafe characters replaced by underscores
pub fn suggested_export_name() -> String {
    let stamp = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "_");
    format!("request-{stamp}.json")
}

/// Parse exported bytes back into a spec. Recognized fields map over and
/// missing or wrong-shaped ones fall back to their defaults; only a top
/// level that is not a JSON object is an error.
pub fn import_bytes(bytes: &[u8]) -> Result<RequestSpec, ImportError> {
    let value: Value = serde_json::from_slice(bytes)?;
    spec_from_value(value)
}

fn spec_from_value(value: Value) -> Result<RequestSpec, ImportError> {
    let Value::Object(mut fields) = value else {
        return Err(ImportError::NotAnObject);
    };

    // Each top-level field is defaulted independently so one corrupt
    // field does not take the rest of the record down with it.
    fn take<T>(fields: &mut serde_json::Map<String, Value>, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        fields
            .remove(key)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    Ok(RequestSpec {
        url: take(&mut fields, "url"),
        method: take(&mut fields, "method"),
        headers: take(&mut fields, "headers"),
        query_params: take(&mut fields, "queryParams"),
        body: take(&mut fields, "body"),
        auth: take(&mut fields, "auth"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::kv::KvList;
    use crate::spec::model::{AuthSpec, AuthType, Body, Method};
    use serde_json::json;

    fn sample_spec() -> RequestSpec {
        RequestSpec {
            url: "https://api.example.com/items".to_string(),
            method: Method::Post,
            headers: KvList::from_pairs([("Accept", "application/json")]),
            query_params: KvList::from_pairs([("page", "2")]),
            body: Body::Json(json!({"name": "widget", "count": 3})),
            auth: Some(AuthSpec {
                auth_type: AuthType::Bearer,
                token: "secret".to_string(),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn export_then_import_should_be_lossless() {
        let spec = sample_spec();

        let restored = import_bytes(&export_bytes(&spec)).unwrap();

        assert_eq!(restored, spec);
    }

    #[test]
    fn export_should_use_the_canonical_field_names() {
        let value: Value = serde_json::from_slice(&export_bytes(&sample_spec())).unwrap();

        assert_eq!(value["method"], json!("POST"));
        assert_eq!(value["queryParams"], json!([{"name": "page", "value": "2"}]));
        assert_eq!(value["body"]["mode"], json!("json"));
        assert_eq!(value["auth"]["type"], json!("bearer"));
    }

    #[test]
    fn import_should_reject_a_non_object_top_level() {
        let err = import_bytes(b"42").unwrap_err();
        assert!(matches!(err, ImportError::NotAnObject));

        let err = import_bytes(b"[1,2]").unwrap_err();
        assert!(matches!(err, ImportError::NotAnObject));
    }

    #[test]
    fn import_should_reject_unparseable_input() {
        let err = import_bytes(b"{oops").unwrap_err();
        assert!(matches!(err, ImportError::Syntax(_)));
    }

    #[test]
    fn import_should_default_each_field_independently() {
        // method is corrupt, url is missing, headers are fine
        let bytes = serde_json::to_vec(&json!({
            "method": 17,
            "headers": [{"name": "X-One", "value": "1"}],
            "body": "not a body"
        }))
        .unwrap();

        let spec = import_bytes(&bytes).unwrap();

        assert_eq!(spec.method, Method::Get);
        assert_eq!(spec.url, "");
        assert_eq!(spec.headers.len(), 1);
        assert_eq!(spec.body, Body::None);
        assert_eq!(spec.auth, None);
    }

    #[test]
    fn import_should_accept_an_empty_object() {
        let spec = import_bytes(b"{}").unwrap();

        assert_eq!(spec, RequestSpec::default());
    }

    #[test]
    fn file_store_should_round_trip_a_spec() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state/last_request.json"));
        let spec = sample_spec();

        store.save(&spec);

        assert_eq!(store.load(), Some(spec));
    }

    #[test]
    fn file_store_should_read_absent_state_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never_written.json"));

        assert_eq!(store.load(), None);
    }

    #[test]
    fn file_store_should_read_corrupt_state_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_request.json");
        fs::write(&path, b"[]").unwrap();

        assert_eq!(FileStore::new(path).load(), None);
    }

    #[test]
    fn file_store_save_should_overwrite_the_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("last_request.json"));

        store.save(&sample_spec());
        let mut second = sample_spec();
        second.url = "https://api.example.com/other".to_string();
        store.save(&second);

        assert_eq!(store.load(), Some(second));
    }

    #[test]
    fn suggested_export_name_should_avoid_unsafe_characters() {
        let name = suggested_export_name();

        assert!(name.starts_with("request-"));
        assert!(name.ends_with(".json"));
        assert!(!name.trim_end_matches(".json").contains(':'));
        assert!(!name.trim_end_matches(".json").contains('.'));
    }
}
