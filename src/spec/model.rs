//! # Request Model
//!
//! The canonical request aggregate and the editable draft it is derived
//! from. The draft holds every body-mode payload at once so switching
//! modes never loses what was typed; the canonical spec carries only the
//! active payload in a tagged `Body` variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::spec::kv::KvList;

/// HTTP methods reachable from the editing surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Head,
        Method::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }

    /// Only these methods carry a request body on the wire
    pub fn allows_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            other => Err(anyhow::anyhow!("unsupported HTTP method: {other}")),
        }
    }
}

/// Which kind of payload a request body carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    #[default]
    None,
    Json,
    Form,
    Raw,
    Multipart,
}

/// Request body, tagged by mode. Exactly one variant is active per spec.
///
/// `Json(Value::Null)` means "json mode selected, payload absent" and is
/// skipped by the serializers, mirroring the editor's behavior when the
/// json draft does not parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BodyRepr", into = "BodyRepr")]
pub enum Body {
    #[default]
    None,
    Json(Value),
    Form(KvList),
    Raw {
        content: String,
        content_type: String,
    },
    // Reserved slot; no serializer renders these parts yet
    Multipart(Vec<Value>),
}

impl Body {
    pub fn mode(&self) -> BodyMode {
        match self {
            Body::None => BodyMode::None,
            Body::Json(_) => BodyMode::Json,
            Body::Form(_) => BodyMode::Form,
            Body::Raw { .. } => BodyMode::Raw,
            Body::Multipart(_) => BodyMode::Multipart,
        }
    }
}

/// Canonical wire shape for a body, shared by file export and the
/// last-request store: `{ mode, json?, form?, raw?, rawContentType?,
/// multipart? }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct BodyRepr {
    mode: BodyMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    json: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    form: Option<KvList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    multipart: Option<Vec<Value>>,
}

impl From<BodyRepr> for Body {
    fn from(repr: BodyRepr) -> Self {
        match repr.mode {
            BodyMode::None => Body::None,
            BodyMode::Json => Body::Json(repr.json.unwrap_or(Value::Null)),
            BodyMode::Form => Body::Form(repr.form.unwrap_or_default()),
            BodyMode::Raw => Body::Raw {
                content: repr.raw.unwrap_or_default(),
                content_type: repr
                    .raw_content_type
                    .unwrap_or_else(|| "text/plain".to_string()),
            },
            BodyMode::Multipart => Body::Multipart(repr.multipart.unwrap_or_default()),
        }
    }
}

impl From<Body> for BodyRepr {
    fn from(body: Body) -> Self {
        match body {
            Body::None => BodyRepr::default(),
            Body::Json(json) => BodyRepr {
                mode: BodyMode::Json,
                json: Some(json),
                ..Default::default()
            },
            Body::Form(form) => BodyRepr {
                mode: BodyMode::Form,
                form: Some(form),
                ..Default::default()
            },
            Body::Raw {
                content,
                content_type,
            } => BodyRepr {
                mode: BodyMode::Raw,
                raw: Some(content),
                raw_content_type: Some(content_type),
                ..Default::default()
            },
            Body::Multipart(parts) => BodyRepr {
                mode: BodyMode::Multipart,
                multipart: Some(parts),
                ..Default::default()
            },
        }
    }
}

/// Authentication scheme selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    None,
    Basic,
    Bearer,
}

/// Authentication descriptor. Fields outside the active type stay
/// resident so switching types does not lose input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSpec {
    #[serde(rename = "type")]
    pub auth_type: AuthType,
    pub username: String,
    pub password: String,
    pub token: String,
}

/// The canonical request aggregate: the single shape read by the URL
/// builder, the curl serializer, the persistence adapter, and the
/// transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestSpec {
    pub url: String,
    pub method: Method,
    pub headers: KvList,
    pub query_params: KvList,
    pub body: Body,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthSpec>,
}

/// Editable composition state. Header and query rows keep their empty
/// placeholder entries, and all three body drafts (json text, raw text,
/// form rows) stay resident regardless of the selected mode.
#[derive(Debug, Clone)]
pub struct RequestDraft {
    method: Method,
    url: String,
    headers: KvList,
    query_params: KvList,
    body_mode: BodyMode,
    body_json: String,
    body_raw: String,
    body_form: KvList,
    auth: AuthSpec,
}

impl RequestDraft {
    pub fn new() -> Self {
        let mut query_params = KvList::new();
        query_params.append();
        let mut body_form = KvList::new();
        body_form.append();

        Self {
            method: Method::Get,
            url: "https://httpbin.org/get".to_string(),
            headers: KvList::from_pairs([("Accept", "application/json")]),
            query_params,
            body_mode: BodyMode::None,
            body_json: "{\n  \"a\": 1\n}".to_string(),
            body_raw: String::new(),
            body_form,
            auth: AuthSpec::default(),
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn headers(&self) -> &KvList {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut KvList {
        &mut self.headers
    }

    pub fn query_params(&self) -> &KvList {
        &self.query_params
    }

    pub fn query_params_mut(&mut self) -> &mut KvList {
        &mut self.query_params
    }

    pub fn body_mode(&self) -> BodyMode {
        self.body_mode
    }

    /// Switch the active body mode. Inactive drafts are kept as typed.
    pub fn set_body_mode(&mut self, mode: BodyMode) {
        self.body_mode = mode;
    }

    pub fn body_json(&self) -> &str {
        &self.body_json
    }

    pub fn set_body_json(&mut self, text: impl Into<String>) {
        self.body_json = text.into();
    }

    pub fn body_raw(&self) -> &str {
        &self.body_raw
    }

    pub fn set_body_raw(&mut self, text: impl Into<String>) {
        self.body_raw = text.into();
    }

    pub fn body_form(&self) -> &KvList {
        &self.body_form
    }

    pub fn body_form_mut(&mut self) -> &mut KvList {
        &mut self.body_form
    }

    pub fn auth(&self) -> &AuthSpec {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut AuthSpec {
        &mut self.auth
    }

    /// Re-indent the json draft; unparseable text is left as typed
    pub fn beautify_json_draft(&mut self) {
        self.body_json = crate::format::beautify(&self.body_json);
    }

    /// Compact the json draft; unparseable text is left as typed
    pub fn minify_json_draft(&mut self) {
        self.body_json = crate::format::minify(&self.body_json);
    }

    /// Derive the canonical spec. Unnamed rows are filtered out here, not
    /// in the stored lists; an empty json draft reads as `{}` and an
    /// unparseable one as an absent payload.
    pub fn spec(&self) -> RequestSpec {
        let body = match self.body_mode {
            BodyMode::None => Body::None,
            BodyMode::Json => {
                let text = if self.body_json.is_empty() {
                    "{}"
                } else {
                    self.body_json.as_str()
                };
                Body::Json(serde_json::from_str(text).unwrap_or(Value::Null))
            }
            BodyMode::Form => Body::Form(self.body_form.active_entries().cloned().collect()),
            BodyMode::Raw => Body::Raw {
                content: self.body_raw.clone(),
                content_type: "text/plain".to_string(),
            },
            BodyMode::Multipart => Body::Multipart(Vec::new()),
        };

        RequestSpec {
            url: self.url.clone(),
            method: self.method,
            headers: self.headers.active_entries().cloned().collect(),
            query_params: self.query_params.active_entries().cloned().collect(),
            body,
            auth: Some(self.auth.clone()),
        }
    }

    /// Replace the draft with an imported or restored spec. Drafts for
    /// modes the spec does not carry are reset to their defaults.
    pub fn apply(&mut self, spec: &RequestSpec) {
        self.method = spec.method;
        self.url = spec.url.clone();
        self.headers = spec.headers.clone();
        self.query_params = spec.query_params.clone();
        self.body_mode = spec.body.mode();

        self.body_json = "{}".to_string();
        self.body_raw = String::new();
        self.body_form = KvList::new();
        self.body_form.append();

        match &spec.body {
            Body::Json(json) if !json.is_null() => {
                self.body_json =
                    serde_json::to_string_pretty(json).unwrap_or_else(|_| "{}".to_string());
            }
            Body::Raw { content, .. } => {
                self.body_raw = content.clone();
            }
            Body::Form(form) if !form.is_empty() => {
                self.body_form = form.clone();
            }
            _ => {}
        }

        self.auth = spec.auth.clone().unwrap_or_default();
    }
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self::new()
    }
}
