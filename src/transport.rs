//! # Transport Service
//!
//! Executes a composed request over HTTP and shapes the response for
//! display. Retry, redirect, and timeout policy stay with the underlying
//! client; this module only translates between the request spec and the
//! wire.

use std::time::Instant;

use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::spec::kv::KeyValue;
use crate::spec::model::{AuthType, Body, RequestSpec};
use crate::spec::url::build_url;

/// Response descriptor handed back to the caller. Binary bodies are
/// base64-encoded text with `body_is_binary` set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSpec {
    pub status: u16,
    pub status_text: String,
    pub duration_ms: u64,
    pub size_bytes: u64,
    pub headers: Vec<KeyValue>,
    pub body: String,
    pub body_is_binary: bool,
}

/// Service that performs the actual network call for a request spec
pub struct TransportService {
    client: reqwest::Client,
}

impl TransportService {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Send `spec` and wait for the shaped response
    pub async fn send(&self, spec: &RequestSpec) -> Result<ResponseSpec> {
        let url = build_url(&spec.url, &spec.query_params);
        let method = reqwest::Method::from_bytes(spec.method.as_str().as_bytes())?;

        let mut request = self
            .client
            .request(method, &url)
            .headers(build_headers(spec)?);

        // Only methods that carry a body get one on the wire
        if spec.method.allows_body() {
            request = match &spec.body {
                Body::None => request,
                Body::Json(payload) if payload.is_null() => request.json(&json!({})),
                Body::Json(payload) => request.json(payload),
                Body::Form(fields) => {
                    let pairs: Vec<(&str, &str)> = fields
                        .active_entries()
                        .map(|row| (row.name.as_str(), row.value.as_str()))
                        .collect();
                    request.form(&pairs)
                }
                Body::Raw {
                    content,
                    content_type,
                } => request
                    .header(CONTENT_TYPE, content_type.as_str())
                    .body(content.clone()),
                Body::Multipart(_) => {
                    return Err(anyhow::anyhow!("multipart bodies are not supported"))
                }
            };
        }

        tracing::debug!("sending {} {url}", spec.method);
        let start = Instant::now();
        let response = request.send().await?;

        let status = response.status();
        let headers: Vec<KeyValue> = response
            .headers()
            .iter()
            .map(|(name, value)| KeyValue::new(name.as_str(), value.to_str().unwrap_or("")))
            .collect();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let bytes = response.bytes().await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let body_is_binary = !is_text_like(&content_type);
        let body = if body_is_binary {
            BASE64.encode(&bytes)
        } else {
            String::from_utf8_lossy(&bytes).into_owned()
        };

        tracing::info!(
            "{} {url} -> {} ({duration_ms} ms, {} bytes)",
            spec.method,
            status.as_u16(),
            bytes.len()
        );

        Ok(ResponseSpec {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            duration_ms,
            size_bytes: bytes.len() as u64,
            headers,
            body,
            body_is_binary,
        })
    }
}

/// Collect the active header rows, fill in an Accept default, and apply
/// the authentication descriptor last so it wins over a typed header.
fn build_headers(spec: &RequestSpec) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for row in spec.headers.active_entries() {
        let name: HeaderName = row.name.parse()?;
        let value: HeaderValue = row.value.parse()?;
        headers.append(name, value);
    }

    if !headers.contains_key(ACCEPT) {
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    }

    if let Some(auth) = &spec.auth {
        match auth.auth_type {
            AuthType::None => {}
            AuthType::Basic => {
                let credentials = BASE64.encode(format!("{}:{}", auth.username, auth.password));
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Basic {credentials}"))?,
                );
            }
            AuthType::Bearer => {
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {}", auth.token))?,
                );
            }
        }
    }

    Ok(headers)
}

/// Content types rendered as text; everything else is base64-encoded
fn is_text_like(content_type: &str) -> bool {
    let ct = content_type.to_ascii_lowercase();
    ct.starts_with("text/")
        || ct.contains("json")
        || ct.contains("xml")
        || ct.contains("javascript")
        || ct.contains("html")
}
