//! # Requill - HTTP Request Composer
//!
//! A library and thin CLI for composing an HTTP request (method, URL,
//! query parameters, headers, body, authentication), deriving equivalent
//! textual forms (a curl command line, pretty/minified body text),
//! persisting and restoring the composition, exchanging it as a portable
//! JSON file, and handing it to an HTTP transport for the actual send.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  derives   ┌────────────────────────┐
//! │ RequestDraft │───────────►│ RequestSpec (canonical)│
//! │ (editable)   │            └───────────┬────────────┘
//! └──────────────┘                        │
//!        ▲                 ┌──────────────┼──────────────┐
//!        │ apply           ▼              ▼              ▼
//!   ┌────┴─────┐      build_url        to_curl      TransportService
//!   │ persist  │   (query string)  (shell command)   (actual send)
//!   └──────────┘
//! ```
//!
//! The draft keeps every body-mode payload resident so switching modes
//! never loses input; the canonical spec is a pure derivation and is the
//! shape used for both the last-request store and portable file export.

pub mod cmd_args;
pub mod config;
pub mod format;
pub mod persist;
pub mod spec;
pub mod transport;

// Re-export main types for easy access
pub use spec::kv::{KeyValue, KvField, KvList};
pub use spec::model::{AuthSpec, AuthType, Body, BodyMode, Method, RequestDraft, RequestSpec};
