//! # Request Specification
//!
//! The request aggregate and its deterministic textual transformations:
//! key/value rows, the canonical spec model, URL building, and the curl
//! command-line serializer.

pub mod curl;
pub mod kv;
pub mod model;
pub mod url;
