//! Configuration constants and utilities for requill
//!
//! This module decides where the last-request state file lives. The
//! default sits under the home directory and can be overridden through
//! an environment variable.

use std::path::PathBuf;

/// Default path for the last-request state file
pub const DEFAULT_STATE_PATH: &str = "~/.requill/last_request.json";

/// Environment variable name for overriding the state file path
pub const STATE_PATH_ENV_VAR: &str = "REQUILL_STATE_PATH";

/// Get the state file path, checking the environment variable first and
/// falling back to the default, with `~` expanded either way
pub fn get_state_path() -> PathBuf {
    let raw = std::env::var_os(STATE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_STATE_PATH.to_string());
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}
