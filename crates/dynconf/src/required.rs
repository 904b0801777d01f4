//! Fail-fast accessors for mandatory configuration keys.
//!
//! These are thin adapters over the recoverable tier in [`store`](crate::store):
//! the core lookup and coercion logic returns errors and stays testable,
//! while this layer collapses every failure into a logged diagnostic and a
//! non-zero process exit. Intended for settings an application cannot run
//! without, checked once at startup.

use serde_json::Value;
use tracing::error;

use crate::error::ConfigError;
use crate::store::Config;

/// Logs the mandatory-key diagnostic and terminates the process.
fn fatal(key: &str, err: &ConfigError) -> ! {
    error!("configuration parameter {key:?} is mandatory: {err}");
    std::process::exit(1);
}

impl Config {
    /// Returns the value stored under `key`, terminating the process if
    /// the key is absent.
    pub fn require(&self, key: &str) -> &Value {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => fatal(key, &err),
        }
    }

    /// Returns the string stored under `key`, terminating the process if
    /// the key is absent or the value is not a string.
    pub fn require_str(&self, key: &str) -> &str {
        match self.get_str(key) {
            Ok(value) => value,
            Err(err) => fatal(key, &err),
        }
    }

    /// Returns the number stored under `key` as an `i64`, terminating the
    /// process if the key is absent or coercion fails. Coercion rules are
    /// those of [`Config::get_i64`].
    pub fn require_i64(&self, key: &str) -> i64 {
        match self.get_i64(key) {
            Ok(value) => value,
            Err(err) => fatal(key, &err),
        }
    }

    /// Returns the number stored under `key` as a `u64`, terminating the
    /// process if the key is absent or coercion fails. Coercion rules are
    /// those of [`Config::get_u64`].
    pub fn require_u64(&self, key: &str) -> u64 {
        match self.get_u64(key) {
            Ok(value) => value,
            Err(err) => fatal(key, &err),
        }
    }

    /// Returns the string array stored under `key`, terminating the
    /// process if the key is absent, the value is not an array, or any
    /// element is not a string.
    pub fn require_str_vec(&self, key: &str) -> Vec<String> {
        match self.get_str_vec(key) {
            Ok(value) => value,
            Err(err) => fatal(key, &err),
        }
    }

    /// Returns the `i64` array stored under `key`, terminating the process
    /// if the key is absent or any element fails coercion.
    pub fn require_i64_vec(&self, key: &str) -> Vec<i64> {
        match self.get_i64_vec(key) {
            Ok(value) => value,
            Err(err) => fatal(key, &err),
        }
    }

    /// Returns the `u64` array stored under `key`, terminating the process
    /// if the key is absent or any element fails coercion.
    pub fn require_u64_vec(&self, key: &str) -> Vec<u64> {
        match self.get_u64_vec(key) {
            Ok(value) => value,
            Err(err) => fatal(key, &err),
        }
    }

    /// Returns the nested object stored under `key` as a new [`Config`],
    /// terminating the process if the key is absent or the value is not
    /// an object.
    pub fn require_subconfig(&self, key: &str) -> Config {
        match self.get_subconfig(key) {
            Ok(value) => value,
            Err(err) => fatal(key, &err),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
