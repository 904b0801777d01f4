//! The configuration container and its recoverable accessor tier.
//!
//! A [`Config`] wraps a `serde_json::Map<String, Value>`, so the dynamic
//! value type is serde_json's closed union (null, boolean, number, string,
//! array, object). Each typed accessor is a match on that union rather
//! than a runtime downcast, and nested objects are re-wrapped as `Config`
//! values without any pointer reinterpretation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ConfigError;

/// A mapping from string keys to dynamically-typed JSON values.
///
/// Created empty via [`Config::new`] or by parsing a JSON object with
/// [`Config::from_slice`] / [`Config::from_file`]. Key order is
/// irrelevant; two configs compare equal when they hold the same
/// key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(Map<String, Value>);

// ── Construction and loading ──────────────────────────────────────────────────

impl Config {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Parses `data` as a JSON document with an object at the top level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `data` is not valid JSON, and
    /// [`ConfigError::NotAnObject`] if the document root is any other
    /// JSON type (array, string, number, boolean, or null).
    pub fn from_slice(data: &[u8]) -> Result<Self, ConfigError> {
        let doc: Value = serde_json::from_slice(data).map_err(ConfigError::Parse)?;
        match doc {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ConfigError::NotAnObject(json_type_name(&other))),
        }
    }

    /// Parses a JSON object from UTF-8 text.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_slice`].
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self, ConfigError> {
        Self::from_slice(text.as_bytes())
    }

    /// Reads the file at `path` fully into memory and parses it.
    ///
    /// The file handle is scoped to the read and released before parsing
    /// starts, on success and on error alike.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read (missing,
    /// permission denied), or propagates the parse errors of
    /// [`Config::from_slice`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&data)
    }
}

// ── Serialization ─────────────────────────────────────────────────────────────

impl Config {
    /// Serializes the configuration to compact JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if a contained value is not
    /// representable. This cannot happen for values produced by parsing
    /// or by [`Config::set`] with the supported types.
    pub fn to_vec(&self) -> Result<Vec<u8>, ConfigError> {
        serde_json::to_vec(&self.0).map_err(ConfigError::Serialize)
    }

    /// Serializes the configuration to pretty-printed JSON text.
    ///
    /// # Errors
    ///
    /// Same as [`Config::to_vec`].
    pub fn to_string_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(&self.0).map_err(ConfigError::Serialize)
    }

    /// Persists the configuration to `path` as pretty-printed JSON,
    /// creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system failures or
    /// [`ConfigError::Serialize`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure directory exists before writing.
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = self.to_string_pretty()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Emits one `tracing` debug line per key/value pair, in unspecified
    /// order. Intended for operator visibility at startup.
    pub fn debug(&self) {
        for (key, value) in &self.0 {
            debug!("config[{key}] = {value}");
        }
    }
}

// ── Recoverable lookup ────────────────────────────────────────────────────────

impl Config {
    /// Returns the value stored under `key`, unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSuchKey`] if `key` is absent.
    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        self.0
            .get(key)
            .ok_or_else(|| ConfigError::NoSuchKey(key.to_string()))
    }

    /// Returns the string stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSuchKey`] if `key` is absent, or
    /// [`ConfigError::TypeMismatch`] if the value is not a string.
    pub fn get_str(&self, key: &str) -> Result<&str, ConfigError> {
        match self.get(key)? {
            Value::String(s) => Ok(s),
            other => Err(mismatch(key, "string", other)),
        }
    }

    /// Returns the number stored under `key` as an `i64`.
    ///
    /// Integral numbers pass through exactly. Fractional numbers truncate
    /// toward zero (`3.9` becomes `3`, `-3.9` becomes `-3`) because JSON
    /// parsers may surface integral literals as floats; callers must not
    /// rely on fractional inputs here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSuchKey`] if `key` is absent, or
    /// [`ConfigError::TypeMismatch`] if the value is not a number or does
    /// not fit in an `i64`.
    pub fn get_i64(&self, key: &str) -> Result<i64, ConfigError> {
        coerce_i64(key, self.get(key)?)
    }

    /// Returns the number stored under `key` as a `u64`.
    ///
    /// Same coercion rules as [`Config::get_i64`]; negative values do not
    /// fit and are reported as a type mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSuchKey`] if `key` is absent, or
    /// [`ConfigError::TypeMismatch`] if the value is not a number or does
    /// not fit in a `u64`.
    pub fn get_u64(&self, key: &str) -> Result<u64, ConfigError> {
        coerce_u64(key, self.get(key)?)
    }

    /// Returns the nested object stored under `key` as a new [`Config`].
    ///
    /// The sub-config is an independent copy; mutating it does not affect
    /// this container.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSuchKey`] if `key` is absent, or
    /// [`ConfigError::TypeMismatch`] if the value is not an object.
    pub fn get_subconfig(&self, key: &str) -> Result<Config, ConfigError> {
        match self.get(key)? {
            Value::Object(map) => Ok(Config(map.clone())),
            other => Err(mismatch(key, "object", other)),
        }
    }

    /// Returns the array stored under `key` with every element coerced to
    /// an owned `String`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSuchKey`] if `key` is absent, or
    /// [`ConfigError::TypeMismatch`] if the value is not an array or any
    /// element is not a string.
    pub fn get_str_vec(&self, key: &str) -> Result<Vec<String>, ConfigError> {
        self.get_array(key)?
            .iter()
            .map(|element| match element {
                Value::String(s) => Ok(s.clone()),
                other => Err(mismatch(key, "array of strings", other)),
            })
            .collect()
    }

    /// Returns the array stored under `key` with every element coerced to
    /// `i64` under the rules of [`Config::get_i64`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSuchKey`] if `key` is absent, or
    /// [`ConfigError::TypeMismatch`] if the value is not an array or any
    /// element fails coercion.
    pub fn get_i64_vec(&self, key: &str) -> Result<Vec<i64>, ConfigError> {
        self.get_array(key)?
            .iter()
            .map(|element| coerce_i64(key, element))
            .collect()
    }

    /// Returns the array stored under `key` with every element coerced to
    /// `u64` under the rules of [`Config::get_u64`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSuchKey`] if `key` is absent, or
    /// [`ConfigError::TypeMismatch`] if the value is not an array or any
    /// element fails coercion.
    pub fn get_u64_vec(&self, key: &str) -> Result<Vec<u64>, ConfigError> {
        self.get_array(key)?
            .iter()
            .map(|element| coerce_u64(key, element))
            .collect()
    }

    fn get_array(&self, key: &str) -> Result<&[Value], ConfigError> {
        match self.get(key)? {
            Value::Array(items) => Ok(items),
            other => Err(mismatch(key, "array", other)),
        }
    }
}

// ── Mutation and inspection ───────────────────────────────────────────────────

impl Config {
    /// Inserts or overwrites the entry under `key`. Accepts any value
    /// convertible to a JSON value (numbers, strings, booleans, vectors,
    /// nested `serde_json::Value` trees). No validation is performed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Removes the entry under `key`, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the container holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the top-level keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

// ── Coercion helpers ──────────────────────────────────────────────────────────

fn coerce_i64(key: &str, value: &Value) -> Result<i64, ConfigError> {
    let number = match value {
        Value::Number(n) => n,
        other => return Err(mismatch(key, "number", other)),
    };
    if let Some(i) = number.as_i64() {
        return Ok(i);
    }
    // u64 beyond i64::MAX has no i64 representation.
    if number.is_u64() {
        return Err(range_mismatch(key, "number in i64 range"));
    }
    match number.as_f64() {
        Some(f) if f >= i64::MIN as f64 && f <= i64::MAX as f64 => Ok(f.trunc() as i64),
        _ => Err(range_mismatch(key, "number in i64 range")),
    }
}

fn coerce_u64(key: &str, value: &Value) -> Result<u64, ConfigError> {
    let number = match value {
        Value::Number(n) => n,
        other => return Err(mismatch(key, "number", other)),
    };
    if let Some(u) = number.as_u64() {
        return Ok(u);
    }
    if number.is_i64() {
        // Only negative i64s fail the as_u64 path above.
        return Err(range_mismatch(key, "number in u64 range"));
    }
    match number.as_f64() {
        Some(f) if f >= 0.0 && f <= u64::MAX as f64 => Ok(f.trunc() as u64),
        _ => Err(range_mismatch(key, "number in u64 range")),
    }
}

fn mismatch(key: &str, expected: &'static str, found: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: json_type_name(found),
    }
}

fn range_mismatch(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: "number",
    }
}

/// Human-readable name of a JSON value's dynamic type, used in
/// type-mismatch diagnostics.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
