//! # dynconf
//!
//! A dynamically-typed configuration container backed by a JSON document.
//!
//! A [`Config`] is a flat mapping from string keys to JSON values, loaded
//! from a byte buffer or a file and serialized back without loss. Values
//! are looked up through two tiers of accessors:
//!
//! - **Recoverable** (`get`, `get_str`, `get_i64`, ...) – every expected
//!   failure (missing key, wrong dynamic type, unreadable file) comes back
//!   as a [`ConfigError`] for the caller to handle.
//! - **Fail-fast** (`require`, `require_str`, ...) – for mandatory settings
//!   checked once at startup. Any failure logs a diagnostic naming the key
//!   and terminates the process with a non-zero status.
//!
//! Nested JSON objects are exposed as sub-configs with the same operation
//! set, so a configuration tree can be walked one level at a time:
//!
//! ```rust
//! use dynconf::Config;
//!
//! let cfg = Config::from_str(r#"{"listen": {"port": 8080}}"#).unwrap();
//! let listen = cfg.get_subconfig("listen").unwrap();
//! assert_eq!(listen.get_i64("port").unwrap(), 8080);
//! ```
//!
//! The container performs no schema validation and no internal locking;
//! callers sharing a `Config` across threads must coordinate mutation
//! externally.

pub mod error;
pub mod store;

mod required;

pub use error::ConfigError;
pub use store::Config;
