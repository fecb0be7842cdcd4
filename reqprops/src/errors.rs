//! Error types for property bag operations.
//!
//! Every failure is a caller mistake: a stage wrote a key twice, read a key
//! nobody wrote, or handed over a payload that does not fit. None of them are
//! transient, so none of them carry retry information.

use std::collections::HashMap;
use thiserror::Error;

/// The main error type for reqprops operations.
#[derive(Debug, Clone, Error)]
pub enum PropsError {
    /// A key was written twice on the same request.
    #[error("{0}")]
    DuplicateKey(#[from] DuplicateKeyError),

    /// A key was read before anything was written under it.
    #[error("{0}")]
    MissingKey(#[from] MissingKeyError),

    /// A write was attempted with an unusable key.
    #[error("{0}")]
    InvalidKey(#[from] InvalidKeyError),

    /// A payload could not be converted to or from its stored form.
    #[error("{0}")]
    Payload(#[from] PayloadError),
}

impl PropsError {
    /// Returns the stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateKey(_) => DuplicateKeyError::CODE,
            Self::MissingKey(_) => MissingKeyError::CODE,
            Self::InvalidKey(_) => InvalidKeyError::CODE,
            Self::Payload(_) => PayloadError::CODE,
        }
    }

    /// Returns the key the failed operation was called with.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::DuplicateKey(e) => &e.key,
            Self::MissingKey(e) => &e.key,
            Self::InvalidKey(e) => &e.key,
            Self::Payload(e) => &e.key,
        }
    }

    /// Gets a hint for fixing the error.
    #[must_use]
    pub fn fix_hint(&self) -> &'static str {
        match self {
            Self::DuplicateKey(_) => {
                "Each stage may write a key at most once per request. \
                 Use a different key or make sure the stage runs only once."
            }
            Self::MissingKey(_) => {
                "Make sure the stage that writes this key runs earlier in the \
                 pipeline and that both sides use the same key."
            }
            Self::InvalidKey(_) => "Use a non-empty key, typically the stage name.",
            Self::Payload(_) => {
                "Read the key with the same type that was used to write it."
            }
        }
    }

    /// Returns true for `DuplicateKey`.
    #[must_use]
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }

    /// Returns true for `MissingKey`.
    #[must_use]
    pub fn is_missing_key(&self) -> bool {
        matches!(self, Self::MissingKey(_))
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("code".to_string(), serde_json::json!(self.code()));
        map.insert("key".to_string(), serde_json::json!(self.key()));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map.insert("fix_hint".to_string(), serde_json::json!(self.fix_hint()));
        map
    }
}

/// Error raised when writing to an existing key in a property bag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Duplicate key: '{key}' was already attached to this request")]
pub struct DuplicateKeyError {
    /// The conflicting key.
    pub key: String,
}

impl DuplicateKeyError {
    /// Stable error code.
    pub const CODE: &'static str = "PROPS-DUPLICATE-KEY";

    /// Creates a new duplicate key error.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Error raised when reading a key that was never written.
///
/// A request that never had anything written to it reports the same error
/// as one whose bag lacks this particular key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing key: nothing was attached to this request under '{key}'")]
pub struct MissingKeyError {
    /// The requested key.
    pub key: String,
}

impl MissingKeyError {
    /// Stable error code.
    pub const CODE: &'static str = "PROPS-MISSING-KEY";

    /// Creates a new missing key error.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Error raised when a write uses an empty key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid key '{key}': keys must be non-empty")]
pub struct InvalidKeyError {
    /// The rejected key.
    pub key: String,
}

impl InvalidKeyError {
    /// Stable error code.
    pub const CODE: &'static str = "PROPS-INVALID-KEY";

    /// Creates a new invalid key error.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Error raised when a payload cannot be stored or does not match the type
/// it is read as.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Payload error for key '{key}': {message}")]
pub struct PayloadError {
    /// The key being written or read.
    pub key: String,
    /// The underlying serde message.
    pub message: String,
}

impl PayloadError {
    /// Stable error code.
    pub const CODE: &'static str = "PROPS-PAYLOAD";

    /// Creates a new payload error.
    #[must_use]
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }

    pub(crate) fn from_serde(key: &str, err: &serde_json::Error) -> Self {
        Self::new(key, err.to_string())
    }
}
