//! Write-once property bags.

use crate::config::PropsConfig;
use crate::errors::{DuplicateKeyError, InvalidKeyError, MissingKeyError, PayloadError, PropsError};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// A per-request mapping from key to structured payload.
///
/// Writing to an existing key raises a `DuplicateKeyError`. Entries are never
/// overwritten or removed; the bag is dropped together with the request that
/// owns it.
#[derive(Debug, Clone, Default)]
pub struct PropertyBag {
    data: HashMap<String, serde_json::Value>,
    trace_payloads: bool,
}

impl PropertyBag {
    /// Creates a new empty property bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty bag sized and configured from `config`.
    #[must_use]
    pub fn with_config(config: &PropsConfig) -> Self {
        Self {
            data: HashMap::with_capacity(config.initial_capacity),
            trace_payloads: config.trace_payloads,
        }
    }

    /// Whether payload contents may be logged.
    #[must_use]
    pub fn trace_payloads(&self) -> bool {
        self.trace_payloads
    }

    /// Attaches a payload under `key`.
    ///
    /// The key is checked before the payload is converted, so a second write
    /// to the same key fails with `DuplicateKey` whatever the new payload is.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if `key` is empty.
    /// - `DuplicateKey` if `key` already exists; the stored payload is kept.
    /// - `Payload` if `payload` cannot be converted to a JSON value.
    pub fn insert<T>(&mut self, key: impl Into<String>, payload: &T) -> Result<(), PropsError>
    where
        T: Serialize + ?Sized,
    {
        let key = key.into();
        self.check_writable(&key)?;

        let value =
            serde_json::to_value(payload).map_err(|e| PayloadError::from_serde(&key, &e))?;
        self.data.insert(key, value);
        Ok(())
    }

    /// Attaches an already-structured payload under `key`.
    ///
    /// # Errors
    ///
    /// Same as [`PropertyBag::insert`], minus the payload conversion.
    pub fn insert_value(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<(), PropsError> {
        let key = key.into();
        self.check_writable(&key)?;
        self.data.insert(key, value);
        Ok(())
    }

    fn check_writable(&self, key: &str) -> Result<(), PropsError> {
        if key.is_empty() {
            return Err(InvalidKeyError::new(key).into());
        }
        if self.data.contains_key(key) {
            return Err(DuplicateKeyError::new(key).into());
        }
        Ok(())
    }

    /// Returns the stored payload exactly as written.
    ///
    /// # Errors
    ///
    /// Returns `MissingKeyError` if nothing was written under `key`.
    pub fn get_value(&self, key: &str) -> Result<&serde_json::Value, MissingKeyError> {
        self.data.get(key).ok_or_else(|| MissingKeyError::new(key))
    }

    /// Reads the payload under `key` as a `T`.
    ///
    /// # Errors
    ///
    /// - `MissingKey` if nothing was written under `key`.
    /// - `Payload` if the stored record does not deserialize into `T`.
    pub fn get<T>(&self, key: &str) -> Result<T, PropsError>
    where
        T: DeserializeOwned,
    {
        let value = self.get_value(key)?;
        T::deserialize(value).map_err(|e| PayloadError::from_serde(key, &e).into())
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns a copy of all entries.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        self.data.clone()
    }

    /// Returns a copy of all entries as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.data
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns all keys.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }
}

/// A property bag behind a lock, for hosts that hand one request to several
/// tasks at once.
///
/// Clones share the same bag. Every operation takes the lock for its own
/// duration only, so a check-then-insert race between two writers still ends
/// with exactly one `DuplicateKeyError`.
#[derive(Debug, Clone, Default)]
pub struct SharedPropertyBag {
    inner: Arc<RwLock<PropertyBag>>,
}

impl SharedPropertyBag {
    /// Creates a new empty shared bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing bag.
    #[must_use]
    pub fn from_bag(bag: PropertyBag) -> Self {
        Self {
            inner: Arc::new(RwLock::new(bag)),
        }
    }

    /// Attaches a payload under `key`.
    ///
    /// # Errors
    ///
    /// See [`PropertyBag::insert`].
    pub fn insert<T>(&self, key: impl Into<String>, payload: &T) -> Result<(), PropsError>
    where
        T: Serialize + ?Sized,
    {
        self.inner.write().insert(key, payload)
    }

    /// Returns a copy of the stored payload.
    ///
    /// # Errors
    ///
    /// Returns `MissingKeyError` if nothing was written under `key`.
    pub fn get_value(&self, key: &str) -> Result<serde_json::Value, MissingKeyError> {
        self.inner.read().get_value(key).cloned()
    }

    /// Reads the payload under `key` as a `T`.
    ///
    /// # Errors
    ///
    /// See [`PropertyBag::get`].
    pub fn get<T>(&self, key: &str) -> Result<T, PropsError>
    where
        T: DeserializeOwned,
    {
        self.inner.read().get(key)
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }

    /// Returns a copy of all entries.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        self.inner.read().to_dict()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns true if the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns a point-in-time copy of the bag.
    #[must_use]
    pub fn snapshot(&self) -> PropertyBag {
        self.inner.read().clone()
    }
}
