//! The three request-scoped property operations.
//!
//! A stage attaches what it computed with [`add_props`], later stages and
//! the final handler read it back with [`get_props`], and [`get_all_props`]
//! returns everything attached so far.
//!
//! ```
//! use reqprops::{add_props, get_all_props, get_props, RequestContext};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct AttachRole {
//!     role: String,
//! }
//!
//! let mut req = RequestContext::new("GET", "/");
//! add_props(&mut req, &AttachRole { role: "admin".into() }, "attachRole")?;
//!
//! let AttachRole { role } = get_props(&req, "attachRole")?;
//! assert_eq!(role, "admin");
//! assert_eq!(get_all_props(&req).len(), 1);
//! # Ok::<(), reqprops::PropsError>(())
//! ```

use crate::context::{PropertyBag, PropsContext};
use crate::errors::{DuplicateKeyError, InvalidKeyError, MissingKeyError, PayloadError, PropsError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

/// Attaches `payload` to the request under `key`.
///
/// # Errors
///
/// - `DuplicateKey` if a stage already attached something under `key`.
/// - `InvalidKey` if `key` is empty.
/// - `Payload` if `payload` cannot be converted to a JSON value.
pub fn add_props<C, T>(ctx: &mut C, payload: &T, key: &str) -> Result<(), PropsError>
where
    C: PropsContext + ?Sized,
    T: Serialize + ?Sized,
{
    let request_id = ctx.request_id();

    // The bag is only created once the write is known to succeed.
    let result = prepare_value(ctx.props(), key, payload)
        .and_then(|value| ctx.props_mut().insert_value(key, value));

    match result {
        Ok(()) => {
            let traced = ctx
                .props()
                .filter(|bag| bag.trace_payloads())
                .and_then(|bag| bag.get_value(key).ok());
            if let Some(payload) = traced {
                tracing::debug!(
                    request_id = ?request_id,
                    key = %key,
                    payload = ?payload,
                    "props attached"
                );
            } else {
                tracing::debug!(request_id = ?request_id, key = %key, "props attached");
            }
            Ok(())
        }
        Err(err) => {
            tracing::warn!(
                request_id = ?request_id,
                key = %key,
                code = err.code(),
                error = %err,
                "props rejected"
            );
            Err(err)
        }
    }
}

/// Validates the key against the current bag and converts the payload.
fn prepare_value<T>(
    bag: Option<&PropertyBag>,
    key: &str,
    payload: &T,
) -> Result<serde_json::Value, PropsError>
where
    T: Serialize + ?Sized,
{
    if key.is_empty() {
        return Err(InvalidKeyError::new(key).into());
    }
    if bag.is_some_and(|bag| bag.contains_key(key)) {
        return Err(DuplicateKeyError::new(key).into());
    }
    serde_json::to_value(payload).map_err(|e| PayloadError::from_serde(key, &e).into())
}

/// Reads the payload attached under `key` as a `T`.
///
/// `T` only has to describe the stored record; reading the same key twice
/// yields equal values.
///
/// # Errors
///
/// - `MissingKey` if nothing was attached under `key`, including when nothing
///   was attached to the request at all.
/// - `Payload` if the stored record does not deserialize into `T`.
pub fn get_props<T, C>(ctx: &C, key: &str) -> Result<T, PropsError>
where
    C: PropsContext + ?Sized,
    T: DeserializeOwned,
{
    let result = match ctx.props() {
        Some(bag) => bag.get(key),
        None => Err(MissingKeyError::new(key).into()),
    };

    if let Err(ref err) = result {
        tracing::warn!(
            request_id = ?ctx.request_id(),
            key = %key,
            code = err.code(),
            error = %err,
            "props lookup failed"
        );
    }
    result
}

/// Returns the payload attached under `key` without converting it.
///
/// # Errors
///
/// Returns `MissingKeyError` if nothing was attached under `key`.
pub fn get_raw_props<'a, C>(ctx: &'a C, key: &str) -> Result<&'a serde_json::Value, MissingKeyError>
where
    C: PropsContext + ?Sized,
{
    ctx.props()
        .ok_or_else(|| MissingKeyError::new(key))
        .and_then(|bag| bag.get_value(key))
}

/// Returns a copy of every payload attached to the request so far.
///
/// Never fails: a request with nothing attached yields an empty map.
#[must_use]
pub fn get_all_props<C>(ctx: &C) -> HashMap<String, serde_json::Value>
where
    C: PropsContext + ?Sized,
{
    ctx.props().map(|bag| bag.to_dict()).unwrap_or_default()
}

/// Same as [`get_all_props`], as a single JSON object.
#[must_use]
pub fn get_all_props_value<C>(ctx: &C) -> serde_json::Value
where
    C: PropsContext + ?Sized,
{
    ctx.props()
        .map_or_else(|| serde_json::json!({}), |bag| bag.to_value())
}
