//! Test assertions for props operations.

use crate::context::PropsContext;
use crate::errors::PropsError;
use crate::props::get_all_props_value;

/// Asserts that the result failed with `DuplicateKey` for `key`.
pub fn assert_duplicate_key<T: std::fmt::Debug>(result: &Result<T, PropsError>, key: &str) {
    match result {
        Err(PropsError::DuplicateKey(err)) => assert_eq!(
            err.key, key,
            "Expected duplicate key '{}', got '{}'",
            key, err.key
        ),
        other => panic!("Expected DuplicateKey('{key}'), got: {other:?}"),
    }
}

/// Asserts that the result failed with `MissingKey` for `key`.
pub fn assert_missing_key<T: std::fmt::Debug>(result: &Result<T, PropsError>, key: &str) {
    match result {
        Err(PropsError::MissingKey(err)) => assert_eq!(
            err.key, key,
            "Expected missing key '{}', got '{}'",
            key, err.key
        ),
        other => panic!("Expected MissingKey('{key}'), got: {other:?}"),
    }
}

/// Asserts that the request carries a payload under `key`.
pub fn assert_has_props<C: PropsContext + ?Sized>(ctx: &C, key: &str) {
    assert!(
        ctx.props().is_some_and(|bag| bag.contains_key(key)),
        "Expected props under '{}', but found keys: {:?}",
        key,
        ctx.props().map(crate::context::PropertyBag::keys).unwrap_or_default()
    );
}

/// Asserts that the request carries exactly `expected`, a JSON object.
pub fn assert_props_eq<C: PropsContext + ?Sized>(ctx: &C, expected: &serde_json::Value) {
    let actual = get_all_props_value(ctx);
    assert_eq!(
        &actual, expected,
        "Props mismatch.\n  expected: {expected}\n  actual:   {actual}"
    );
}
