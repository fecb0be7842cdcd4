//! Testing utilities for props pipelines.
//!
//! This module provides:
//! - A request builder with props already attached
//! - Mock middleware that attach fixed props or record what they saw
//! - Assertions for props errors and bag contents

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{
    assert_duplicate_key, assert_has_props, assert_missing_key, assert_props_eq,
};
pub use fixtures::TestRequest;
pub use mocks::{AttachMiddleware, RecordedCall, RecordingMiddleware};
