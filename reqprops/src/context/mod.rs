//! Request contexts and the property bags they carry.
//!
//! This module provides:
//! - Write-once property bags scoped to one request
//! - A lock-guarded bag for requests shared between tasks
//! - A trait for host request types that embed a bag

mod bags;
#[cfg(test)]
mod context_tests;
mod request;

pub use bags::{PropertyBag, SharedPropertyBag};
pub use request::{PropsContext, RequestContext};
