//! A minimal in-process middleware pipeline.
//!
//! Middleware run in registration order against one [`RequestContext`],
//! attaching and reading props as they go, and a terminal [`Handler`] turns
//! the request into a [`Response`]. The first error stops the chain and is
//! reported as a 500 response.
//!
//! [`RequestContext`]: crate::context::RequestContext

mod chain;
mod response;

pub use chain::{FnMiddleware, Handler, Middleware, MiddlewareChain};
pub use response::Response;
