//! Mock middleware for testing.

use crate::context::{PropsContext, RequestContext};
use crate::errors::PropsError;
use crate::middleware::Middleware;
use crate::props::add_props;
use async_trait::async_trait;
use parking_lot::Mutex;

/// A middleware that attaches a fixed payload under its own name.
#[derive(Debug, Clone)]
pub struct AttachMiddleware {
    name: String,
    payload: serde_json::Value,
}

impl AttachMiddleware {
    /// Creates a middleware attaching `payload` under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

#[async_trait]
impl Middleware for AttachMiddleware {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, ctx: &mut RequestContext) -> Result<(), PropsError> {
        add_props(ctx, &self.payload, &self.name)
    }
}

/// A middleware that records the keys present each time it runs.
#[derive(Debug)]
pub struct RecordingMiddleware {
    name: String,
    calls: Mutex<Vec<RecordedCall>>,
}

/// A recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The request ID.
    pub request_id: uuid::Uuid,
    /// Keys present in the bag when the middleware ran, sorted.
    pub keys: Vec<String>,
}

impl RecordingMiddleware {
    /// Creates a new recording middleware.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns all recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Returns the number of calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Middleware for RecordingMiddleware {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, ctx: &mut RequestContext) -> Result<(), PropsError> {
        let mut keys = ctx.props().map(crate::context::PropertyBag::keys).unwrap_or_default();
        keys.sort();
        self.calls.lock().push(RecordedCall {
            request_id: ctx.id(),
            keys,
        });
        Ok(())
    }
}
