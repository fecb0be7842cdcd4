//! Ordered middleware execution.

use super::Response;
use crate::context::RequestContext;
use crate::errors::PropsError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::Instrument;

/// A pipeline step that may attach props to, or read props from, a request.
#[async_trait]
pub trait Middleware: Send + Sync + Debug {
    /// Returns the name of the middleware.
    ///
    /// By convention this is also the key it attaches its props under.
    fn name(&self) -> &str;

    /// Processes the request.
    ///
    /// Returning an error stops the chain.
    async fn handle(&self, ctx: &mut RequestContext) -> Result<(), PropsError>;
}

/// A simple function-based middleware.
pub struct FnMiddleware<F>
where
    F: Fn(&mut RequestContext) -> Result<(), PropsError> + Send + Sync,
{
    name: String,
    func: F,
}

impl<F> FnMiddleware<F>
where
    F: Fn(&mut RequestContext) -> Result<(), PropsError> + Send + Sync,
{
    /// Creates a new function-based middleware.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Debug for FnMiddleware<F>
where
    F: Fn(&mut RequestContext) -> Result<(), PropsError> + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnMiddleware")
            .field("name", &self.name)
            .finish()
    }
}

#[async_trait]
impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&mut RequestContext) -> Result<(), PropsError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, ctx: &mut RequestContext) -> Result<(), PropsError> {
        (self.func)(ctx)
    }
}

/// The terminal step of a pipeline.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Builds the response once every middleware has run.
    async fn call(&self, ctx: &RequestContext) -> Result<Response, PropsError>;
}

#[async_trait]
impl<F> Handler for F
where
    F: Fn(&RequestContext) -> Result<Response, PropsError> + Send + Sync,
{
    async fn call(&self, ctx: &RequestContext) -> Result<Response, PropsError> {
        self(ctx)
    }
}

/// A chain of middleware run in registration order.
#[derive(Debug, Default, Clone)]
pub struct MiddlewareChain {
    middleware: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    /// Creates a new empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a middleware to the end of the chain.
    pub fn add(&mut self, middleware: Arc<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Adds a middleware and returns the chain.
    #[must_use]
    pub fn with(mut self, middleware: impl Middleware + 'static) -> Self {
        self.add(Arc::new(middleware));
        self
    }

    /// Returns the middleware names in execution order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.middleware.iter().map(|m| m.name()).collect()
    }

    /// Returns the number of middleware.
    #[must_use]
    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    /// Returns true if the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }

    /// Runs every middleware and then the handler.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a middleware or by the handler.
    pub async fn try_run<H>(&self, ctx: &mut RequestContext, handler: &H) -> Result<Response, PropsError>
    where
        H: Handler + ?Sized,
    {
        let span = tracing::info_span!(
            "request",
            request_id = %ctx.id(),
            method = %ctx.method(),
            path = %ctx.path(),
        );

        async move {
            for middleware in &self.middleware {
                tracing::debug!(middleware = middleware.name(), "running middleware");
                if let Err(err) = middleware.handle(ctx).await {
                    tracing::error!(
                        middleware = middleware.name(),
                        code = err.code(),
                        error = %err,
                        "middleware failed"
                    );
                    return Err(err);
                }
            }

            let response = handler.call(ctx).await;
            match &response {
                Ok(r) => tracing::info!(status = r.status, "request handled"),
                Err(err) => tracing::error!(code = err.code(), error = %err, "handler failed"),
            }
            response
        }
        .instrument(span)
        .await
    }

    /// Runs the chain, reporting any error as a 500 response.
    pub async fn run<H>(&self, ctx: &mut RequestContext, handler: &H) -> Response
    where
        H: Handler + ?Sized,
    {
        self.try_run(ctx, handler)
            .await
            .unwrap_or_else(|err| Response::from_error(&err))
    }
}
