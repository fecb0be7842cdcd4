//! Test fixtures for props pipelines.

use crate::config::PropsConfig;
use crate::context::{PropsContext, RequestContext};
use crate::errors::PropsError;
use serde::Serialize;

/// A request builder for tests.
#[derive(Debug, Clone)]
pub struct TestRequest {
    /// Request method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Headers to attach.
    pub headers: Vec<(String, String)>,
    /// Props written before the request is handed to the code under test.
    pub props: Vec<(String, serde_json::Value)>,
    /// Bag configuration.
    pub config: PropsConfig,
}

impl Default for TestRequest {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            path: "/".to_string(),
            headers: Vec::new(),
            props: Vec::new(),
            config: PropsConfig::default(),
        }
    }
}

impl TestRequest {
    /// Creates a new `GET /` test request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the method and path.
    #[must_use]
    pub fn with_route(mut self, method: impl Into<String>, path: impl Into<String>) -> Self {
        self.method = method.into();
        self.path = path.into();
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds a prewritten payload.
    ///
    /// # Panics
    ///
    /// Panics if `payload` cannot be converted to JSON.
    #[must_use]
    pub fn with_props<T: Serialize>(mut self, key: impl Into<String>, payload: &T) -> Self {
        let value = serde_json::to_value(payload).expect("test payload must serialize");
        self.props.push((key.into(), value));
        self
    }

    /// Sets the bag configuration.
    #[must_use]
    pub fn with_config(mut self, config: PropsConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the request, writing the prewritten props in order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the same key was added twice.
    pub fn try_build(&self) -> Result<RequestContext, PropsError> {
        let mut ctx = self
            .headers
            .iter()
            .fold(
                RequestContext::new(self.method.clone(), self.path.clone()),
                |ctx, (name, value)| ctx.with_header(name.clone(), value.clone()),
            )
            .with_config(self.config.clone());

        for (key, value) in &self.props {
            ctx.props_mut().insert_value(key.clone(), value.clone())?;
        }
        Ok(ctx)
    }

    /// Builds the request.
    ///
    /// # Panics
    ///
    /// Panics if the same key was added twice.
    #[must_use]
    pub fn build(&self) -> RequestContext {
        self.try_build().expect("test request props must have unique keys")
    }
}
