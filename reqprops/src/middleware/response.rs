//! Responses produced at the end of a pipeline.

use crate::errors::PropsError;
use serde::{Deserialize, Serialize};

/// A status code and a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body.
    pub body: serde_json::Value,
}

impl Response {
    /// Creates a 200 response.
    #[must_use]
    pub fn ok(body: serde_json::Value) -> Self {
        Self::with_status(200, body)
    }

    /// Creates a response with an explicit status.
    #[must_use]
    pub fn with_status(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    /// Creates the 500 response reported for a failed props operation.
    #[must_use]
    pub fn from_error(err: &PropsError) -> Self {
        let details: serde_json::Map<String, serde_json::Value> =
            err.to_dict().into_iter().collect();
        Self::with_status(
            500,
            serde_json::json!({ "error": serde_json::Value::Object(details) }),
        )
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the error code of a response built by [`Response::from_error`].
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.body.get("error")?.get("code")?.as_str()
    }
}

impl From<PropsError> for Response {
    fn from(err: PropsError) -> Self {
        Self::from_error(&err)
    }
}
