//! Request contexts that can carry a property bag.

use super::PropertyBag;
use crate::config::PropsConfig;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A host request that reserves room for one property bag.
///
/// The bag is created on the first write. Implementors keep it in a field of
/// its own so it never collides with the host's other request fields.
///
/// Writes go through `&mut self`, which is how a request is handed from one
/// stage to the next. Hosts that must share a request between tasks should
/// use [`SharedPropertyBag`](super::SharedPropertyBag) instead.
pub trait PropsContext {
    /// Returns the bag, or `None` if nothing has been written yet.
    fn props(&self) -> Option<&PropertyBag>;

    /// Returns the bag, creating it if needed.
    fn props_mut(&mut self) -> &mut PropertyBag;

    /// Returns the request ID used to correlate log lines.
    fn request_id(&self) -> Option<Uuid> {
        None
    }
}

impl PropsContext for Option<PropertyBag> {
    fn props(&self) -> Option<&PropertyBag> {
        self.as_ref()
    }

    fn props_mut(&mut self) -> &mut PropertyBag {
        self.get_or_insert_with(PropertyBag::new)
    }
}

/// An incoming request as seen by a middleware pipeline.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    received_at: DateTime<Utc>,
    method: String,
    path: String,
    headers: Vec<(String, String)>,
    config: PropsConfig,
    props: Option<PropertyBag>,
}

impl RequestContext {
    /// Creates a new request context with a generated request ID.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            received_at: Utc::now(),
            method: method.into(),
            path: path.into(),
            headers: Vec::new(),
            config: PropsConfig::default(),
            props: None,
        }
    }

    /// Sets the request ID.
    #[must_use]
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the configuration used when the bag is created.
    #[must_use]
    pub fn with_config(mut self, config: PropsConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the request ID.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.request_id
    }

    /// Returns when the request was received.
    #[must_use]
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Returns the request method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns all headers in arrival order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl PropsContext for RequestContext {
    fn props(&self) -> Option<&PropertyBag> {
        self.props.as_ref()
    }

    fn props_mut(&mut self) -> &mut PropertyBag {
        let config = &self.config;
        self.props
            .get_or_insert_with(|| PropertyBag::with_config(config))
    }

    fn request_id(&self) -> Option<Uuid> {
        Some(self.request_id)
    }
}
