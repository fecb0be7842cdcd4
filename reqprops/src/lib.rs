//! # reqprops
//!
//! Request-scoped property bags for middleware pipelines.
//!
//! Each stage of a pipeline attaches what it computed to the request under a
//! key of its choosing, and later stages read it back by the same key:
//!
//! - **Write once**: attaching a key a second time fails with
//!   [`DuplicateKeyError`] and leaves the first payload in place
//! - **Read by key**: reading a key nobody attached fails with
//!   [`MissingKeyError`]
//! - **Read everything**: [`get_all_props`] returns a copy of every entry and
//!   never fails
//!
//! The bag lives in its own field of the request and is dropped with it.
//!
//! ## Quick Start
//!
//! ```rust
//! use reqprops::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     id: u32,
//! }
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct AuthenticateUser {
//!     user: User,
//! }
//!
//! let mut req = RequestContext::new("GET", "/");
//!
//! // inside a middleware
//! let props = AuthenticateUser { user: User { name: "dummy".into(), id: 1 } };
//! add_props(&mut req, &props, "authenticateUser")?;
//!
//! // inside the route
//! let AuthenticateUser { user } = get_props(&req, "authenticateUser")?;
//! assert_eq!(user.id, 1);
//!
//! // the same stage running twice is caught
//! assert!(add_props(&mut req, &props, "authenticateUser").is_err());
//! # Ok::<(), PropsError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod context;
pub mod errors;
pub mod middleware;
pub mod observability;
pub mod props;
pub mod testing;

pub use config::{LogFormat, PropsConfig};
pub use context::{PropertyBag, PropsContext, RequestContext, SharedPropertyBag};
pub use errors::{DuplicateKeyError, InvalidKeyError, MissingKeyError, PayloadError, PropsError};
pub use props::{add_props, get_all_props, get_all_props_value, get_props, get_raw_props};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{LogFormat, PropsConfig};
    pub use crate::context::{PropertyBag, PropsContext, RequestContext, SharedPropertyBag};
    pub use crate::errors::{
        DuplicateKeyError, InvalidKeyError, MissingKeyError, PayloadError, PropsError,
    };
    pub use crate::middleware::{FnMiddleware, Handler, Middleware, MiddlewareChain, Response};
    pub use crate::observability::init_tracing;
    pub use crate::props::{
        add_props, get_all_props, get_all_props_value, get_props, get_raw_props,
    };
}
