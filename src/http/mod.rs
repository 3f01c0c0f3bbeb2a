//! The HTTP module which defines how requests reach Discord's API.
//!
//! Models never talk to the network themselves. Every request they make is described as a
//! [`Request`] and handed to a [`RequestHandler`], an opaque transport that sends it and reports
//! the result. Transport concerns such as connection pooling, retries and ratelimiting belong to
//! the handler.
//!
//! With the `http` feature enabled, [`Http`] is a reqwest-backed handler.

#[cfg(feature = "http")]
mod client;
mod error;
mod routing;

use async_trait::async_trait;
#[cfg(feature = "http")]
use reqwest::Method;

#[cfg(feature = "http")]
pub use self::client::*;
pub use self::error::*;
pub use self::routing::*;
use crate::builder::CreateAttachment;
use crate::internal::prelude::*;

/// The HTTP method of a [`Request`].
///
/// This is needed because `reqwest`'s `Method` enum does not derive Copy, and is only available
/// with the `http` feature.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LightMethod {
    /// Indicates that a route is for the `DELETE` method only.
    Delete,
    /// Indicates that a route is for the `GET` method only.
    Get,
    /// Indicates that a route is for the `PATCH` method only.
    Patch,
    /// Indicates that a route is for the `POST` method only.
    Post,
    /// Indicates that a route is for the `PUT` method only.
    Put,
}

impl LightMethod {
    #[cfg(feature = "http")]
    #[must_use]
    pub fn reqwest_method(self) -> Method {
        match self {
            Self::Delete => Method::DELETE,
            Self::Get => Method::GET,
            Self::Patch => Method::PATCH,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
        }
    }
}

/// A request handed to a [`RequestHandler`].
///
/// Files travel next to the JSON body; a handler sending files is expected to build a multipart
/// request with the body as `payload_json`.
#[derive(Clone, Debug)]
#[must_use]
pub struct Request<'a> {
    pub method: LightMethod,
    pub route: Route<'a>,
    /// Whether the handler should attach its own credentials.
    pub authenticated: bool,
    pub body: Option<Value>,
    pub files: Vec<CreateAttachment>,
    pub params: Vec<(&'static str, String)>,
    pub audit_log_reason: Option<&'a str>,
}

impl<'a> Request<'a> {
    /// Creates an authenticated request without a body.
    pub fn new(method: LightMethod, route: Route<'a>) -> Self {
        Self {
            method,
            route,
            authenticated: true,
            body: None,
            files: Vec::new(),
            params: Vec::new(),
            audit_log_reason: None,
        }
    }

    pub fn authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    pub fn body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    pub fn files(mut self, files: Vec<CreateAttachment>) -> Self {
        self.files = files;
        self
    }

    /// Appends a query string parameter.
    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// Sets the reason shown in the guild's audit log for this request.
    pub fn audit_log_reason(mut self, reason: Option<&'a str>) -> Self {
        self.audit_log_reason = reason;
        self
    }
}

/// The transport every model delegates its requests to.
///
/// Implementations report failures as [`Error::Http`]; models surface them to their callers
/// without retrying or interpreting them. A successful response without a body is
/// [`Value::Null`].
///
/// # Examples
///
/// A handler that answers every request with an empty body:
///
/// ```rust
/// use riposte::http::{Request, RequestHandler};
/// use riposte::json::Value;
/// use riposte::{async_trait, Result};
///
/// struct Noop;
///
/// #[async_trait]
/// impl RequestHandler for Noop {
///     async fn request(&self, _: Request<'_>) -> Result<Value> {
///         Ok(Value::Null)
///     }
/// }
/// ```
///
/// [`Error::Http`]: crate::Error::Http
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Sends the request and returns the response body.
    async fn request(&self, request: Request<'_>) -> Result<Value>;
}
