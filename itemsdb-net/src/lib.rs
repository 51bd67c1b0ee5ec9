//! Transport layer for the items service
//!
//! A [`Transport`] sends one [`Request`] and decodes its JSON response. The
//! client crate builds requests and never looks past this trait, so the
//! HTTP implementation here can be swapped for anything that honors it.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub mod error;
pub mod http;
pub mod paths;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::TransportError;
pub use http::HttpTransport;

#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockTransport;

pub type Result<T> = std::result::Result<T, TransportError>;

/// Request verb, independent of the wire protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verb {
    /// The service's default mutating verb (POST)
    #[default]
    Default,
    /// Non-mutating read (GET)
    Read,
    /// Replace (PUT)
    Replace,
    Delete,
}

impl Verb {
    pub fn method(&self) -> hyper::Method {
        match self {
            Verb::Default => hyper::Method::POST,
            Verb::Read => hyper::Method::GET,
            Verb::Replace => hyper::Method::PUT,
            Verb::Delete => hyper::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub verb: Verb,
    /// UTF-8 JSON body
    pub body: Option<Vec<u8>>,
}

/// A single outbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Path relative to the service root, query string included
    pub path: String,
    /// Language hint, passed through unexamined
    pub locale: Option<String>,
    pub options: RequestOptions,
}

impl Request {
    pub fn new(path: impl Into<String>, verb: Verb) -> Self {
        Request {
            path: path.into(),
            locale: None,
            options: RequestOptions { verb, body: None },
        }
    }

    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }

    /// Serialize `body` as the JSON request body
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> serde_json::Result<Self> {
        self.options.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    pub fn verb(&self) -> Verb {
        self.options.verb
    }

    /// The body decoded back into JSON, if there is one
    pub fn json_body(&self) -> Option<Value> {
        self.options
            .body
            .as_deref()
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
    }
}

/// Sends requests to the items service
///
/// Implementations own connection handling, authentication and error
/// reporting. Every call is one request; callers do not retry.
pub trait Transport {
    fn execute(&self, request: Request) -> Result<Value>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: Request) -> Result<Value> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: Request) -> Result<Value> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: Request) -> Result<Value> {
        (**self).execute(request)
    }
}

/// Decode a response body; an empty body is `null`
pub fn decode_body(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(bytes)?)
}
