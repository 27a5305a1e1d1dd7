//! Per-request options for [`FetchClient::fetch`](crate::FetchClient::fetch).

use bytes::Bytes;
use serde::Serialize;

use crate::error::Result;
use crate::method::Method;

/// Method, headers and body of an outgoing request.
///
/// Everything is optional; `RequestOptions::default()` is a bodiless `GET`.
/// Anything else a transport may want (timeouts, tracing context, ...) rides
/// along in [`extensions`](RequestOptions::extensions) and is forwarded onto
/// the outgoing request untouched.
/// Headers are kept in insertion order and sent as given, except that
/// `Authorization` and `Content-Type` are always replaced by the client.
///
/// ```rust
/// use folio::{Method, RequestOptions};
///
/// let opts = RequestOptions::new()
///     .method(Method::Post)
///     .header("x-request-id", "7f3a")
///     .body(r#"{"title":"Dune"}"#);
/// # assert_eq!(opts.headers.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    pub extensions: http::Extensions,
}

impl RequestOptions {
    pub fn new() -> Self { Self::default() }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Raw body bytes, sent unchanged.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Attach a typed value for the transport; replaces one of the same type.
    pub fn extension<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.extensions.insert(value);
        self
    }

    /// Serialise `value` with serde_json and use it as the body.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        Ok(self.body(serde_json::to_vec(value)?))
    }
}
