//! The HTTP primitive the fetch client delegates to.
//!
//! [`FetchClient`](crate::FetchClient) only decorates requests; sending them
//! is a [`Transport`]'s job. The default is [`HyperTransport`], a pooled
//! hyper client speaking plain HTTP/1.1. TLS is terminated by the proxy in
//! front of the backend, not here.

use std::future::Future;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;

use crate::error::Result;

/// Outgoing request as handed to a [`Transport`].
pub type OutgoingRequest = http::Request<Full<Bytes>>;

/// Sends one request and returns the response as received.
///
/// Implementations must not interpret the status or retry: a `500` is a
/// successful send.
pub trait Transport: Send + Sync {
    type Body;

    fn send(&self, req: OutgoingRequest) -> impl Future<Output = Result<http::Response<Self::Body>>> + Send;
}

/// hyper-util's pooled client over a Tokio TCP connector.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
}

impl HyperTransport {
    pub fn new() -> Self {
        Self { client: Client::builder(TokioExecutor::new()).build(HttpConnector::new()) }
    }
}

impl Default for HyperTransport {
    fn default() -> Self { Self::new() }
}

impl Transport for HyperTransport {
    type Body = Incoming;

    async fn send(&self, req: OutgoingRequest) -> Result<http::Response<Incoming>> {
        Ok(self.client.request(req).await?)
    }
}
