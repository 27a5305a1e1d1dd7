//! Authenticated requests against the folio backend.
//!
//! One linear pass per request:
//!
//! ```text
//! storage.get("token")            ← absent or empty: no Authorization
//!        ↓
//! caller headers                  ← kept as given
//!   + Authorization: Bearer <t>   ← overwrites a caller value
//!   + Content-Type: application/json  ← always, overwrites a caller value
//!        ↓
//! <fetch_url><path>               ← plain concatenation
//!        ↓
//! transport.send(req)             ← response returned untouched
//! ```
//!
//! No status interpretation, no retry, no timeout. A `401` is a response,
//! not an error; wrap the call in `tokio::time::timeout` if you need one.

use std::sync::Arc;

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http_body_util::Full;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::options::RequestOptions;
use crate::storage::{Storage, TOKEN_KEY};
use crate::transport::{HyperTransport, OutgoingRequest, Transport};

/// HTTP client that prefixes the backend URL and attaches the stored token.
///
/// Cheap to clone; clones share storage and the connection pool.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use folio::{Config, FetchClient, FileStorage};
///
/// # async fn run() -> folio::Result<()> {
/// let client = FetchClient::new(Config::from_env(), Arc::new(FileStorage::new("storage.json")));
/// let resp = client.fetch("/books/42", Default::default()).await?;
/// println!("{}", resp.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FetchClient<T = HyperTransport> {
    config: Config,
    storage: Arc<dyn Storage>,
    transport: T,
}

impl FetchClient<HyperTransport> {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        Self::with_transport(config, storage, HyperTransport::new())
    }
}

impl<T: Transport> FetchClient<T> {
    pub fn with_transport(config: Config, storage: Arc<dyn Storage>, transport: T) -> Self {
        Self { config, storage, transport }
    }

    pub fn config(&self) -> &Config { &self.config }

    /// Send `options` to `<fetch_url><path>` and return the raw response.
    pub async fn fetch(&self, path: &str, options: RequestOptions) -> Result<http::Response<T::Body>> {
        let req = self.prepare(path, options)?;
        self.transport.send(req).await
    }

    /// Build the request [`fetch`](FetchClient::fetch) would send, without sending it.
    pub fn prepare(&self, path: &str, options: RequestOptions) -> Result<OutgoingRequest> {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let url = format!("{}{}", self.config.fetch_url, path);

        let mut headers = HeaderMap::with_capacity(options.headers.len() + 2);
        for (name, value) in &options.headers {
            headers.insert(parse_name(name)?, parse_value(name, value)?);
        }
        if let Some(token) = &token {
            headers.insert(AUTHORIZATION, parse_value("authorization", &format!("Bearer {token}"))?);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        debug!(method = %options.method, %url, authorized = token.is_some(), "fetch");

        let mut req = http::Request::builder()
            .method(http::Method::from(options.method))
            .uri(url)
            .body(Full::new(options.body))?;
        *req.headers_mut() = headers;
        *req.extensions_mut() = options.extensions;
        Ok(req)
    }
}

fn parse_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| Error::InvalidHeader { name: name.to_owned() })
}

fn parse_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader { name: name.to_owned() })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bytes::Bytes;
    use http_body_util::BodyExt;

    use super::*;
    use crate::method::Method;
    use crate::storage::MemoryStorage;

    /// Records the last request and answers with a fixed status.
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Option<OutgoingRequest>>,
    }

    impl Transport for Arc<Recorder> {
        type Body = Full<Bytes>;

        async fn send(&self, req: OutgoingRequest) -> Result<http::Response<Full<Bytes>>> {
            *self.seen.lock().unwrap() = Some(req);
            Ok(http::Response::builder()
                .status(503)
                .body(Full::new(Bytes::from_static(b"down")))
                .unwrap())
        }
    }

    fn client(base: &str, storage: MemoryStorage) -> (FetchClient<Arc<Recorder>>, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let client = FetchClient::with_transport(Config::new(base), Arc::new(storage), Arc::clone(&recorder));
        (client, recorder)
    }

    #[test]
    fn no_token_means_no_authorization() {
        let (c, _) = client("http://api", MemoryStorage::new());
        let req = c.prepare("/books", RequestOptions::new()).unwrap();
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let (c, _) = client("http://api", MemoryStorage::with_token(""));
        let req = c.prepare("/books", RequestOptions::new()).unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn stored_token_becomes_bearer() {
        let (c, _) = client("http://api", MemoryStorage::with_token("abc123"));
        let req = c.prepare("/books", RequestOptions::new()).unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer abc123");
    }

    #[test]
    fn injected_headers_win_collisions() {
        let (c, _) = client("http://api", MemoryStorage::with_token("abc123"));
        let opts = RequestOptions::new()
            .header("X-Trace", "1")
            .header("content-type", "text/plain")
            .header("Authorization", "Basic Zm9vOmJhcg==");
        let req = c.prepare("/books", opts).unwrap();

        assert_eq!(req.headers()["x-trace"], "1");
        assert_eq!(req.headers().get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer abc123");
    }

    #[test]
    fn caller_authorization_survives_without_token() {
        let (c, _) = client("http://api", MemoryStorage::new());
        let opts = RequestOptions::new().header("Authorization", "Basic Zm9vOmJhcg==");
        let req = c.prepare("/", opts).unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], "Basic Zm9vOmJhcg==");
    }

    #[test]
    fn extensions_pass_through() {
        #[derive(Clone, Debug, PartialEq)]
        struct RequestTag(&'static str);

        let (c, _) = client("http://api", MemoryStorage::new());
        let opts = RequestOptions::new().extension(RequestTag("catalogue"));
        let req = c.prepare("/books", opts).unwrap();
        assert_eq!(req.extensions().get::<RequestTag>(), Some(&RequestTag("catalogue")));
    }

    #[test]
    fn url_is_plain_concatenation() {
        let (c, _) = client("http://api.test/v1/", MemoryStorage::new());
        let req = c.prepare("/books/42?x=1", RequestOptions::new()).unwrap();
        assert_eq!(req.uri(), "http://api.test/v1//books/42?x=1");
    }

    #[test]
    fn rejects_bad_headers_and_urls() {
        let (c, _) = client("http://api", MemoryStorage::new());
        let bad_name = RequestOptions::new().header("bad header", "x");
        assert!(matches!(c.prepare("/", bad_name), Err(Error::InvalidHeader { .. })));
        let bad_value = RequestOptions::new().header("x-ok", "line\nbreak");
        assert!(matches!(c.prepare("/", bad_value), Err(Error::InvalidHeader { .. })));
        assert!(matches!(c.prepare("/a b", RequestOptions::new()), Err(Error::Request(_))));
    }

    #[tokio::test]
    async fn fetch_forwards_and_returns_response_untouched() {
        let (c, recorder) = client("http://api", MemoryStorage::with_token("abc123"));
        let opts = RequestOptions::new().method(Method::Post).body("{\"id\":1}");

        let resp = c.fetch("/books", opts).await.unwrap();
        assert_eq!(resp.status(), 503);
        assert_eq!(resp.into_body().collect().await.unwrap().to_bytes(), "down");

        let sent = recorder.seen.lock().unwrap().take().unwrap();
        assert_eq!(sent.method(), http::Method::POST);
        assert_eq!(sent.uri(), "http://api/books");
        assert_eq!(sent.headers()[AUTHORIZATION], "Bearer abc123");
        assert_eq!(sent.into_body().collect().await.unwrap().to_bytes(), "{\"id\":1}");
    }

    #[tokio::test]
    async fn token_is_read_per_request() {
        let storage = Arc::new(MemoryStorage::new());
        let recorder = Arc::new(Recorder::default());
        let c = FetchClient::with_transport(Config::new("http://api"), storage.clone(), Arc::clone(&recorder));

        c.fetch("/a", RequestOptions::new()).await.unwrap();
        assert!(recorder.seen.lock().unwrap().take().unwrap().headers().get(AUTHORIZATION).is_none());

        storage.set(TOKEN_KEY, "late").unwrap();
        c.fetch("/a", RequestOptions::new()).await.unwrap();
        assert_eq!(recorder.seen.lock().unwrap().take().unwrap().headers()[AUTHORIZATION], "Bearer late");
    }
}
