//! Echo backend for end-to-end fetch tests.
//!
//! Binds an ephemeral port, answers every request with a JSON description of
//! what arrived, and keeps serving until the test's runtime shuts down.

use std::convert::Infallible;
use std::net::SocketAddr;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

/// Start the echo backend; returns `http://127.0.0.1:<port>`.
pub async fn spawn_echo() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else { continue };
            let io = TokioIo::new(stream);
            tokio::spawn(async move {
                let _ = http1::Builder::new().serve_connection(io, service_fn(echo)).await;
            });
        }
    });

    format!("http://{addr}")
}

async fn echo(req: hyper::Request<Incoming>) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let body = body.collect().await.map(|b| b.to_bytes()).unwrap_or_default();

    let headers: serde_json::Map<String, serde_json::Value> = parts.headers.iter()
        .map(|(k, v)| (k.as_str().to_owned(), v.to_str().unwrap_or_default().into()))
        .collect();
    let described = serde_json::json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path_and_query().map(|p| p.as_str()).unwrap_or("/"),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    });

    // Non-2xx on purpose for one path: the client must hand it back untouched.
    let status = if parts.uri.path().ends_with("/missing") { 404 } else { 200 };
    let resp = http::Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(described.to_string())))
        .unwrap();
    Ok(resp)
}
