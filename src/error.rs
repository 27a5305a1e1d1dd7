//! Unified error type.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across folio.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type returned by folio's fallible operations.
///
/// HTTP statuses are never errors here: a `404` or `500` from the backend is
/// an ordinary [`http::Response`] handed back to the caller. This type only
/// surfaces failures to build or send a request, plus configuration and
/// route-lookup mistakes.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP client failed to deliver the request (connect, I/O, protocol).
    #[error("transport: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    /// The request could not be assembled (bad URI, bad method, ...).
    #[error("invalid request: {0}")]
    Request(#[from] http::Error),

    /// A caller-supplied or injected header is not a valid HTTP header.
    #[error("invalid header `{name}`")]
    InvalidHeader { name: String },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config file {path}: {source}")]
    ConfigIo { path: PathBuf, source: std::io::Error },

    #[error("config file {path}: {source}")]
    ConfigParse { path: PathBuf, source: toml::de::Error },

    #[error("storage {path}: {source}")]
    Storage { path: PathBuf, source: std::io::Error },

    #[error("no route named `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` requires parameter `{param}`")]
    MissingParam { route: String, param: String },
}
