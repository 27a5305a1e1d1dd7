//! Process-wide settings, read once at startup and passed in explicitly.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Environment variable holding the backend base URL.
pub const FETCH_URL_ENV: &str = "FOLIO_FETCH_URL";

/// Settings for [`FetchClient`](crate::FetchClient).
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Prefix for every request path, e.g. `http://127.0.0.1:8080/api`.
    ///
    /// Concatenated as-is: no slash is added or removed.
    #[serde(default)]
    pub fetch_url: String,
}

impl Config {
    pub fn new(fetch_url: impl Into<String>) -> Self {
        Self { fetch_url: fetch_url.into() }
    }

    /// Read [`FETCH_URL_ENV`]. Unset means an empty base.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Config::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self { fetch_url: lookup(FETCH_URL_ENV).unwrap_or_default() }
    }

    /// Load a TOML file:
    ///
    /// ```toml
    /// fetch_url = "http://127.0.0.1:8080/api"
    /// ```
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| Error::ConfigIo { path: path.to_owned(), source })?;
        toml::from_str(&raw).map_err(|source| Error::ConfigParse { path: path.to_owned(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_reads_fetch_url() {
        let cfg = Config::from_lookup(|k| (k == FETCH_URL_ENV).then(|| "http://api".to_owned()));
        assert_eq!(cfg, Config::new("http://api"));
        assert_eq!(Config::from_lookup(|_| None).fetch_url, "");
    }

    #[test]
    fn loads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        fs::write(&path, "fetch_url = \"http://localhost:8080/\"\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().fetch_url, "http://localhost:8080/");

        fs::write(&path, "").unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());

        fs::write(&path, "fetch_url = 3").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::ConfigParse { .. })));
        assert!(matches!(Config::load(dir.path().join("missing.toml")), Err(Error::ConfigIo { .. })));
    }
}
