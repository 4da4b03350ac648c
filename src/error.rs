//! Error types for dataset loading.
//!
//! Normalization, filtering and meal editing never fail; the only fallible
//! step in a session is fetching a dataset document. [`LoadError`] covers
//! every way that can go wrong. The session recovers from all of them locally
//! (empty menu, failed status, logged error), so callers of
//! [`Session::load`](crate::Session::load) never see one. Sources used
//! directly return it as-is.

use std::io;

use normalize::Brand;
use thiserror::Error;

/// Why a dataset document could not be obtained.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The registry has no dataset for this brand and region.
    #[error("no dataset registered for {brand} / {region}")]
    NotRegistered { brand: Brand, region: String },

    /// The server answered with a non-success status.
    #[error("unexpected status {status} while fetching {url}")]
    Status { status: u16, url: String },

    /// Connection, TLS, timeout or body read failures.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The document is not valid JSON.
    #[error("dataset is not valid JSON: {0}")]
    Parse(String),

    /// Local filesystem failures.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        LoadError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = LoadError::Status {
            status: 404,
            url: "http://localhost/data/kfc_uk.json".into(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("kfc_uk.json"));

        let err = LoadError::NotRegistered {
            brand: Brand::Kfc,
            region: "canada".into(),
        };
        assert_eq!(err.to_string(), "no dataset registered for kfc / canada");
    }

    #[test]
    fn from_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err: LoadError = parse_err.into();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn from_io_error() {
        let err: LoadError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, LoadError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }
}
