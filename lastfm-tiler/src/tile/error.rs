//! Error type for single-tile image retrieval.
//!
//! A [`FetchError`] never leaves the tile worker: it is logged and replaced
//! by a placeholder. It still carries the URL and the underlying cause so
//! that the log line is enough to diagnose the failure.

use crate::provider::HttpError;
use thiserror::Error;

/// Why a tile image could not be obtained.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Transport failure or non-success status
    #[error("couldn't load image {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: HttpError,
    },

    /// The body arrived but is not an image in any supported format
    #[error("couldn't decode image {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// The URL the failed fetch was for.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Http { url, .. } | FetchError::Decode { url, .. } => url,
        }
    }
}
