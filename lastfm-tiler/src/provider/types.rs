//! Provider types and traits

use super::http::HttpError;
use crate::config::Period;
use std::future::Future;
use thiserror::Error;

/// Errors from a chart lookup. Any of these aborts the grid build.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The HTTP request for the chart failed
    #[error("chart request failed: {0}")]
    Http(#[from] HttpError),

    /// The service answered with an API-level error (bad key, unknown user)
    #[error("provider error {code}: {message}")]
    Api { code: u32, message: String },

    /// The body was not the JSON shape we expect
    #[error("invalid chart response: {0}")]
    InvalidResponse(String),
}

/// One image rendition offered for an item, e.g. `("extralarge", url)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub size: String,
    pub url: String,
}

impl ImageCandidate {
    pub fn new(size: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            url: url.into(),
        }
    }
}

/// A charted item in rank order, with its image renditions in the order the
/// provider listed them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankedItem {
    pub name: String,
    pub artist: String,
    pub images: Vec<ImageCandidate>,
}

impl RankedItem {
    pub fn new(name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, size: impl Into<String>, url: impl Into<String>) -> Self {
        self.images.push(ImageCandidate::new(size, url));
        self
    }
}

/// Parameters of a top-items lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopAlbumsQuery<'a> {
    /// Static API credential passed through to the service
    pub api_key: &'a str,
    /// Whose chart to fetch
    pub user: &'a str,
    pub period: Period,
    /// Upper bound on the number of items wanted
    pub limit: usize,
}

/// Source of ranked items with image URLs.
///
/// Implementations may return fewer than `limit` items; callers must not
/// treat that as an error.
pub trait ChartProvider: Send + Sync {
    /// Fetches up to `query.limit` items, best-ranked first.
    fn top_albums(
        &self,
        query: &TopAlbumsQuery<'_>,
    ) -> impl Future<Output = Result<Vec<RankedItem>, ProviderError>> + Send;

    /// Name used in log lines.
    fn name(&self) -> &str;
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Provider returning a fixed answer, ignoring the query.
    #[derive(Debug, Clone)]
    pub struct StaticProvider {
        pub result: Result<Vec<RankedItem>, ProviderError>,
    }

    impl StaticProvider {
        pub fn items(items: Vec<RankedItem>) -> Self {
            Self { result: Ok(items) }
        }

        pub fn failing(error: ProviderError) -> Self {
            Self { result: Err(error) }
        }
    }

    impl ChartProvider for StaticProvider {
        async fn top_albums(
            &self,
            query: &TopAlbumsQuery<'_>,
        ) -> Result<Vec<RankedItem>, ProviderError> {
            self.result
                .clone()
                .map(|items| items.into_iter().take(query.limit).collect())
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    #[test]
    fn test_ranked_item_builder() {
        let item = RankedItem::new("Blue Train", "John Coltrane")
            .with_image("small", "http://img/s.png")
            .with_image("large", "http://img/l.png");

        assert_eq!(item.images.len(), 2);
        assert_eq!(item.images[1], ImageCandidate::new("large", "http://img/l.png"));
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::Api {
            code: 10,
            message: "Invalid API key".to_string(),
        };
        assert_eq!(err.to_string(), "provider error 10: Invalid API key");

        let err: ProviderError = HttpError::status(503, "http://ws").into();
        assert!(err.to_string().contains("HTTP 503"));
    }
}
