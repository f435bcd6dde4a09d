//! Remote image retrieval.

use super::FetchError;
use crate::provider::AsyncHttpClient;
use image::DynamicImage;
use std::future::Future;
use tracing::trace;

/// Retrieves and decodes one remote image.
pub trait ImageFetcher: Send + Sync + 'static {
    /// Makes exactly one attempt to fetch `url` and decode the body.
    ///
    /// The image comes back at whatever size the source has.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<DynamicImage, FetchError>> + Send;
}

/// [`ImageFetcher`] over an [`AsyncHttpClient`].
///
/// The format is sniffed from the body's magic bytes, so a JPEG served from
/// a `.png` URL still decodes.
pub struct HttpImageFetcher<C: AsyncHttpClient> {
    http_client: C,
}

impl<C: AsyncHttpClient> HttpImageFetcher<C> {
    pub fn new(http_client: C) -> Self {
        Self { http_client }
    }
}

impl<C: AsyncHttpClient + 'static> ImageFetcher for HttpImageFetcher<C> {
    async fn fetch(&self, url: &str) -> Result<DynamicImage, FetchError> {
        let body = self
            .http_client
            .get(url)
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        trace!(url = url, bytes = body.len(), "Decoding tile image");

        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&body)).await;

        match decoded {
            Ok(Ok(img)) => Ok(img),
            Ok(Err(e)) => Err(FetchError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(join_err) => Err(FetchError::Decode {
                url: url.to_string(),
                message: format!("decoder task failed: {}", join_err),
            }),
        }
    }
}
