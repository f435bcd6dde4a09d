//! Last.fm top-albums provider

use super::http::{AsyncHttpClient, HttpError};
use super::types::{ChartProvider, ImageCandidate, ProviderError, RankedItem, TopAlbumsQuery};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

/// Public Last.fm web service endpoint.
pub const LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Fetches `user.gettopalbums` charts from the Last.fm JSON API.
pub struct LastFmProvider<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> LastFmProvider<C> {
    /// Creates a provider talking to the public Last.fm endpoint.
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, LASTFM_API_URL.to_string())
    }

    /// Creates a provider against a different endpoint (mirrors, tests).
    pub fn with_base_url(http_client: C, base_url: String) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    fn build_url(&self, query: &TopAlbumsQuery<'_>) -> Result<String, ProviderError> {
        let limit = query.limit.to_string();
        let url = Url::parse_with_params(
            &self.base_url,
            &[
                ("method", "user.gettopalbums"),
                ("user", query.user),
                ("period", query.period.as_str()),
                ("limit", limit.as_str()),
                ("api_key", query.api_key),
                ("format", "json"),
            ],
        )
        .map_err(|e| ProviderError::InvalidResponse(format!("bad base URL: {}", e)))?;
        Ok(url.into())
    }
}

impl<C: AsyncHttpClient> ChartProvider for LastFmProvider<C> {
    async fn top_albums(&self, query: &TopAlbumsQuery<'_>) -> Result<Vec<RankedItem>, ProviderError> {
        let url = self.build_url(query)?;
        let body = self
            .http_client
            .get(&url)
            .await
            .map_err(|e| explain_failure(e.redacted()))?;
        let items = parse_top_albums(&body)?;

        debug!(
            user = query.user,
            period = %query.period,
            requested = query.limit,
            returned = items.len(),
            "Last.fm chart fetched"
        );

        Ok(items)
    }

    fn name(&self) -> &str {
        "Last.fm"
    }
}

/// Last.fm reports bad keys and unknown users as 4xx responses with the
/// usual `{ error, message }` body. Surface that as [`ProviderError::Api`]
/// when present, else keep the HTTP error.
fn explain_failure(error: HttpError) -> ProviderError {
    if let HttpError::Status { body, .. } = &error {
        if let Err(api @ ProviderError::Api { .. }) = parse_top_albums(body) {
            return api;
        }
    }
    ProviderError::Http(error)
}

// Wire format. Only the fields the grid needs are declared.

#[derive(Deserialize)]
struct Envelope {
    topalbums: Option<TopAlbums>,
    error: Option<u32>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct TopAlbums {
    #[serde(default)]
    album: Vec<Album>,
}

#[derive(Deserialize)]
struct Album {
    #[serde(default)]
    name: String,
    artist: Option<Artist>,
    #[serde(default)]
    image: Vec<Image>,
}

#[derive(Deserialize)]
struct Artist {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct Image {
    #[serde(default)]
    size: String,
    #[serde(rename = "#text", default)]
    url: String,
}

/// Decodes a `user.gettopalbums` JSON body into ranked items.
pub fn parse_top_albums(body: &[u8]) -> Result<Vec<RankedItem>, ProviderError> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    if let Some(code) = envelope.error {
        return Err(ProviderError::Api {
            code,
            message: envelope.message.unwrap_or_default(),
        });
    }

    let albums = envelope
        .topalbums
        .ok_or_else(|| ProviderError::InvalidResponse("missing topalbums".to_string()))?
        .album;

    Ok(albums
        .into_iter()
        .map(|album| RankedItem {
            name: album.name,
            artist: album.artist.map(|a| a.name).unwrap_or_default(),
            images: album
                .image
                .into_iter()
                .map(|img| ImageCandidate {
                    size: img.size,
                    url: img.url,
                })
                .collect(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Period;
    use crate::provider::MockAsyncHttpClient;

    const CHART_JSON: &str = r##"{
        "topalbums": {
            "album": [
                {
                    "name": "Kind of Blue",
                    "artist": {"name": "Miles Davis", "url": "https://www.last.fm/music/Miles+Davis"},
                    "image": [
                        {"size": "small", "#text": "https://img/34s/kob.png"},
                        {"size": "medium", "#text": "https://img/64s/kob.png"},
                        {"size": "large", "#text": "https://img/174s/kob.png"},
                        {"size": "extralarge", "#text": "https://img/300x300/kob.png"}
                    ],
                    "playcount": "42",
                    "@attr": {"rank": "1"}
                },
                {
                    "name": "Untitled",
                    "artist": {"name": "Unknown"},
                    "image": [],
                    "@attr": {"rank": "2"}
                }
            ],
            "@attr": {"user": "rj", "page": "1", "perPage": "9", "totalPages": "1", "total": "2"}
        }
    }"##;

    fn query(limit: usize) -> TopAlbumsQuery<'static> {
        TopAlbumsQuery {
            api_key: "key123",
            user: "rj",
            period: Period::SevenDay,
            limit,
        }
    }

    #[test]
    fn test_parse_chart() {
        let items = parse_top_albums(CHART_JSON.as_bytes()).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Kind of Blue");
        assert_eq!(items[0].artist, "Miles Davis");
        assert_eq!(items[0].images.len(), 4);
        assert_eq!(
            items[0].images[3],
            ImageCandidate::new("extralarge", "https://img/300x300/kob.png")
        );
        assert!(items[1].images.is_empty());
    }

    #[test]
    fn test_parse_api_error() {
        let body = br#"{"error": 6, "message": "User not found"}"#;
        assert_eq!(
            parse_top_albums(body),
            Err(ProviderError::Api {
                code: 6,
                message: "User not found".to_string()
            })
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_top_albums(b"<html>oops</html>"),
            Err(ProviderError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_top_albums(b"{}"),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_build_url() {
        let provider = LastFmProvider::new(MockAsyncHttpClient::always(Ok(Vec::new())));
        let url = provider.build_url(&query(9)).unwrap();

        assert!(url.starts_with(LASTFM_API_URL));
        assert!(url.contains("method=user.gettopalbums"));
        assert!(url.contains("user=rj"));
        assert!(url.contains("period=7day"));
        assert!(url.contains("limit=9"));
        assert!(url.contains("api_key=key123"));
        assert!(url.contains("format=json"));
    }

    #[test]
    fn test_build_url_escapes_user() {
        let provider = LastFmProvider::new(MockAsyncHttpClient::always(Ok(Vec::new())));
        let q = TopAlbumsQuery {
            user: "a b&c",
            ..query(4)
        };
        let url = provider.build_url(&q).unwrap();
        assert!(url.contains("user=a+b%26c"));
    }

    #[tokio::test]
    async fn test_top_albums_success() {
        let provider =
            LastFmProvider::new(MockAsyncHttpClient::always(Ok(CHART_JSON.as_bytes().to_vec())));

        let items = provider.top_albums(&query(9)).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(provider.name(), "Last.fm");
    }

    #[tokio::test]
    async fn test_top_albums_http_failure() {
        let provider = LastFmProvider::new(MockAsyncHttpClient::always(Err(HttpError::status(
            500,
            LASTFM_API_URL,
        ))));

        let result = provider.top_albums(&query(9)).await;
        assert!(matches!(result, Err(ProviderError::Http(HttpError::Status { status: 500, .. }))));
    }

    #[tokio::test]
    async fn test_error_status_with_api_body() {
        let provider = LastFmProvider::new(MockAsyncHttpClient::always(Err(HttpError::Status {
            status: 403,
            url: LASTFM_API_URL.to_string(),
            body: br#"{"error": 10, "message": "Invalid API key"}"#.to_vec(),
        })));

        let result = provider.top_albums(&query(9)).await;
        assert_eq!(
            result,
            Err(ProviderError::Api {
                code: 10,
                message: "Invalid API key".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_error_status_with_html_body_stays_http() {
        let provider = LastFmProvider::new(MockAsyncHttpClient::always(Err(HttpError::Status {
            status: 502,
            url: LASTFM_API_URL.to_string(),
            body: b"<html>Bad Gateway</html>".to_vec(),
        })));

        let result = provider.top_albums(&query(9)).await;
        assert!(matches!(result, Err(ProviderError::Http(HttpError::Status { status: 502, .. }))));
    }

    #[tokio::test]
    async fn test_http_error_never_shows_api_key() {
        // A client that echoes the full request URL into its error.
        let provider = LastFmProvider::new(MockAsyncHttpClient::always(Err(HttpError::Request {
            url: format!("{}?api_key=key123", LASTFM_API_URL),
            message: "connection failed".to_string(),
        })));

        let err = provider.top_albums(&query(9)).await.unwrap_err();
        assert!(!err.to_string().contains("key123"));
        assert!(!format!("{:?}", err).contains("key123"));
    }

    #[tokio::test]
    async fn test_custom_base_url() {
        let provider = LastFmProvider::with_base_url(
            MockAsyncHttpClient::always(Ok(CHART_JSON.as_bytes().to_vec())),
            "http://localhost:8080/2.0/".to_string(),
        );
        let url = provider.build_url(&query(1)).unwrap();
        assert!(url.starts_with("http://localhost:8080/2.0/?"));
    }
}
