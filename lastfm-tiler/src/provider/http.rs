//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Default request timeout. This is the only deadline on a tile fetch.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Some image CDNs refuse requests without a browser-like User-Agent.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Failure of a single GET request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// Connection, DNS, TLS or timeout failure before a response arrived.
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The server answered with a non-2xx status. The body is kept because
    /// APIs often explain the failure there.
    #[error("HTTP {status} from {url}")]
    Status {
        status: u16,
        url: String,
        body: Vec<u8>,
    },

    /// The response started but its body could not be read.
    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },

    /// The client itself could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

/// Query parameters whose values never appear in errors or logs.
const SENSITIVE_PARAMS: [&str; 4] = ["api_key", "api_sig", "sk", "token"];

/// Returns `url` with the values of credential-bearing query parameters
/// replaced by `REDACTED`.
///
/// Unparseable input loses its whole query string.
pub fn redact_url(url: &str) -> String {
    let Ok(mut parsed) = reqwest::Url::parse(url) else {
        return url.split('?').next().unwrap_or_default().to_string();
    };
    if parsed.query().is_none() {
        return parsed.into();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if SENSITIVE_PARAMS.contains(&k.as_ref()) {
                "REDACTED".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}

impl HttpError {
    /// A status error without a body.
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        HttpError::Status {
            status,
            url: url.into(),
            body: Vec::new(),
        }
    }

    /// The same error with its URL passed through [`redact_url`].
    pub fn redacted(self) -> Self {
        match self {
            HttpError::Request { url, message } => HttpError::Request {
                url: redact_url(&url),
                message,
            },
            HttpError::Status { status, url, body } => HttpError::Status {
                status,
                url: redact_url(&url),
                body,
            },
            HttpError::Body { url, message } => HttpError::Body {
                url: redact_url(&url),
                message,
            },
            HttpError::Client(message) => HttpError::Client(message),
        }
    }
}

/// Asynchronous GET-only HTTP client.
///
/// Both the chart provider and the tile fetcher go through this trait, so
/// tests can substitute canned responses for the network.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs a single GET and returns the full response body.
    ///
    /// Non-2xx statuses are errors. There are no retries.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send;
}

/// [`AsyncHttpClient`] backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a client with the default 30 second timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with a custom per-request timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(DEFAULT_USER_AGENT)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        // Only the redacted form reaches logs and errors.
        let shown = redact_url(url);
        trace!(url = %shown, "HTTP GET request starting");

        // Every early return below drops `response`, which hands the
        // connection back to the pool or closes it.
        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(
                    url = %shown,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                let (is_connect, is_timeout) = (e.is_connect(), e.is_timeout());
                let e = e.without_url();
                warn!(
                    url = %shown,
                    error = %e,
                    is_connect,
                    is_timeout,
                    "HTTP request failed"
                );
                let message = if is_timeout {
                    format!("timed out: {}", e)
                } else if is_connect {
                    format!("connection failed: {}", e)
                } else {
                    e.to_string()
                };
                return Err(HttpError::Request { url: shown, message });
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = %shown, status = status.as_u16(), "HTTP error status");
            // Best effort: an unreadable error body is just empty.
            let body = response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .unwrap_or_default();
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: shown,
                body,
            });
        }

        match response.bytes().await {
            Ok(bytes) => {
                trace!(url = %shown, bytes = bytes.len(), "HTTP response body read");
                Ok(bytes.to_vec())
            }
            Err(e) => {
                let e = e.without_url();
                warn!(url = %shown, error = %e, "Failed to read response body");
                Err(HttpError::Body {
                    url: shown,
                    message: e.to_string(),
                })
            }
        }
    }
}
