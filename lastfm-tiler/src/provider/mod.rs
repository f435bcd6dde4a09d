//! Ranked chart provider abstraction
//!
//! A provider answers "which items does this user rank highest for this
//! period, and where are their images?". The grid engine only consumes the
//! ordered [`RankedItem`] list; how it is obtained lives here.
//!
//! ```ignore
//! use lastfm_tiler::provider::{AsyncReqwestClient, LastFmProvider};
//!
//! let provider = LastFmProvider::new(AsyncReqwestClient::new()?);
//! ```

mod http;
mod lastfm;
mod types;

pub use http::{redact_url, AsyncHttpClient, AsyncReqwestClient, HttpError, DEFAULT_TIMEOUT_SECS};
pub use lastfm::{parse_top_albums, LastFmProvider, LASTFM_API_URL};
pub use types::{ChartProvider, ImageCandidate, ProviderError, RankedItem, TopAlbumsQuery};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
#[cfg(test)]
pub use types::tests::StaticProvider;
