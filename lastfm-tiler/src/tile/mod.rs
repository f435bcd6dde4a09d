//! Single-tile pipeline: fetch, resize, fall back.
//!
//! ```text
//! CellAssignment ──► TileWorker ──► TileResult
//!                      │  ▲
//!        limiter slot ─┘  │
//!                         ├── ImageFetcher::fetch (one HTTP attempt)
//!                         └── resize / placeholder
//! ```

mod error;
mod fetcher;
mod resize;
mod worker;

pub use error::FetchError;
pub use fetcher::{HttpImageFetcher, ImageFetcher};
pub use resize::{placeholder, resize};
pub use worker::{CellAssignment, TileResult, TileSource, TileWorker};

#[cfg(test)]
pub use fetcher::tests::MockFetcher;
