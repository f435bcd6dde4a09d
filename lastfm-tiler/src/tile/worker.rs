//! Per-cell tile production.
//!
//! [`TileWorker::produce`] is the failure-isolation boundary of a grid
//! build. Its return type is a plain [`TileResult`], not a `Result`: every
//! fetch or decode problem is logged and turned into a transparent
//! placeholder before the value is built, so one bad cover can never abort
//! the grid.

use super::{placeholder, resize, ImageFetcher};
use crate::limiter::ConcurrencyLimiter;
use crate::log::Logger;
use crate::{log_debug, log_error, log_warn};
use image::RgbaImage;
use std::sync::Arc;

/// The image URL chosen for one grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAssignment {
    /// Row-major cell index, `0..total_cells`
    pub index: usize,
    /// `None` when the provider ran out of items or the item had no art
    pub url: Option<String>,
}

impl CellAssignment {
    pub fn new(index: usize, url: Option<String>) -> Self {
        Self { index, url }
    }

    pub fn empty(index: usize) -> Self {
        Self { index, url: None }
    }
}

/// Where a tile's pixels came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSource {
    /// Fetched and resized cover art
    Fetched,
    /// No URL for this cell
    Missing,
    /// The fetch, decode or resize failed
    Failed,
}

/// A finished tile tagged with its destination cell.
#[derive(Debug, Clone)]
pub struct TileResult {
    pub index: usize,
    /// Exactly `cell_size_px` square
    pub raster: RgbaImage,
    pub source: TileSource,
}

/// Produces the raster for one cell: limiter slot, fetch, resize.
pub struct TileWorker<F: ImageFetcher> {
    fetcher: Arc<F>,
    limiter: Arc<ConcurrencyLimiter>,
    logger: Arc<dyn Logger>,
    cell_size_px: u32,
}

impl<F: ImageFetcher> Clone for TileWorker<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            limiter: Arc::clone(&self.limiter),
            logger: Arc::clone(&self.logger),
            cell_size_px: self.cell_size_px,
        }
    }
}

impl<F: ImageFetcher> TileWorker<F> {
    pub fn new(
        fetcher: Arc<F>,
        limiter: Arc<ConcurrencyLimiter>,
        logger: Arc<dyn Logger>,
        cell_size_px: u32,
    ) -> Self {
        Self {
            fetcher,
            limiter,
            logger,
            cell_size_px,
        }
    }

    /// Always yields a tile of the configured size for `assignment.index`.
    pub async fn produce(&self, assignment: CellAssignment) -> TileResult {
        // Held until the tile is finished, on every return path.
        let _permit = self.limiter.acquire().await;

        let side = self.cell_size_px;
        let CellAssignment { index, url } = assignment;

        let Some(url) = url else {
            log_debug!(self.logger, "Tile {} has no image, using placeholder", index);
            return self.placeholder(index, TileSource::Missing);
        };

        let source = match self.fetcher.fetch(&url).await {
            Ok(img) => img,
            Err(e) => {
                log_warn!(
                    self.logger,
                    "Couldn't load image for tile {} ({}). Falling back to placeholder. Err: {}",
                    index,
                    url,
                    e
                );
                return self.placeholder(index, TileSource::Failed);
            }
        };

        match tokio::task::spawn_blocking(move || resize(&source, side)).await {
            Ok(raster) => TileResult {
                index,
                raster,
                source: TileSource::Fetched,
            },
            Err(e) => {
                log_error!(
                    self.logger,
                    "Resizing tile {} ({}) failed, using placeholder: {}",
                    index,
                    url,
                    e
                );
                self.placeholder(index, TileSource::Failed)
            }
        }
    }

    fn placeholder(&self, index: usize, source: TileSource) -> TileResult {
        TileResult {
            index,
            raster: placeholder(self.cell_size_px),
            source,
        }
    }
}
