//! End-to-end grid builds for one user.

use super::{assign_cells, GridAssembler};
use crate::config::{ConfigError, TilerConfig};
use crate::limiter::ConcurrencyLimiter;
use crate::log::Logger;
use crate::provider::{
    AsyncReqwestClient, ChartProvider, HttpError, LastFmProvider, ProviderError, TopAlbumsQuery,
};
use crate::tile::{HttpImageFetcher, ImageFetcher};
use crate::{log_debug, log_info};
use image::RgbaImage;
use std::sync::Arc;
use thiserror::Error;

/// Reasons a grid build fails as a whole.
///
/// Individual tile failures never show up here; they become placeholders.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to fetch chart: {0}")]
    Provider(#[from] ProviderError),
}

/// Builder wired to the live Last.fm API over reqwest.
pub type LastFmGridBuilder =
    GridBuilder<LastFmProvider<AsyncReqwestClient>, HttpImageFetcher<AsyncReqwestClient>>;

/// Resolves a user's chart and renders it as a grid.
pub struct GridBuilder<P: ChartProvider, F: ImageFetcher> {
    provider: Arc<P>,
    assembler: GridAssembler<F>,
    logger: Arc<dyn Logger>,
}

impl<P: ChartProvider, F: ImageFetcher> GridBuilder<P, F> {
    pub fn new(
        provider: Arc<P>,
        fetcher: Arc<F>,
        limiter: Arc<ConcurrencyLimiter>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            provider,
            assembler: GridAssembler::new(fetcher, limiter, Arc::clone(&logger)),
            logger,
        }
    }

    /// Builds the grid image for `user`.
    ///
    /// Out-of-range sizes in `config` fall back to their defaults. The
    /// returned image is `grid_size * img_size_px` pixels square. A user
    /// with fewer ranked albums than cells gets transparent trailing cells.
    ///
    /// # Errors
    ///
    /// [`GridError::Config`] for a missing API key, before any network
    /// traffic. [`GridError::Provider`] when the chart lookup fails.
    pub async fn build(&self, config: &TilerConfig, user: &str) -> Result<RgbaImage, GridError> {
        let validated = config.validate()?;
        let grid = validated.grid;
        let total_cells = grid.total_cells();

        log_info!(
            self.logger,
            "Building {}x{} grid for {} ({}) via {}",
            grid.side_cells(),
            grid.side_cells(),
            user,
            validated.period,
            self.provider.name()
        );

        let query = TopAlbumsQuery {
            api_key: &validated.api_key,
            user,
            period: validated.period,
            limit: total_cells,
        };
        let items = self.provider.top_albums(&query).await?;

        if items.len() < total_cells {
            log_info!(
                self.logger,
                "{} has only {} ranked albums for {}; the remaining {} cells stay empty",
                user,
                items.len(),
                validated.period,
                total_cells - items.len()
            );
        }

        let assignments = assign_cells(&items, total_cells);
        log_debug!(
            self.logger,
            "{} of {} cells have artwork",
            assignments.iter().filter(|a| a.url.is_some()).count(),
            total_cells
        );

        Ok(self.assembler.assemble(grid, assignments).await)
    }
}

impl LastFmGridBuilder {
    /// Production wiring: Last.fm over one shared reqwest client, bounded by
    /// the process-wide limiter.
    pub fn lastfm(logger: Arc<dyn Logger>) -> Result<Self, HttpError> {
        let client = AsyncReqwestClient::new()?;
        Ok(Self::new(
            Arc::new(LastFmProvider::new(client.clone())),
            Arc::new(HttpImageFetcher::new(client)),
            ConcurrencyLimiter::global(),
            logger,
        ))
    }
}
