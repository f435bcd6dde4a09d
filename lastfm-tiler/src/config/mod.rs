//! Configuration for grid builds.
//!
//! [`TilerConfig`] carries the per-build settings (credential, chart period,
//! grid geometry). The process-wide tile concurrency cap is not part of it:
//! it lives with the limiter, see [`crate::limiter::POOL_SIZE_ENV`].

mod period;
mod tiler;

pub use period::Period;
pub use tiler::{
    lenient_size, TilerConfig, ValidatedConfig, DEFAULT_GRID_SIZE, DEFAULT_IMG_SIZE_PX,
    MAX_CANVAS_SIDE_PX,
};

use thiserror::Error;

/// Configuration problems detected before any work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a Last.fm API key is required")]
    MissingApiKey,

    #[error("a {grid_size}x{grid_size} grid of {img_size_px}px covers exceeds the {max}px canvas limit", max = MAX_CANVAS_SIDE_PX)]
    CanvasTooLarge { grid_size: u32, img_size_px: u32 },

    #[error("unknown period '{0}', expected one of overall|7day|1month|3month|6month|12month")]
    InvalidPeriod(String),
}
