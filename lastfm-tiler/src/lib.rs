//! lastfm-tiler - Album cover grids from Last.fm listening charts
//!
//! Looks up a user's top albums for a period and pastes their cover art,
//! row by row, onto one square image. Covers are fetched concurrently under
//! a process-wide cap; a cover that can't be fetched leaves a transparent
//! cell instead of failing the grid.
//!
//! # High-Level API
//!
//! ```ignore
//! use lastfm_tiler::config::{Period, TilerConfig};
//! use lastfm_tiler::grid::LastFmGridBuilder;
//! use lastfm_tiler::log::TracingLogger;
//! use std::sync::Arc;
//!
//! let builder = LastFmGridBuilder::lastfm(Arc::new(TracingLogger))?;
//! let config = TilerConfig::new(api_key).with_period(Period::OneMonth);
//! let image = builder.build(&config, "rj").await?;
//! image.save("rj.png")?;
//! ```

pub mod config;
pub mod grid;
pub mod limiter;
pub mod log;
pub mod logging;
pub mod provider;
pub mod tile;

/// Version of the library and CLI, from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
