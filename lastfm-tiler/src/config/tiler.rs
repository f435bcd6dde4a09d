//! Grid build settings.

use super::{ConfigError, Period};
use crate::grid::GridSpec;

/// Default number of cells along one side of the grid.
pub const DEFAULT_GRID_SIZE: u32 = 3;

/// Default side of one album cover, in pixels. 174 is the native size of
/// Last.fm's "large" rendition.
pub const DEFAULT_IMG_SIZE_PX: u32 = 174;

/// Largest accepted canvas side in pixels (a 1 GiB RGBA buffer).
pub const MAX_CANVAS_SIDE_PX: u32 = 16_384;

/// Settings for building one grid.
///
/// Zero sizes are not rejected: [`TilerConfig::validate`] silently
/// replaces them with the defaults. A missing API key, or a canvas wider
/// than [`MAX_CANVAS_SIDE_PX`], is an error.
///
/// # Example
///
/// ```
/// use lastfm_tiler::config::{Period, TilerConfig};
///
/// let config = TilerConfig::new("my-api-key")
///     .with_period(Period::OneMonth)
///     .with_grid_size(4);
///
/// let validated = config.validate().unwrap();
/// assert_eq!(validated.grid.side_cells(), 4);
/// assert_eq!(validated.grid.cell_size_px(), 174);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilerConfig {
    /// Last.fm API key (required)
    api_key: String,
    /// Chart period, default 7day
    period: Period,
    /// Cells per side, default 3
    grid_size: u32,
    /// Pixels per cell side, default 174. Upscaling doesn't add detail.
    img_size_px: u32,
}

/// A configuration that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    pub api_key: String,
    pub period: Period,
    pub grid: GridSpec,
}

impl TilerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Zero means "use the default".
    pub fn with_grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Zero means "use the default".
    pub fn with_img_size_px(mut self, img_size_px: u32) -> Self {
        self.img_size_px = img_size_px;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn img_size_px(&self) -> u32 {
        self.img_size_px
    }

    /// Applies defaults, then checks the credential and the canvas size.
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let side = if self.grid_size == 0 {
            DEFAULT_GRID_SIZE
        } else {
            self.grid_size
        };
        let cell = if self.img_size_px == 0 {
            DEFAULT_IMG_SIZE_PX
        } else {
            self.img_size_px
        };

        side.checked_mul(cell)
            .filter(|&canvas| canvas <= MAX_CANVAS_SIDE_PX)
            .ok_or(ConfigError::CanvasTooLarge {
                grid_size: side,
                img_size_px: cell,
            })?;

        Ok(ValidatedConfig {
            api_key: api_key.to_string(),
            period: self.period,
            grid: GridSpec::new(side, cell),
        })
    }
}

impl Default for TilerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            period: Period::default(),
            grid_size: DEFAULT_GRID_SIZE,
            img_size_px: DEFAULT_IMG_SIZE_PX,
        }
    }
}

/// Converts a signed size from an outer surface (CLI flag, settings file)
/// into the unsigned form; negatives become zero and so pick up defaults.
pub fn lenient_size(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
