//! Square tile rasters.
//!
//! Both functions are pure and cannot fail.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbaImage};

/// Resamples `source` to exactly `side`×`side` with a Lanczos3 filter.
///
/// The aspect ratio is not preserved; non-square covers are stretched.
/// Upscaling is allowed but adds no detail: a 64px cover blown up to 300px
/// still looks like a 64px cover.
///
/// A source that already has the target size is only converted to RGBA.
pub fn resize(source: &DynamicImage, side: u32) -> RgbaImage {
    if source.dimensions() == (side, side) {
        return source.to_rgba8();
    }
    imageops::resize(source, side, side, FilterType::Lanczos3)
}

/// A fully transparent `side`×`side` raster.
pub fn placeholder(side: u32) -> RgbaImage {
    RgbaImage::new(side, side)
}
