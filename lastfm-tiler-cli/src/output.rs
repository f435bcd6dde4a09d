//! Writing finished grids to disk.

use crate::error::CliError;
use clap::ValueEnum;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// JPEG quality for written grids. Covers are already lossy.
pub const JPEG_QUALITY: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JPEG at quality 100; empty cells become black
    Jpeg,
    /// PNG; empty cells stay transparent
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// `<dir>/<user>.<ext>`, with path separators in the user name replaced.
pub fn output_path(dir: &Path, user: &str, format: OutputFormat) -> PathBuf {
    let stem: String = user
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    dir.join(format!("{}.{}", stem, format.extension()))
}

/// Drops the alpha channel. Transparent cells end up black.
pub fn flatten(image: RgbaImage) -> RgbImage {
    DynamicImage::ImageRgba8(image).to_rgb8()
}

/// Encodes `image` to `path` in `format`.
pub fn write_grid(image: RgbaImage, path: &Path, format: OutputFormat) -> Result<(), CliError> {
    let file_err = |error: image::ImageError| CliError::FileWrite {
        path: path.to_path_buf(),
        error,
    };

    match format {
        OutputFormat::Jpeg => {
            let file = File::create(path).map_err(|e| file_err(e.into()))?;
            let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
            encoder.encode_image(&flatten(image)).map_err(file_err)
        }
        OutputFormat::Png => image.save_with_format(path, ImageFormat::Png).map_err(file_err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn scratch_dir(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("lastfm_tiler_cli_{}_{}", tag, nanos));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_output_path() {
        let dir = Path::new("out");
        assert_eq!(
            output_path(dir, "rj", OutputFormat::Jpeg),
            PathBuf::from("out/rj.jpg")
        );
        assert_eq!(
            output_path(dir, "a/b", OutputFormat::Png),
            PathBuf::from("out/a_b.png")
        );
    }

    #[test]
    fn test_flatten_transparent_to_black() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        let rgb = flatten(image);

        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(rgb.get_pixel(1, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_png_keeps_transparency() {
        let dir = scratch_dir("png");
        let path = dir.join("grid.png");
        let mut image = RgbaImage::new(4, 4);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));

        write_grid(image, &path, OutputFormat::Png).unwrap();

        let read = image::open(&path).unwrap().to_rgba8();
        assert_eq!(read.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(read.get_pixel(3, 3)[3], 0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_jpeg_written() {
        let dir = scratch_dir("jpeg");
        let path = dir.join("grid.jpg");

        write_grid(RgbaImage::new(8, 8), &path, OutputFormat::Jpeg).unwrap();

        let read = image::open(&path).unwrap();
        assert_eq!((read.width(), read.height()), (8, 8));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_directory_is_file_error() {
        let path = Path::new("/nonexistent-lastfm-tiler-dir/grid.png");
        let err = write_grid(RgbaImage::new(1, 1), path, OutputFormat::Png).unwrap_err();
        assert!(matches!(err, CliError::FileWrite { .. }));
    }
}
