//! Picture loading and fitting for display

use std::{io::Cursor, path::Path};

use image::{imageops::FilterType, ImageFormat};
use tracing::debug;

use crate::error::Result;

/// Largest size that fits in `max_width` x `max_height` with the same aspect ratio
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    let ratio = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let fitted_width = ((width as f64 * ratio) as u32).max(1);
    let fitted_height = ((height as f64 * ratio) as u32).max(1);
    (fitted_width, fitted_height)
}

/// Decode `path`, fit it into the box, and encode the result as PNG
pub fn load_and_fit(path: &Path, max_width: u32, max_height: u32) -> Result<Vec<u8>> {
    let image = image::open(path)?;
    let (width, height) = fit_dimensions(image.width(), image.height(), max_width, max_height);
    debug!(
        "Fitting {} from {}x{} to {}x{}",
        path.display(),
        image.width(),
        image.height(),
        width,
        height
    );

    let fitted = image.resize_exact(width, height, FilterType::Lanczos3);
    let mut bytes = Vec::new();
    fitted.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_keeps_aspect_ratio() {
        assert_eq!(fit_dimensions(1600, 1200, 800, 600), (800, 600));
        assert_eq!(fit_dimensions(2000, 1000, 800, 600), (800, 400));
        assert_eq!(fit_dimensions(1000, 2000, 800, 600), (300, 600));
    }

    #[test]
    fn test_fit_never_collapses_to_zero() {
        assert_eq!(fit_dimensions(10_000, 1, 800, 600), (800, 1));
    }

    #[test]
    fn test_load_and_fit_produces_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pose.png");
        image::RgbImage::new(40, 20).save(&path).unwrap();

        let bytes = load_and_fit(&path, 20, 20).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 10));
    }

    #[test]
    fn test_load_and_fit_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(load_and_fit(&path, 20, 20).is_err());
    }
}
