//! Bitmap decoding for sprite and screen images
//!
//! Supports whatever the `image` crate decodes (PNG and JPEG in practice).
//! Images without an alpha channel come out fully opaque.

use std::path::Path;

use super::AssetLoadError;

/// Decoded bitmap in RGBA format, ready for rendering
#[derive(Debug, Clone)]
pub struct DecodedBitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
}

impl DecodedBitmap {
    /// Decode an image file from disk
    pub fn open(path: &Path) -> Result<Self, AssetLoadError> {
        let img = image::open(path).map_err(|source| AssetLoadError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Solid single-color bitmap
    #[cfg(test)]
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&rgba);
        }
        Self { width, height, pixels }
    }

    /// RGBA of the pixel at (x, y), or None outside the bitmap
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_bitmap_has_uniform_pixels() {
        let bmp = DecodedBitmap::solid(3, 2, [10, 20, 30, 255]);
        assert_eq!(bmp.pixels.len(), 3 * 2 * 4);
        assert_eq!(bmp.pixel(2, 1), Some([10, 20, 30, 255]));
        assert_eq!(bmp.pixel(3, 0), None);
    }

    #[test]
    fn missing_file_is_an_asset_error() {
        let err = DecodedBitmap::open(Path::new("/nonexistent/lanerush/car.png")).unwrap_err();
        assert!(matches!(err, AssetLoadError::Image { .. }));
        assert!(err.to_string().contains("car.png"));
    }
}
