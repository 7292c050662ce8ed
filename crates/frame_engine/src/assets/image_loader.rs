//! Image loading utilities for sprites and backdrops
//!
//! Sprites keep their alpha channel for compositing; images without one are
//! expanded to fully opaque RGBA. Backdrops are loaded straight into the RGB
//! frame format.

use std::path::Path;
use image::{RgbaImage, Rgba};
use crate::assets::AssetError;
use crate::render::Frame;

/// Loaded RGBA sprite ready for compositing
#[derive(Debug, Clone)]
pub struct Sprite {
    image: RgbaImage,
}

impl Sprite {
    /// Load a sprite from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading sprite from: {:?}", path_ref);

        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image: {}", e)))?;

        let image = img.to_rgba8();
        let (width, height) = image.dimensions();

        log::info!("Loaded sprite {}x{} from {:?}", width, height, path_ref);

        Ok(Self { image })
    }

    /// Load a sprite from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image from bytes: {}", e)))?;

        let image = img.to_rgba8();
        log::debug!("Loaded sprite {}x{} from memory", image.width(), image.height());

        Ok(Self { image })
    }

    /// Create a solid color sprite (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, Rgba(color)) }
    }

    /// Sprite width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Sprite height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the pixel data
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Load an image file as an opaque RGB frame, dropping any alpha channel
pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<Frame, AssetError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Err(AssetError::NotFound(path_ref.display().to_string()));
    }

    let img = image::open(path_ref)
        .map_err(|e| AssetError::LoadFailed(format!("Failed to load image: {}", e)))?;

    let frame = img.to_rgb8();
    log::info!("Loaded frame {}x{} from {:?}", frame.width(), frame.height(), path_ref);
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_sprite() {
        let sprite = Sprite::solid_color(4, 3, [255, 0, 0, 128]);
        assert_eq!(sprite.width(), 4);
        assert_eq!(sprite.height(), 3);
        assert_eq!(sprite.image().get_pixel(3, 2).0, [255, 0, 0, 128]);
    }

    #[test]
    fn test_missing_sprite_is_not_found() {
        let result = Sprite::from_file("definitely/not/here.png");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_rgb_png_becomes_opaque_sprite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let sprite = Sprite::from_file(&path).unwrap();
        assert_eq!(sprite.image().get_pixel(1, 1).0, [10, 20, 30, 255]);

        let frame = load_frame(&path).unwrap();
        assert_eq!(frame.get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_garbage_bytes_fail_to_load() {
        let result = Sprite::from_bytes(b"not a png");
        assert!(matches!(result, Err(AssetError::LoadFailed(_))));
    }
}
