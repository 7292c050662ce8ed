//! Text rendering onto frames
//!
//! Glyphs are rasterized with `fontdue` and their coverage bitmaps are alpha
//! blended straight onto a [`Frame`]. A DejaVu Sans Mono Bold face ships with
//! the engine so status text works without any font on disk.

use std::path::Path;

use fontdue::{Font, FontSettings};
use image::Rgb;

use crate::assets::AssetError;
use crate::foundation::math::IVec2;
use crate::render::Frame;

const BUNDLED_FONT: &[u8] = include_bytes!("../../resources/fonts/DejaVuSansMono-Bold.ttf");

/// A loaded font face that draws single lines of text
pub struct TextRenderer {
    font: Font,
}

impl TextRenderer {
    /// Parse TrueType/OpenType font data
    pub fn from_bytes(font_data: &[u8]) -> Result<Self, AssetError> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| AssetError::LoadFailed(format!("fontdue error: {}", e)))?;
        Ok(Self { font })
    }

    /// Load a font file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        let bytes = std::fs::read(path_ref)?;
        let renderer = Self::from_bytes(&bytes)?;
        log::info!("Loaded font from {:?}", path_ref);
        Ok(renderer)
    }

    /// The font bundled with the engine
    pub fn bundled() -> Result<Self, AssetError> {
        Self::from_bytes(BUNDLED_FONT)
    }

    /// Distance from the top of a line to its baseline at `px`
    fn ascent(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map_or(px, |metrics| metrics.ascent)
    }

    /// Advance width of `text` at `px`, rounded up to whole pixels
    pub fn text_width(&self, text: &str, px: f32) -> u32 {
        let width: f32 = text
            .chars()
            .map(|c| self.font.metrics(c, px).advance_width)
            .sum();
        width.ceil() as u32
    }

    /// Height of one line (ascent to descent) at `px`
    pub fn line_height(&self, px: f32) -> u32 {
        self.font
            .horizontal_line_metrics(px)
            .map_or(px, |metrics| metrics.ascent - metrics.descent)
            .ceil() as u32
    }

    /// Draw `text` with the top-left of its line box at `origin`. Coverage is
    /// blended over the frame with `color`; anything off-frame is clipped.
    pub fn draw_text(&self, frame: &mut Frame, text: &str, origin: IVec2, px: f32, color: Rgb<u8>) {
        let (width, height) = (i64::from(frame.width()), i64::from(frame.height()));
        let baseline = i64::from(origin.y) + self.ascent(px).round() as i64;
        let mut cursor = f64::from(origin.x);

        for c in text.chars() {
            let (metrics, coverage) = self.font.rasterize(c, px);
            let left = cursor.round() as i64 + i64::from(metrics.xmin);
            let top = baseline - i64::from(metrics.ymin) - metrics.height as i64;
            cursor += f64::from(metrics.advance_width);

            for (index, &alpha) in coverage.iter().enumerate() {
                if alpha == 0 {
                    continue;
                }
                let x = left + (index % metrics.width) as i64;
                let y = top + (index / metrics.width) as i64;
                if x < 0 || y < 0 || x >= width || y >= height {
                    continue;
                }

                let alpha = u32::from(alpha);
                let pixel = frame.get_pixel_mut(x as u32, y as u32);
                for channel in 0..3 {
                    let blended = u32::from(color.0[channel]) * alpha
                        + u32::from(pixel.0[channel]) * (255 - alpha);
                    pixel.0[channel] = ((blended + 127) / 255) as u8;
                }
            }
        }
    }
}
