//! # Rendering System
//!
//! Software compositing over `image` buffers. Every frame that flows through
//! the engine is an 8-bit RGB [`Frame`]; sprites are RGBA and are alpha
//! blended onto frames at integer pixel positions.
//!
//! ## Architecture
//!
//! - **Compositor**: sprite overlay, weighted frame blending, mirroring, dimming
//! - **Text**: `fontdue` glyph rasterization blended onto frames, with a
//!   bundled monospace face for status text
//!
//! Coordinates are top-left origin. Anything drawn partly off-frame is
//! clipped, never rejected.

pub mod compositor;
pub mod text;

pub use compositor::{overlay, blend_weighted, mirror, dim, resize_to};
pub use text::TextRenderer;

use thiserror::Error;

/// A raster frame as captured, composited and presented by the engine
pub type Frame = image::RgbImage;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Two frames that must share dimensions do not
    #[error("Frame size mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    SizeMismatch {
        /// Width of the destination frame
        left_width: u32,
        /// Height of the destination frame
        left_height: u32,
        /// Width of the blended frame
        right_width: u32,
        /// Height of the blended frame
        right_height: u32,
    },
}
