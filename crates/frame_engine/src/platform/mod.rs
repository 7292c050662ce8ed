//! Platform interfaces: frame capture, presentation and screen geometry
//!
//! Live backends (camera drivers, windows) plug in behind [`FrameSource`] and
//! [`DisplaySink`]. The [`replay`] module provides file-backed implementations
//! that run the whole loop headless.

pub mod replay;

use thiserror::Error;

use crate::input::KeyCode;
use crate::render::Frame;

/// Frame capture errors
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The source has no more frames to deliver
    #[error("Frame source exhausted")]
    Exhausted,

    /// The source could not be opened
    #[error("Failed to open frame source: {0}")]
    Open(String),

    /// A frame could not be decoded
    #[error("Failed to decode frame: {0}")]
    Decode(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Presentation errors
#[derive(Error, Debug)]
pub enum DisplayError {
    /// A frame could not be written out
    #[error("Failed to present frame: {0}")]
    Present(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A blocking producer of raster frames (a camera, a video, a directory of
/// images)
pub trait FrameSource {
    /// Block until the next frame is available
    fn capture(&mut self) -> Result<Frame, CaptureError>;

    /// Frame size this source delivers, if known
    fn resolution(&self) -> Option<(u32, u32)>;

    /// Release the underlying device. Called once when the loop exits.
    fn release(&mut self) {}
}

/// Presents frames to the user and reports key presses
pub trait DisplaySink {
    /// Show `frame`
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Short-blocking poll for a single pressed key
    fn poll_key(&mut self) -> Result<Option<KeyCode>, DisplayError>;

    /// Whether the display is still open. A closed display ends the loop.
    fn is_open(&self) -> bool {
        true
    }
}

/// Size of the screen the game is laid out on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ScreenGeometry {
    /// Create a screen geometry
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as a float, for ratio arithmetic
    pub fn width_f64(&self) -> f64 {
        f64::from(self.width)
    }

    /// Height as a float, for ratio arithmetic
    pub fn height_f64(&self) -> f64 {
        f64::from(self.height)
    }
}
