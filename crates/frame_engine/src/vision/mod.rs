//! Hand-tracking interface
//!
//! The engine does not detect hands itself. A [`HandTracker`] turns a frame
//! into an ordered list of [`HandDetection`]s; the loop hands that list to the
//! application untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::{ivec2, IVec2};
use crate::render::Frame;

/// Axis-aligned rectangle `(x, y, width, height)` in frame pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl BoundingBox {
    /// Create a bounding box
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner
    pub fn origin(&self) -> IVec2 {
        ivec2(self.x, self.y)
    }

    /// Center point, rounded towards the top-left
    pub fn center(&self) -> IVec2 {
        ivec2(self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Which hand a detection belongs to, when the tracker can tell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    /// Left hand
    Left,
    /// Right hand
    Right,
}

/// A single detected hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandDetection {
    /// Screen-space extent of the hand
    pub bbox: BoundingBox,
    /// Left or right hand, if known
    #[serde(default)]
    pub handedness: Option<Handedness>,
}

impl HandDetection {
    /// Detection with only a bounding box
    pub const fn from_bbox(bbox: BoundingBox) -> Self {
        Self { bbox, handedness: None }
    }

    /// Center of the hand's bounding box
    pub fn center(&self) -> IVec2 {
        self.bbox.center()
    }
}

/// Hand-tracking errors
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Detection data could not be loaded
    #[error("Failed to load detections: {0}")]
    Load(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces hand detections for frames, one call per frame
pub trait HandTracker {
    /// Detect hands in `frame`, in detector order. An empty list means no
    /// hand was found.
    fn find_hands(&mut self, frame: &Frame) -> Result<Vec<HandDetection>, TrackerError>;
}
