//! Hand-controlled spaceship

use std::rc::Rc;

use frame_engine::assets::Sprite;
use frame_engine::foundation::math::{ivec2, IVec2};
use frame_engine::render::{self, Frame};
use frame_engine::vision::HandDetection;

/// The player ship. It follows the tracked hand with no smoothing.
#[derive(Debug, Clone)]
pub struct Spaceship {
    position: IVec2,
    sprite: Rc<Sprite>,
}

impl Spaceship {
    /// Create a ship at the top-left corner
    pub fn new(sprite: Rc<Sprite>) -> Self {
        Self { position: ivec2(0, 0), sprite }
    }

    /// Top-left corner in screen pixels
    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// Move the ship to the hand.
    ///
    /// The sprite is centered vertically on the top of the hand's bounding
    /// box, then y is clamped to `[0, screen_height]`. x follows the box's
    /// left edge unclamped.
    pub fn update_position(&mut self, hand: &HandDetection, screen_height: u32) {
        let half_height = self.sprite.height() as i32 / 2;
        let target_y = hand.bbox.y.saturating_sub(half_height);
        let max_y = i32::try_from(screen_height).unwrap_or(i32::MAX);

        self.position = ivec2(hand.bbox.x, target_y.clamp(0, max_y));
    }

    /// Composite the sprite onto `frame` at the current position
    pub fn draw(&self, mut frame: Frame) -> Frame {
        render::overlay(&mut frame, &self.sprite, self.position);
        frame
    }
}
