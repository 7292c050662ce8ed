//! Bouncing asteroid

use std::rc::Rc;

use frame_engine::assets::Sprite;
use frame_engine::foundation::math::{reflect_component, IVec2};
use frame_engine::render::{self, Frame};

/// An asteroid drifting across the screen and bouncing off its margins
#[derive(Debug, Clone)]
pub struct Asteroid {
    position: IVec2,
    velocity: IVec2,
    sprite: Rc<Sprite>,
}

impl Asteroid {
    /// Create an asteroid
    pub fn new(position: IVec2, velocity: IVec2, sprite: Rc<Sprite>) -> Self {
        Self { position, velocity, sprite }
    }

    /// Top-left corner in screen pixels
    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// Displacement applied per frame
    pub fn velocity(&self) -> IVec2 {
        self.velocity
    }

    /// Advance one frame.
    ///
    /// Each axis reflects independently: when the coordinate is at or past
    /// `dimension - dimension * boundary_margin`, or at or below zero, that
    /// velocity component changes sign. The (possibly reflected) velocity is
    /// then added to the position. Position is never clamped, so an asteroid
    /// can overshoot a boundary by up to one step before coming back.
    pub fn move_within(&mut self, screen_width: u32, screen_height: u32, boundary_margin: f64) {
        let (width, height) = (f64::from(screen_width), f64::from(screen_height));
        let margin_x = width * boundary_margin;
        let margin_y = height * boundary_margin;

        self.velocity.y = reflect_component(f64::from(self.position.y), self.velocity.y, 0.0, height - margin_y);
        self.velocity.x = reflect_component(f64::from(self.position.x), self.velocity.x, 0.0, width - margin_x);

        self.position += self.velocity;
    }

    /// Composite the sprite onto `frame` at the current position
    pub fn draw(&self, mut frame: Frame) -> Frame {
        render::overlay(&mut frame, &self.sprite, self.position);
        frame
    }
}
