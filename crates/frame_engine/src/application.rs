//! Application trait and lifecycle management

use thiserror::Error;

use crate::render::Frame;
use crate::vision::HandDetection;

/// Application lifecycle trait
///
/// Implement this trait to create a game driven by the engine loop. The
/// engine owns all I/O; the application only turns a frame plus the hands
/// detected in it into the frame to present.
pub trait Application {
    /// Update the application
    ///
    /// Called once per captured frame, after mirroring and background
    /// blending. Implement your game logic here and return the frame to show.
    ///
    /// # Arguments
    /// * `frame` - The composited camera frame
    /// * `hands` - Hands detected in this frame, in detector order
    fn update(&mut self, frame: Frame, hands: &[HandDetection]) -> Result<Frame, AppError>;

    /// Whether the current round has ended
    fn is_game_over(&self) -> bool;

    /// Render the screen shown while waiting for a restart
    fn game_over_screen(&self, frame: &Frame) -> Frame {
        frame.clone()
    }

    /// Start a new round after a game over
    fn reset(&mut self);

    /// Cleanup the application
    ///
    /// Called once when the loop exits, for any reason.
    fn cleanup(&mut self) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}
