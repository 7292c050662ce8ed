//! Top-level error type for the game binary

use frame_engine::assets::AssetError;
use frame_engine::config::ConfigError;
use frame_engine::platform::{CaptureError, DisplayError};
use frame_engine::vision::TrackerError;
use frame_engine::EngineError;
use thiserror::Error;

/// Anything that can stop the game from starting or running
#[derive(Error, Debug)]
pub enum GameError {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A sprite or backdrop could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// The frame source could not be opened
    #[error("Frame source error: {0}")]
    Capture(#[from] CaptureError),

    /// The hand tracker could not be set up
    #[error("Hand tracker error: {0}")]
    Tracker(#[from] TrackerError),

    /// The display could not be set up
    #[error("Display error: {0}")]
    Display(#[from] DisplayError),

    /// The frame loop failed
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}
