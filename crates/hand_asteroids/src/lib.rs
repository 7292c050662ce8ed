//! # Hand Asteroids
//!
//! Dodge bouncing asteroids by steering a spaceship with your hand.
//!
//! The camera feed is mirrored, blended with a backdrop, and the ship follows
//! the tracked hand. Touching an asteroid ends the round with a score based
//! on survival time; the restart key starts a new round, the exit key quits.
//!
//! [`run`] wires a [`GameSession`] into the [`frame_engine`] loop using the
//! file-backed replay backends named in [`GameConfig`].

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod assets;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;

use std::path::PathBuf;

use frame_engine::foundation::time::SystemClock;
use frame_engine::platform::replay::{FrameDumpSink, ImageSequenceSource, ScriptedHandTracker};
use frame_engine::{Engine, ExitReason};

pub use assets::GameAssets;
pub use config::GameConfig;
pub use error::GameError;
pub use game::GameSession;

/// Load assets, build the replay backends and play until the loop stops
pub fn run(config: &GameConfig) -> Result<ExitReason, GameError> {
    config.validate()?;

    let assets = GameAssets::load(&config.assets)?;

    let replay = &config.replay;
    let source = ImageSequenceSource::open(&replay.frames_dir)?;
    let tracker = ScriptedHandTracker::from_file(&replay.hands_file)?;
    let sink = FrameDumpSink::new(
        replay.output_dir.as_ref().map(PathBuf::from),
        replay.keys.clone(),
        replay.max_polls,
    )?;

    let mut session = GameSession::new(
        config.gameplay.clone(),
        config.screen(),
        assets.asteroid,
        assets.spaceship,
        assets.text,
        Box::new(SystemClock::new()),
    );

    let mut engine = Engine::new(source, tracker, sink, config.engine_config())
        .with_background(assets.background);
    let reason = engine.run(&mut session)?;

    log::info!("Stopped: {:?}", reason);
    Ok(reason)
}
