//! # Frame Engine
//!
//! A small, single-threaded frame-loop engine for camera-driven 2D games.
//!
//! ## Features
//!
//! - **Frame Loop**: capture, mirror, hand detection, background blend,
//!   update, present and key polling, with a playing / game-over state machine
//! - **Software Compositing**: alpha-blended sprite overlay on `image` buffers
//! - **Text**: `fontdue`-rasterized status text with a bundled font
//! - **Pluggable I/O**: camera, hand tracker and display behind traits, with
//!   file-backed replay implementations
//! - **Configuration**: TOML and RON config files through serde
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use frame_engine::prelude::*;
//! use frame_engine::platform::replay::{FrameDumpSink, ImageSequenceSource, ScriptedHandTracker};
//!
//! struct MyGame { over: bool }
//!
//! impl Application for MyGame {
//!     fn update(&mut self, frame: Frame, hands: &[HandDetection]) -> Result<Frame, AppError> {
//!         // Update game logic
//!         self.over = hands.is_empty();
//!         Ok(frame)
//!     }
//!
//!     fn is_game_over(&self) -> bool {
//!         self.over
//!     }
//!
//!     fn reset(&mut self) {
//!         self.over = false;
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = ImageSequenceSource::open("frames")?;
//!     let tracker = ScriptedHandTracker::from_file("hands.ron")?;
//!     let sink = FrameDumpSink::new(None, Vec::new(), None)?;
//!     let mut engine = Engine::new(source, tracker, sink, EngineConfig::default());
//!     engine.run(&mut MyGame { over: false })?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;
pub mod input;
pub mod vision;
pub mod platform;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineConfig, EngineError, ExitReason, LoopState};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineConfig, EngineError, ExitReason, LoopState,
        foundation::{
            math::{IVec2, ivec2},
            time::{Clock, SystemClock, ManualClock},
        },
        config::{Config, ConfigError},
        assets::{Sprite, AssetError},
        render::{Frame, TextRenderer},
        input::KeyCode,
        vision::{BoundingBox, HandDetection, HandTracker},
        platform::{DisplaySink, FrameSource, ScreenGeometry},
    };
}
