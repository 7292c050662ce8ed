//! Core engine implementation

use crate::{
    application::Application,
    foundation::time::Timer,
    input::KeyCode,
    platform::{DisplayError, DisplaySink, FrameSource},
    render::{self, Frame, RenderError},
    vision::{HandTracker, TrackerError},
};
use thiserror::Error;

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// A round is in progress
    Playing,
    /// The round ended; waiting for restart or exit
    GameOver,
}

/// Why [`Engine::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The exit key was pressed
    ExitRequested,
    /// The frame source failed; the session cannot continue
    CaptureFailed,
    /// The display was closed
    DisplayClosed,
}

/// Main engine struct
///
/// The engine owns the frame source, the hand tracker and the display, and
/// drives one blocking, single-threaded loop:
/// capture, mirror, detect, blend, update, present, poll input.
pub struct Engine<S, T, D> {
    source: S,
    tracker: T,
    sink: D,

    /// Backdrop blended under every captured frame
    background: Option<Frame>,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    state: LoopState,
}

impl<S: FrameSource, T: HandTracker, D: DisplaySink> Engine<S, T, D> {
    /// Create a new engine instance
    pub fn new(source: S, tracker: T, sink: D, config: EngineConfig) -> Self {
        log::info!("Initializing engine...");
        if let Some((width, height)) = source.resolution() {
            log::info!("Frame source resolution {}x{}", width, height);
        }

        Self {
            source,
            tracker,
            sink,
            background: None,
            timer: Timer::new(),
            config,
            state: LoopState::Playing,
        }
    }

    /// Blend `background` under every captured frame. It is resampled to the
    /// frame size the first time the sizes differ.
    pub fn with_background(mut self, background: Frame) -> Self {
        self.background = Some(background);
        self
    }

    /// Run the engine main loop with the given application
    ///
    /// Returns why the loop stopped. Capture failures end the loop normally
    /// with [`ExitReason::CaptureFailed`]; tracker, display and application
    /// failures are returned as errors. The source is released on every path.
    pub fn run<A: Application>(&mut self, app: &mut A) -> Result<ExitReason, EngineError> {
        log::info!("Starting main loop...");
        self.state = LoopState::Playing;

        let result = self.run_loop(app);

        self.source.release();
        app.cleanup();

        log::info!(
            "Engine shutdown complete after {} frames ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        result
    }

    fn run_loop<A: Application>(&mut self, app: &mut A) -> Result<ExitReason, EngineError> {
        loop {
            if !self.sink.is_open() {
                log::info!("Display closed");
                return Ok(ExitReason::DisplayClosed);
            }

            let frame = match self.source.capture() {
                Ok(frame) => frame,
                Err(e) => {
                    log::error!("Error capturing video: {}", e);
                    return Ok(ExitReason::CaptureFailed);
                }
            };

            let frame = self.step(app, frame)?;
            self.sink.present(&frame)?;
            self.timer.update();

            if self.sink.poll_key()? == Some(self.config.exit_key) {
                log::info!("Exit requested");
                return Ok(ExitReason::ExitRequested);
            }

            if app.is_game_over() {
                self.state = LoopState::GameOver;
                log::info!("Game over after {} frames", self.timer.frame_count());

                let screen = app.game_over_screen(&frame);
                self.sink.present(&screen)?;

                if let Some(reason) = self.wait_for_restart(app)? {
                    return Ok(reason);
                }
            }
        }
    }

    /// Process one captured frame up to the point of presentation
    fn step<A: Application>(&mut self, app: &mut A, mut frame: Frame) -> Result<Frame, EngineError> {
        if self.config.mirror {
            render::mirror(&mut frame);
        }

        let hands = self.tracker.find_hands(&frame)?;
        log::trace!("Detected {} hand(s)", hands.len());

        if let Some(background) = &mut self.background {
            if background.dimensions() != frame.dimensions() {
                *background = render::resize_to(background, frame.width(), frame.height());
            }
            render::blend_weighted(
                &mut frame,
                background,
                self.config.camera_weight,
                self.config.background_weight,
            )?;
        }

        app.update(frame, &hands)
            .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))
    }

    /// Poll keys until restart or exit. `None` means the round restarted.
    fn wait_for_restart<A: Application>(&mut self, app: &mut A) -> Result<Option<ExitReason>, EngineError> {
        loop {
            if !self.sink.is_open() {
                log::info!("Display closed while game over");
                return Ok(Some(ExitReason::DisplayClosed));
            }

            match self.sink.poll_key()? {
                Some(key) if key == self.config.exit_key => {
                    log::info!("Exit requested");
                    return Ok(Some(ExitReason::ExitRequested));
                }
                Some(key) if key == self.config.restart_key => {
                    log::info!("Restarting");
                    app.reset();
                    self.state = LoopState::Playing;
                    return Ok(None);
                }
                Some(key) => log::debug!("Ignoring {:?} while game over", key),
                None => {}
            }
        }
    }

    /// Current loop state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of frames processed so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Get the frame source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the hand tracker
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Get the display sink
    pub fn sink(&self) -> &D {
        &self.sink
    }
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Flip captured frames horizontally before detection
    pub mirror: bool,

    /// Weight of the camera frame when blending with the background
    pub camera_weight: f32,

    /// Weight of the background when blending with the camera frame
    pub background_weight: f32,

    /// Key that ends the program from any state
    pub exit_key: KeyCode,

    /// Key that starts a new round from the game-over state
    pub restart_key: KeyCode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mirror: true,
            camera_weight: 0.8,
            background_weight: 0.2,
            exit_key: KeyCode::Escape,
            restart_key: KeyCode::Space,
        }
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Hand tracking error
    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),

    /// Display error
    #[error("Display error: {0}")]
    Display(#[from] DisplayError),

    /// Compositing error
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
