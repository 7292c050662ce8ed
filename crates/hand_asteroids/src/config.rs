//! Game configuration
//!
//! Every tunable of the game lives here and is injected into the session at
//! construction. The binary reads `hand_asteroids.toml` from the working
//! directory when it exists; any section or field left out keeps its default.

use frame_engine::config::{Config, ConfigError};
use frame_engine::input::KeyCode;
use frame_engine::platform::replay::ScriptedKey;
use frame_engine::platform::ScreenGeometry;
use frame_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Default configuration file name
pub const CONFIG_PATH: &str = "hand_asteroids.toml";

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Display settings
    pub display: DisplayConfig,

    /// Asset paths
    pub assets: AssetsConfig,

    /// Controls settings
    pub controls: ControlsConfig,

    /// Replay backend settings
    pub replay: ReplayConfig,
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Number of asteroids in play
    pub asteroid_count: usize,

    /// Fraction of each screen dimension reserved as a bounce zone
    pub boundary_margin: f64,

    /// Lower edge of the spawn band, as a fraction of each dimension
    pub spawn_band_min: f64,

    /// Upper edge of the spawn band, as a fraction of each dimension
    pub spawn_band_max: f64,

    /// Minimum speed per axis, pixels per frame
    pub min_speed: i32,

    /// Maximum speed per axis, pixels per frame
    pub max_speed: i32,

    /// Horizontal offset from the ship position to its collision point
    pub collision_offset: i32,

    /// Per-axis distance below which an asteroid hits the ship
    pub collision_threshold: i32,

    /// Score points per second survived
    pub score_multiplier: f64,

    /// Fixed RNG seed; a random seed is used when unset
    pub rng_seed: Option<u64>,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Screen width the game is laid out on
    pub width: u32,

    /// Screen height the game is laid out on
    pub height: u32,

    /// Mirror the camera image
    pub mirror: bool,

    /// Weight of the camera image in the backdrop blend
    pub camera_weight: f32,

    /// Weight of the background image in the backdrop blend
    pub background_weight: f32,

    /// Window title
    pub window_title: String,
}

/// Asset paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Background image blended under the camera feed
    pub background: String,

    /// Asteroid sprite (PNG, alpha respected)
    pub asteroid: String,

    /// Spaceship sprite (PNG, alpha respected)
    pub spaceship: String,

    /// TrueType font for status text; the engine's bundled font when unset
    pub font: Option<String>,
}

/// Controls configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Key that quits from any state
    pub exit_key: KeyCode,

    /// Key that restarts after a game over
    pub restart_key: KeyCode,
}

/// Replay backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Directory of PNG frames standing in for the camera
    pub frames_dir: String,

    /// RON file of recorded hand detections, one list per frame
    pub hands_file: String,

    /// Where presented frames are written; nothing is written when unset
    pub output_dir: Option<String>,

    /// Close the display after this many key polls
    pub max_polls: Option<u64>,

    /// Scripted key presses
    pub keys: Vec<ScriptedKey>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            gameplay: GameplayConfig::default(),
            display: DisplayConfig::default(),
            assets: AssetsConfig::default(),
            controls: ControlsConfig::default(),
            replay: ReplayConfig::default(),
        }
    }
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            asteroid_count: 4,
            boundary_margin: 0.36,
            spawn_band_min: 0.35,
            spawn_band_max: 0.55,
            min_speed: 10,
            max_speed: 20,
            collision_offset: 80,
            collision_threshold: 50,
            score_multiplier: 17.5,
            rng_seed: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            mirror: true,
            camera_weight: 0.8,
            background_weight: 0.2,
            window_title: "Spaceship Game".to_string(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            background: "resources/Background.png".to_string(),
            asteroid: "resources/Asteroid_img.png".to_string(),
            spaceship: "resources/spaceship_img.png".to_string(),
            font: None,
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            exit_key: KeyCode::Escape,
            restart_key: KeyCode::Space,
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            frames_dir: "replay/frames".to_string(),
            hands_file: "replay/hands.ron".to_string(),
            output_dir: Some("replay/out".to_string()),
            max_polls: Some(100_000),
            keys: Vec::new(),
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gameplay.validate()?;

        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "display size must be non-zero, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        if self.display.camera_weight < 0.0 || self.display.background_weight < 0.0 {
            return Err(ConfigError::Invalid("blend weights must not be negative".to_string()));
        }
        if self.controls.exit_key == self.controls.restart_key {
            return Err(ConfigError::Invalid(format!(
                "exit and restart are both bound to {:?}",
                self.controls.exit_key
            )));
        }
        Ok(())
    }

    /// Screen the game is laid out on
    pub fn screen(&self) -> ScreenGeometry {
        ScreenGeometry::new(self.display.width, self.display.height)
    }

    /// Engine settings derived from this configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            mirror: self.display.mirror,
            camera_weight: self.display.camera_weight,
            background_weight: self.display.background_weight,
            exit_key: self.controls.exit_key,
            restart_key: self.controls.restart_key,
        }
    }
}

impl GameplayConfig {
    /// Check gameplay value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..0.5).contains(&self.boundary_margin) {
            return Err(ConfigError::Invalid(format!(
                "boundary_margin must be in [0, 0.5), got {}",
                self.boundary_margin
            )));
        }
        if !(0.0..=1.0).contains(&self.spawn_band_min)
            || !(0.0..=1.0).contains(&self.spawn_band_max)
            || self.spawn_band_min > self.spawn_band_max
        {
            return Err(ConfigError::Invalid(format!(
                "spawn band [{}, {}] must be an ordered range within [0, 1]",
                self.spawn_band_min, self.spawn_band_max
            )));
        }
        if self.min_speed > self.max_speed {
            return Err(ConfigError::Invalid(format!(
                "min_speed {} exceeds max_speed {}",
                self.min_speed, self.max_speed
            )));
        }
        if self.collision_threshold < 0 {
            return Err(ConfigError::Invalid("collision_threshold must not be negative".to_string()));
        }
        if !self.score_multiplier.is_finite() || self.score_multiplier < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "score_multiplier must be a non-negative number, got {}",
                self.score_multiplier
            )));
        }
        Ok(())
    }
}
