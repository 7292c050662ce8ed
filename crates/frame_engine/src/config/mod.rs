//! Configuration system

pub use serde::{Serialize, Deserialize};

use std::path::Path;

/// Configuration trait
///
/// Implementors get TOML and RON file loading for free; the format is picked
/// from the file extension.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Load configuration from file, falling back to defaults when the file
    /// does not exist. A file that exists but fails to parse is still an error.
    fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        if Path::new(path).exists() {
            log::info!("Loading configuration from {}", path);
            Self::load_from_file(path)
        } else {
            log::info!("No configuration at {}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values parsed but failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
