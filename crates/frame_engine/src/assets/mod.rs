//! Asset loading
//!
//! Sprites and backdrop images are decoded with the `image` crate. There is no
//! asset cache: a game loads its handful of images once at startup and shares
//! them by reference counting.

pub mod image_loader;

pub use image_loader::{Sprite, load_frame};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
