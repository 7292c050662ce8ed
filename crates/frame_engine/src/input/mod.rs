//! Keyboard input
//!
//! Display backends report at most one pressed key per poll, as a raw key
//! code. [`KeyCode`] names the keys games bind to and keeps everything else
//! as [`KeyCode::Other`].

use serde::{Deserialize, Serialize};

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// Escape key
    Escape,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Backspace key
    Backspace,
    /// Tab key
    Tab,
    /// Q key
    Q,
    /// R key
    R,
    /// Any other key, by raw code
    Other(u32),
}

impl KeyCode {
    /// Map a raw ASCII-style key code (as reported by most windowing toolkits'
    /// wait-key calls) to a [`KeyCode`]
    pub fn from_code(code: u32) -> Self {
        match code {
            27 => Self::Escape,
            32 => Self::Space,
            13 | 10 => Self::Enter,
            8 => Self::Backspace,
            9 => Self::Tab,
            0x51 | 0x71 => Self::Q,
            0x52 | 0x72 => Self::R,
            other => Self::Other(other),
        }
    }

    /// Raw code of this key
    pub const fn code(self) -> u32 {
        match self {
            Self::Escape => 27,
            Self::Space => 32,
            Self::Enter => 13,
            Self::Backspace => 8,
            Self::Tab => 9,
            Self::Q => 0x71,
            Self::R => 0x72,
            Self::Other(code) => code,
        }
    }
}
