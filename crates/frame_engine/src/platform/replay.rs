//! File-backed replay backends
//!
//! These stand in for a camera, a hand detector and a window: frames come
//! from a directory of PNGs, detections from a recorded RON file, and
//! presented frames are optionally dumped to disk while key presses are
//! replayed from a script.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::input::KeyCode;
use crate::platform::{CaptureError, DisplayError, DisplaySink, FrameSource};
use crate::render::Frame;
use crate::vision::{HandDetection, HandTracker, TrackerError};

/// Frames read in file-name order from a directory of PNG images
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    next: usize,
    resolution: Option<(u32, u32)>,
}

impl ImageSequenceSource {
    /// Index the PNG files in `dir`. Fails when the directory holds none.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, CaptureError> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_png = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            if is_png {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(CaptureError::Open(format!("no PNG frames in {}", dir.display())));
        }

        log::info!("Replaying {} frames from {}", paths.len(), dir.display());
        Ok(Self { paths, next: 0, resolution: None })
    }

    /// Number of frames not yet captured
    pub fn remaining(&self) -> usize {
        self.paths.len() - self.next
    }
}

impl FrameSource for ImageSequenceSource {
    fn capture(&mut self) -> Result<Frame, CaptureError> {
        let path = self.paths.get(self.next).ok_or(CaptureError::Exhausted)?;
        let frame = image::open(path)
            .map_err(|e| CaptureError::Decode(format!("{}: {}", path.display(), e)))?
            .to_rgb8();
        self.next += 1;
        self.resolution = Some(frame.dimensions());
        Ok(frame)
    }

    fn resolution(&self) -> Option<(u32, u32)> {
        self.resolution
    }

    fn release(&mut self) {
        log::debug!("Releasing image sequence after {} frames", self.next);
        self.next = self.paths.len();
    }
}

/// In-memory frame queue, mostly for tests and synthetic runs
#[derive(Default)]
pub struct MemorySource {
    frames: VecDeque<Frame>,
    released: bool,
}

impl MemorySource {
    /// Queue `frames` for capture in order
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self { frames: frames.into_iter().collect(), released: false }
    }

    /// Whether [`FrameSource::release`] has been called
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl FrameSource for MemorySource {
    fn capture(&mut self) -> Result<Frame, CaptureError> {
        self.frames.pop_front().ok_or(CaptureError::Exhausted)
    }

    fn resolution(&self) -> Option<(u32, u32)> {
        self.frames.front().map(Frame::dimensions)
    }

    fn release(&mut self) {
        self.frames.clear();
        self.released = true;
    }
}

/// Replays recorded detections, one entry per captured frame.
///
/// Frames past the end of the recording have no hands.
#[derive(Debug, Default)]
pub struct ScriptedHandTracker {
    frames: VecDeque<Vec<HandDetection>>,
}

impl ScriptedHandTracker {
    /// Tracker over an in-memory recording
    pub fn new(frames: Vec<Vec<HandDetection>>) -> Self {
        Self { frames: frames.into() }
    }

    /// Load a recording from a RON file holding a list of per-frame
    /// detection lists
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TrackerError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let frames: Vec<Vec<HandDetection>> = ron::from_str(&contents)
            .map_err(|e| TrackerError::Load(format!("{}: {}", path.display(), e)))?;
        log::info!("Loaded {} recorded detection frames from {}", frames.len(), path.display());
        Ok(Self::new(frames))
    }
}

impl HandTracker for ScriptedHandTracker {
    fn find_hands(&mut self, _frame: &Frame) -> Result<Vec<HandDetection>, TrackerError> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

/// A key press delivered on a given poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedKey {
    /// Zero-based index of the `poll_key` call that reports the key
    pub poll: u64,
    /// The key reported
    pub key: KeyCode,
}

/// Display sink that writes frames to disk and replays scripted keys
pub struct FrameDumpSink {
    output_dir: Option<PathBuf>,
    keys: VecDeque<ScriptedKey>,
    max_polls: Option<u64>,
    polls: u64,
    presented: u64,
}

impl FrameDumpSink {
    /// Create a sink. Frames are written to `output_dir` when given; the sink
    /// reports closed after `max_polls` key polls when given.
    pub fn new(output_dir: Option<PathBuf>, mut keys: Vec<ScriptedKey>, max_polls: Option<u64>) -> Result<Self, DisplayError> {
        if let Some(dir) = &output_dir {
            std::fs::create_dir_all(dir)?;
        }
        keys.sort_by_key(|scripted| scripted.poll);
        Ok(Self {
            output_dir,
            keys: keys.into(),
            max_polls,
            polls: 0,
            presented: 0,
        })
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Number of key polls so far
    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl DisplaySink for FrameDumpSink {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        if let Some(dir) = &self.output_dir {
            let path = dir.join(format!("frame_{:06}.png", self.presented));
            frame
                .save(&path)
                .map_err(|e| DisplayError::Present(format!("{}: {}", path.display(), e)))?;
            log::trace!("Wrote {}", path.display());
        }
        self.presented += 1;
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<KeyCode>, DisplayError> {
        let poll = self.polls;
        self.polls += 1;

        // Keys scheduled for polls that were skipped are delivered late
        // rather than dropped.
        match self.keys.front() {
            Some(scripted) if scripted.poll <= poll => {
                let key = scripted.key;
                self.keys.pop_front();
                Ok(Some(key))
            }
            _ => Ok(None),
        }
    }

    fn is_open(&self) -> bool {
        self.max_polls.map_or(true, |max| self.polls < max)
    }
}
