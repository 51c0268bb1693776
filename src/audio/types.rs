//! Audio-related small types and handles.
//!
//! Commands sent to the audio thread, the playback info it publishes and
//! the error type of the audio facility.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(String),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("{0} is not supported")]
    Unsupported(&'static str),

    #[error("audio thread is not running")]
    Disconnected,
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current sink with one playing `path`; the outcome of
    /// opening and decoding the file is sent back on `reply`.
    Play {
        path: PathBuf,
        reply: Sender<Result<(), AudioError>>,
    },
    /// Stop playback immediately.
    Stop,
    Pause,
    Resume,
    /// Set the output volume (0.0..=1.0).
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Runtime playback information published by the audio thread.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Whether a sink is loaded (playing or paused).
    pub active: bool,
    /// Elapsed playback time for the current file.
    pub elapsed: Duration,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
