//! Error taxonomy shared by the track store, the playback controller and
//! the command dispatcher.
//!
//! None of these errors is fatal: the dispatcher turns every variant into
//! reply text for the sender.

use std::io;

use crate::audio::AudioError;
use crate::playback::PlaybackState;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("track not found: {0}")]
    TrackNotFound(String),

    #[error("no tracks in the store")]
    NoTracks,

    #[error("write failed: {0}")]
    WriteFailed(#[from] io::Error),

    #[error("file too large (limit {limit_mb} MB)")]
    FileTooLarge { limit_mb: u64 },

    #[error("unsupported file type {name:?}, allowed: {allowed}")]
    UnsupportedFormat { name: String, allowed: String },

    #[error("playback failed: {0}")]
    PlaybackFailed(String),

    #[error("{0} is not supported by the audio output")]
    UnsupportedOperation(&'static str),

    #[error("cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: PlaybackState,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<AudioError> for Error {
    fn from(e: AudioError) -> Self {
        match e {
            AudioError::Unsupported(op) => Error::UnsupportedOperation(op),
            other => Error::PlaybackFailed(other.to_string()),
        }
    }
}
