use std::fmt;

use crate::library::Track;

/// Logical playback state. A stopped session is `Idle`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "Idle",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
        };
        f.write_str(s)
    }
}

/// What is loaded and whether it is audible.
///
/// `track` is `Some` exactly when `state` is not `Idle`.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub track: Option<Track>,
    pub state: PlaybackState,
    pub volume: f32,
}

impl PlaybackSession {
    pub fn new(volume: f32) -> Self {
        Self {
            track: None,
            state: PlaybackState::Idle,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub(super) fn begin(&mut self, track: Track) {
        self.track = Some(track);
        self.state = PlaybackState::Playing;
    }

    pub(super) fn reset(&mut self) -> Option<Track> {
        self.state = PlaybackState::Idle;
        self.track.take()
    }
}
