use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{info, warn};

use crate::audio::AudioBackend;
use crate::error::{Error, Result};
use crate::library::Track;

use super::session::{PlaybackSession, PlaybackState};

/// How a `/play` without a track name was satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Started(Track),
    Resumed(Track),
    AlreadyPlaying(Track),
}

impl PlayOutcome {
    pub fn track(&self) -> &Track {
        match self {
            Self::Started(t) | Self::Resumed(t) | Self::AlreadyPlaying(t) => t,
        }
    }
}

struct Inner {
    session: PlaybackSession,
    backend: Box<dyn AudioBackend>,
}

impl Inner {
    /// Stop whatever is loaded, then start `track`. Last play wins.
    fn start(&mut self, track: Track) -> Result<Track> {
        if self.session.state != PlaybackState::Idle {
            if let Err(e) = self.backend.stop() {
                warn!(error = %e, "stopping previous track failed");
            }
            self.session.reset();
        }

        match self.backend.start(&track.path) {
            Ok(()) => {
                info!(track = %track.name, "playback started");
                self.session.begin(track.clone());
                Ok(track)
            }
            Err(e) => {
                warn!(track = %track.name, error = %e, "playback failed");
                Err(Error::PlaybackFailed(e.to_string()))
            }
        }
    }

    fn pause(&mut self) -> Result<Track> {
        let state = self.session.state;
        let track = match (state, self.session.track.clone()) {
            (PlaybackState::Playing, Some(track)) => track,
            _ => {
                return Err(Error::InvalidState {
                    action: "pause",
                    state,
                });
            }
        };
        self.backend.pause()?;
        self.session.state = PlaybackState::Paused;
        info!(track = %track.name, "playback paused");
        Ok(track)
    }

    fn resume(&mut self) -> Result<Track> {
        let state = self.session.state;
        let track = match (state, self.session.track.clone()) {
            (PlaybackState::Paused, Some(track)) => track,
            _ => {
                return Err(Error::InvalidState {
                    action: "resume",
                    state,
                });
            }
        };
        self.backend.resume()?;
        self.session.state = PlaybackState::Playing;
        info!(track = %track.name, "playback resumed");
        Ok(track)
    }
}

/// Owner of the single playback session.
///
/// Every transition runs under one mutex around the session and the audio
/// backend, so commands from concurrent chats apply one at a time.
pub struct PlaybackController {
    inner: Mutex<Inner>,
}

impl PlaybackController {
    pub fn new(backend: Box<dyn AudioBackend>, volume: f32) -> Self {
        Self {
            inner: Mutex::new(Inner {
                session: PlaybackSession::new(volume),
                backend,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start `track`, replacing any track that is playing or paused.
    pub fn play(&self, track: Track) -> Result<Track> {
        self.lock().start(track)
    }

    /// `/play` without a name: resume when paused, keep going when playing,
    /// otherwise start the track produced by `pick`.
    ///
    /// `pick` runs without the lock held. If another command loads a track
    /// meanwhile, the picked track replaces it like any other `play`.
    pub fn play_or_resume<F>(&self, pick: F) -> Result<PlayOutcome>
    where
        F: FnOnce() -> Result<Track>,
    {
        {
            let mut inner = self.lock();
            match (inner.session.state, inner.session.track.clone()) {
                (PlaybackState::Paused, _) => return inner.resume().map(PlayOutcome::Resumed),
                (PlaybackState::Playing, Some(track)) => {
                    return Ok(PlayOutcome::AlreadyPlaying(track));
                }
                _ => {}
            }
        }

        let track = pick()?;
        self.lock().start(track).map(PlayOutcome::Started)
    }

    pub fn pause(&self) -> Result<Track> {
        self.lock().pause()
    }

    pub fn resume(&self) -> Result<Track> {
        self.lock().resume()
    }

    /// Stop playback and reset the session. Idempotent: returns the track
    /// that was stopped, or `None` when nothing was loaded.
    pub fn stop(&self) -> Option<Track> {
        let mut inner = self.lock();
        if inner.session.state == PlaybackState::Idle {
            return None;
        }
        if let Err(e) = inner.backend.stop() {
            warn!(error = %e, "audio output failed to stop");
        }
        let track = inner.session.reset();
        if let Some(t) = &track {
            info!(track = %t.name, "playback stopped");
        }
        track
    }

    pub fn current(&self) -> Option<(Track, PlaybackState)> {
        let inner = self.lock();
        inner
            .session
            .track
            .clone()
            .map(|t| (t, inner.session.state))
    }

    pub fn state(&self) -> PlaybackState {
        self.lock().session.state
    }

    pub fn volume(&self) -> f32 {
        self.lock().session.volume
    }

    /// Clamp to `0.0..=1.0`, apply to the output and remember it.
    pub fn set_volume(&self, volume: f32) -> Result<f32> {
        let volume = volume.clamp(0.0, 1.0);
        let mut inner = self.lock();
        inner.backend.set_volume(volume)?;
        inner.session.volume = volume;
        Ok(volume)
    }

    pub fn elapsed(&self) -> Option<Duration> {
        let inner = self.lock();
        if inner.session.state == PlaybackState::Idle {
            return None;
        }
        inner.backend.elapsed()
    }

    /// Release the audio output, letting it fade out whatever is still
    /// loaded, and leave the session idle.
    pub fn shutdown(&self) {
        let mut inner = self.lock();
        inner.backend.shutdown();
        if let Some(t) = inner.session.reset() {
            info!(track = %t.name, "playback ended by shutdown");
        }
    }
}
