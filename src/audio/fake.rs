//! In-memory `AudioBackend` that records every call.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::backend::AudioBackend;
use super::types::AudioError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Start(PathBuf),
    Pause,
    Resume,
    Stop,
    SetVolume(f32),
    Shutdown,
}

#[derive(Clone, Default)]
pub(crate) struct RecordingBackend {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_start: bool,
    no_pause: bool,
    disconnected: bool,
}

impl RecordingBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every `start` fails like an undecodable file.
    pub(crate) fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Behave like an output without pause support.
    pub(crate) fn without_pause(mut self) -> Self {
        self.no_pause = true;
        self
    }

    /// Pause and resume fail as if the audio thread had exited.
    pub(crate) fn disconnected(mut self) -> Self {
        self.disconnected = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AudioBackend for RecordingBackend {
    fn start(&mut self, path: &Path) -> Result<(), AudioError> {
        if self.fail_start {
            return Err(AudioError::Decode {
                path: path.to_path_buf(),
                reason: "unrecognized format".into(),
            });
        }
        self.record(Call::Start(path.to_path_buf()));
        Ok(())
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        if self.no_pause {
            return Err(AudioError::Unsupported("pause"));
        }
        if self.disconnected {
            return Err(AudioError::Disconnected);
        }
        self.record(Call::Pause);
        Ok(())
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        if self.disconnected {
            return Err(AudioError::Disconnected);
        }
        self.record(Call::Resume);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.record(Call::Stop);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), AudioError> {
        self.record(Call::SetVolume(volume));
        Ok(())
    }

    fn elapsed(&self) -> Option<Duration> {
        Some(Duration::from_secs(42))
    }

    fn shutdown(&mut self) {
        self.record(Call::Shutdown);
    }
}
