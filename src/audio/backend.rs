use std::path::Path;
use std::time::Duration;

use super::types::AudioError;

/// The four transport operations of an audio output, plus volume.
///
/// Calls return once the request has been accepted; playback itself runs
/// out-of-band. Outputs that cannot pause keep the default `pause`/`resume`.
pub trait AudioBackend: Send {
    /// Start playing `path`, replacing anything currently playing.
    fn start(&mut self, path: &Path) -> Result<(), AudioError>;

    fn pause(&mut self) -> Result<(), AudioError> {
        Err(AudioError::Unsupported("pause"))
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        Err(AudioError::Unsupported("resume"))
    }

    fn stop(&mut self) -> Result<(), AudioError>;

    /// Set output volume in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32) -> Result<(), AudioError>;

    /// Time spent playing the current file, when the output can tell.
    fn elapsed(&self) -> Option<Duration> {
        None
    }

    /// Release the device. Called once on process shutdown.
    fn shutdown(&mut self) {}
}
