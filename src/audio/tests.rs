use super::*;
use std::path::{Path, PathBuf};

/// An output that can only start and stop.
#[derive(Default)]
struct StartStopOnly {
    started: Option<PathBuf>,
}

impl AudioBackend for StartStopOnly {
    fn start(&mut self, path: &Path) -> Result<(), AudioError> {
        self.started = Some(path.to_path_buf());
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.started = None;
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

#[test]
fn default_pause_and_resume_are_unsupported() {
    let mut out = StartStopOnly::default();
    out.start(Path::new("/tmp/a.mp3")).unwrap();

    assert!(matches!(out.pause(), Err(AudioError::Unsupported("pause"))));
    assert!(matches!(out.resume(), Err(AudioError::Unsupported("resume"))));
    assert_eq!(out.elapsed(), None);
    assert_eq!(out.started.as_deref(), Some(Path::new("/tmp/a.mp3")));
}

#[test]
fn audio_errors_name_the_file() {
    let err = AudioError::Decode {
        path: PathBuf::from("/music/x.mp3"),
        reason: "unrecognized format".into(),
    };
    assert_eq!(
        err.to_string(),
        "failed to decode /music/x.mp3: unrecognized format"
    );

    let err = AudioError::Open {
        path: PathBuf::from("/music/y.mp3"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert_eq!(err.to_string(), "failed to open /music/y.mp3: gone");
}

#[test]
fn fresh_playback_info_reports_nothing_loaded() {
    let info = PlaybackInfo::default();
    assert!(!info.active);
    assert_eq!(info.elapsed, std::time::Duration::ZERO);
}
