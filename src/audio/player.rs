use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::backend::AudioBackend;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioError, PlaybackHandle, PlaybackInfo};

/// `AudioBackend` driving the default output device through `rodio`.
pub struct RodioBackend {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
    quit_fade_out: Duration,
}

impl RodioBackend {
    /// Open the default output device on a new audio thread.
    pub fn spawn(settings: &AudioSettings) -> Result<Self, AudioError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(
            rx,
            playback_info.clone(),
            ready_tx,
            settings.default_volume,
        );

        ready_rx.recv().map_err(|_| AudioError::Disconnected)??;

        Ok(Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
            quit_fade_out: Duration::from_millis(settings.quit_fade_out_ms),
        })
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), AudioError> {
        self.tx.send(cmd).map_err(|_| AudioError::Disconnected)
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl AudioBackend for RodioBackend {
    fn start(&mut self, path: &Path) -> Result<(), AudioError> {
        let (reply, outcome) = mpsc::channel();
        self.send(AudioCmd::Play {
            path: path.to_path_buf(),
            reply,
        })?;
        outcome.recv().map_err(|_| AudioError::Disconnected)?
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        self.send(AudioCmd::Pause)
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        self.send(AudioCmd::Resume)
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.send(AudioCmd::Stop)
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), AudioError> {
        self.send(AudioCmd::SetVolume(volume))
    }

    fn elapsed(&self) -> Option<Duration> {
        self.playback
            .lock()
            .ok()
            .filter(|info| info.active)
            .map(|info| info.elapsed)
    }

    fn shutdown(&mut self) {
        self.quit_softly(self.quit_fade_out);
    }
}
