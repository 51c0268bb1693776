use std::fmt;
use std::io::Read;

use tracing::{info, warn};

use crate::error::Error;
use crate::library::{self, TrackMetadata, TrackStore};
use crate::playback::{PlayOutcome, PlaybackController};

use super::command::{Command, split_command};
use super::messages;

/// Who sent a command, as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SenderId(pub u64);

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Routes chat commands and uploads to the track store and the playback
/// controller. Every call produces exactly one reply; errors never escape.
pub struct Dispatcher {
    store: TrackStore,
    player: PlaybackController,
}

impl Dispatcher {
    pub fn new(store: TrackStore, player: PlaybackController) -> Self {
        Self { store, player }
    }

    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    pub fn player(&self) -> &PlaybackController {
        &self.player
    }

    /// Handle a raw text message. Text that is not a command gets no reply.
    pub fn handle_text(&self, text: &str, sender: SenderId) -> Option<String> {
        let (command, argument) = split_command(text)?;
        Some(self.handle(command, argument, sender))
    }

    pub fn handle(&self, command: &str, argument: Option<&str>, sender: SenderId) -> String {
        info!(%sender, command, argument = argument.unwrap_or_default(), "command received");

        let Ok(cmd) = command.parse::<Command>() else {
            return messages::UNRECOGNIZED.to_string();
        };

        match cmd {
            Command::Start => messages::welcome(
                self.store.extensions(),
                self.store.max_bytes() / (1024 * 1024),
            ),
            Command::Help => messages::help(),
            Command::Play => self.play(argument),
            Command::Stop => match self.player.stop() {
                Some(_) => messages::STOPPED.to_string(),
                None => messages::NOTHING_PLAYING.to_string(),
            },
            Command::Pause => match self.player.pause() {
                Ok(_) => messages::PAUSED.to_string(),
                Err(Error::UnsupportedOperation(_)) => messages::PAUSE_UNSUPPORTED.to_string(),
                Err(Error::PlaybackFailed(reason)) => messages::playback_failed(&reason),
                Err(_) => messages::NOTHING_PLAYING.to_string(),
            },
            Command::Resume => match self.player.resume() {
                Ok(_) => messages::RESUMED.to_string(),
                Err(Error::UnsupportedOperation(_)) => messages::PAUSE_UNSUPPORTED.to_string(),
                Err(Error::PlaybackFailed(reason)) => messages::playback_failed(&reason),
                Err(_) => messages::NOTHING_PAUSED.to_string(),
            },
            Command::List => self.list(),
            Command::Current => self.current(),
            Command::Volume => self.volume(argument),
            Command::Storage => library::storage_summary(&self.store.storage()),
        }
    }

    /// Persist an uploaded file and describe the stored track.
    pub fn handle_upload<R: Read>(&self, filename_hint: &str, reader: R, sender: SenderId) -> String {
        info!(%sender, file = filename_hint, "upload received");

        match self.store.save(filename_hint, reader) {
            Ok(track) => {
                let meta = track.metadata();
                let details =
                    (meta != TrackMetadata::default()).then(|| library::describe(&track, &meta));
                messages::saved(&track.name, details.as_deref(), track.stem())
            }
            Err(Error::UnsupportedFormat { .. }) => messages::not_audio(self.store.extensions()),
            Err(e) => {
                warn!(%sender, file = filename_hint, error = %e, "upload not saved");
                messages::save_failed(&e.to_string())
            }
        }
    }

    fn play(&self, argument: Option<&str>) -> String {
        let outcome = match argument {
            Some(query) => self
                .store
                .find(query)
                .and_then(|track| self.player.play(track))
                .map(PlayOutcome::Started),
            None => self.player.play_or_resume(|| {
                self.store.list().into_iter().next().ok_or(Error::NoTracks)
            }),
        };

        match outcome {
            Ok(outcome) => messages::playing(&outcome.track().name),
            Err(Error::TrackNotFound(_)) => messages::TRACK_NOT_FOUND.to_string(),
            Err(Error::NoTracks) => messages::NO_TRACKS.to_string(),
            Err(Error::UnsupportedOperation(_)) => messages::PAUSE_UNSUPPORTED.to_string(),
            Err(Error::PlaybackFailed(reason)) => messages::playback_failed(&reason),
            Err(e) => messages::playback_failed(&e.to_string()),
        }
    }

    fn list(&self) -> String {
        let tracks = self.store.list();
        if tracks.is_empty() {
            return messages::NO_TRACKS.to_string();
        }
        let mut reply = String::new();
        let mut chars = 0;
        for t in &tracks {
            let line = t.name.chars().count() + usize::from(!reply.is_empty());
            if chars + line > messages::MAX_LIST_CHARS {
                reply.push('\n');
                reply.push_str(messages::LIST_TRUNCATED);
                break;
            }
            if !reply.is_empty() {
                reply.push('\n');
            }
            reply.push_str(&t.name);
            chars += line;
        }
        reply
    }

    fn current(&self) -> String {
        let Some((track, state)) = self.player.current() else {
            return messages::NOTHING_PLAYING.to_string();
        };

        let mut lines = vec![messages::now(&track.name, state)];
        let meta = track.metadata();
        if meta != TrackMetadata::default() {
            lines.push(library::describe(&track, &meta));
        }
        if let Some(elapsed) = self.player.elapsed() {
            lines.push(messages::position(&library::format_mmss(elapsed)));
        }
        lines.join("\n")
    }

    fn volume(&self, argument: Option<&str>) -> String {
        let Some(arg) = argument else {
            return messages::volume(to_percent(self.player.volume()));
        };

        let percent = match arg.trim().trim_end_matches('%').parse::<u8>() {
            Ok(p) if p <= 100 => p,
            _ => return messages::VOLUME_RANGE.to_string(),
        };
        match self.player.set_volume(f32::from(percent) / 100.0) {
            Ok(v) => messages::volume_set(to_percent(v)),
            Err(e) => messages::playback_failed(&e.to_string()),
        }
    }
}

fn to_percent(volume: f32) -> u8 {
    (volume.clamp(0.0, 1.0) * 100.0).round() as u8
}
