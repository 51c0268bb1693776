//! User-facing reply texts.

use crate::playback::PlaybackState;

use super::command::Command;

pub const STOPPED: &str = "Stopped";
pub const PAUSED: &str = "Paused";
pub const RESUMED: &str = "Resumed";
pub const NOTHING_PLAYING: &str = "Nothing playing";
pub const NOTHING_PAUSED: &str = "Nothing paused";
pub const NO_TRACKS: &str = "No tracks";
pub const TRACK_NOT_FOUND: &str = "Track not found";
pub const PAUSE_UNSUPPORTED: &str = "Pause is not supported";
pub const UNRECOGNIZED: &str = "Unrecognized command. Send /help for the list of commands.";
pub const VOLUME_RANGE: &str = "Volume must be between 0 and 100";
pub const LIST_TRUNCATED: &str = "... (list truncated)";

/// Track names in one `/list` reply, keeping it under Telegram's 4096 limit.
pub const MAX_LIST_CHARS: usize = 4000;

pub fn playing(name: &str) -> String {
    format!("Playing {name}")
}

pub fn playback_failed(err: &str) -> String {
    format!("Playback failed: {err}")
}

pub fn now(name: &str, state: PlaybackState) -> String {
    format!("{name} [{state}]")
}

pub fn volume(percent: u8) -> String {
    format!("Volume: {percent}%")
}

pub fn volume_set(percent: u8) -> String {
    format!("Volume set to {percent}%")
}

pub fn saved(name: &str, details: Option<&str>, stem: &str) -> String {
    match details {
        Some(d) => format!("Saved {name}\n{d}\nUse /play {stem} to play it"),
        None => format!("Saved {name}\nUse /play {stem} to play it"),
    }
}

pub fn position(elapsed: &str) -> String {
    format!("Position: {elapsed}")
}

pub fn save_failed(err: &str) -> String {
    format!("Save failed: {err}")
}

pub fn not_audio(extensions: &[String]) -> String {
    format!("Please send an audio file ({})", extensions.join(", "))
}

pub fn too_large(limit_mb: u64) -> String {
    format!("File too large. Maximum size is {limit_mb} MB")
}

/// One line per command, `/name args - description`.
pub fn command_summary() -> String {
    Command::ALL
        .iter()
        .map(|c| format!("{} - {}", c.usage(), c.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn help() -> String {
    format!(
        "Commands:\n{}\n\nSend an audio file to add it to the library.",
        command_summary()
    )
}

pub fn welcome(extensions: &[String], max_file_size_mb: u64) -> String {
    format!(
        "Welcome to jukebot!\n\
         Send me audio files and control playback on this machine.\n\n\
         {}\n\n\
         Max file size: {max_file_size_mb} MB\n\
         Supported formats: {}",
        help(),
        extensions.join(", ")
    )
}
