use std::time::Duration;

use super::model::{StorageInfo, Track, TrackMetadata};

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format a byte count as megabytes with two decimals.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Build a one-line description from whatever tags are present.
///
/// Composes `artist - title` and appends the duration; falls back to the
/// track name when no tags were readable.
pub fn describe(track: &Track, meta: &TrackMetadata) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(a) = meta.artist.as_deref() {
        parts.push(a.to_string());
    }
    parts.push(
        meta.title
            .clone()
            .unwrap_or_else(|| track.display_name().to_string()),
    );

    let mut line = parts.join(" - ");
    if let Some(d) = meta.duration {
        line.push_str(&format!(" ({})", format_mmss(d)));
    }
    line
}

/// Multi-line storage summary for the `/storage` reply.
pub fn storage_summary(info: &StorageInfo) -> String {
    format!(
        "Tracks: {}\nTotal size: {}\nLocation: {}",
        info.tracks,
        format_megabytes(info.total_bytes),
        info.dir.display()
    )
}
