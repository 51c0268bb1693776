use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::*;

/// A stored audio file, addressed by its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Tag data read from a track on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
}

/// Summary of the downloads directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageInfo {
    pub tracks: usize,
    pub total_bytes: u64,
    pub dir: PathBuf,
}

impl Track {
    pub(crate) fn from_path(path: &Path, size: u64) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        Some(Self {
            name,
            path: path.to_path_buf(),
            size,
        })
    }

    /// The name shown to users, which is the stored file name.
    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// File name without its extension, the shortest way to address the track.
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }

    /// Read tags and stream properties. Unreadable files yield empty metadata.
    pub fn metadata(&self) -> TrackMetadata {
        let Ok(tagged) = lofty::read_from_path(&self.path) else {
            return TrackMetadata::default();
        };

        let duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());

        let mut meta = TrackMetadata {
            duration,
            ..TrackMetadata::default()
        };

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            meta.title = non_blank(tag.title());
            meta.artist = non_blank(tag.artist());
            meta.album = non_blank(tag.album());
        }

        meta
    }
}

fn non_blank(v: Option<Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
