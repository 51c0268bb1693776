use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::{Error, Result};

use super::model::{StorageInfo, Track};
use super::sanitize::{has_allowed_extension, sanitize_filename, with_suffix};

/// Flat directory of tracks. Every read re-scans the directory, so cost is
/// linear in the number of files and nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct TrackStore {
    dir: PathBuf,
    extensions: Vec<String>,
    max_bytes: u64,
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

impl TrackStore {
    pub fn new(settings: &LibrarySettings) -> Self {
        Self {
            dir: settings.downloads_dir.clone(),
            extensions: settings.normalized_extensions(),
            max_bytes: settings.max_file_size_bytes(),
        }
    }

    /// Like `new`, but also creates the downloads directory.
    pub fn open(settings: &LibrarySettings) -> io::Result<Self> {
        let store = Self::new(settings);
        fs::create_dir_all(&store.dir)?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn accepts(&self, name: &str) -> bool {
        has_allowed_extension(name, &self.extensions)
    }

    /// All visible audio files, ordered by file name.
    pub fn list(&self) -> Vec<Track> {
        let mut tracks: Vec<Track> = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|n| self.accepts(n))
                    .unwrap_or(false)
            })
            .filter_map(|e| {
                let size = e.metadata().map(|m| m.len()).unwrap_or(0);
                Track::from_path(e.path(), size)
            })
            .collect();

        tracks.sort_by(|a, b| a.name.cmp(&b.name));
        tracks
    }

    /// Resolve a user-supplied name to a single track.
    ///
    /// Tries an exact file name, then a case-insensitive match on the file
    /// name or stem, then a case-insensitive prefix. A step matching more
    /// than one track is treated as not found.
    pub fn find(&self, query: &str) -> Result<Track> {
        let query = query.trim();
        let not_found = || Error::TrackNotFound(query.to_string());
        if query.is_empty() {
            return Err(not_found());
        }

        let tracks = self.list();
        if let Some(t) = tracks.iter().find(|t| t.name == query) {
            return Ok(t.clone());
        }

        let q = query.to_lowercase();
        let same_name: Vec<&Track> = tracks
            .iter()
            .filter(|t| t.name.to_lowercase() == q || t.stem().to_lowercase() == q)
            .collect();
        match same_name.as_slice() {
            [t] => return Ok((*t).clone()),
            [] => {}
            _ => return Err(not_found()),
        }

        let prefixed: Vec<&Track> = tracks
            .iter()
            .filter(|t| t.name.to_lowercase().starts_with(&q))
            .collect();
        match prefixed.as_slice() {
            [t] => Ok((*t).clone()),
            _ => Err(not_found()),
        }
    }

    /// Persist an upload under a sanitized, collision-free name.
    ///
    /// Bytes go to a hidden temporary file first and are renamed into place
    /// only once fully written, so a failed transfer never shows up in `list`.
    pub fn save<R: Read>(&self, filename_hint: &str, reader: R) -> Result<Track> {
        let name = sanitize_filename(filename_hint).ok_or_else(|| {
            Error::WriteFailed(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty file name",
            ))
        })?;
        if !self.accepts(&name) {
            return Err(Error::UnsupportedFormat {
                name,
                allowed: self.extensions.join(", "),
            });
        }

        fs::create_dir_all(&self.dir)?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".incoming-")
            .suffix(".part")
            .tempfile_in(&self.dir)?;

        let mut limited = reader.take(self.max_bytes.saturating_add(1));
        let written = io::copy(&mut limited, tmp.as_file_mut())?;
        if written > self.max_bytes {
            return Err(Error::FileTooLarge {
                limit_mb: self.max_bytes / (1024 * 1024),
            });
        }
        tmp.as_file_mut().flush()?;
        tmp.as_file().sync_all()?;

        let mut n = 0;
        let mut candidate = name.clone();
        while self.dir.join(&candidate).exists() {
            n += 1;
            candidate = with_suffix(&name, n);
        }

        // persist_noclobber fails if another upload claimed the name in between.
        let path = loop {
            let path = self.dir.join(&candidate);
            match tmp.persist_noclobber(&path) {
                Ok(_) => break path,
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    debug!(name = %candidate, "name taken during save, retrying");
                    tmp = e.file;
                    n += 1;
                    candidate = with_suffix(&name, n);
                }
                Err(e) => return Err(Error::WriteFailed(e.error)),
            }
        };

        info!(name = %candidate, bytes = written, "saved track");
        Ok(Track {
            name: candidate,
            path,
            size: written,
        })
    }

    pub fn storage(&self) -> StorageInfo {
        let tracks = self.list();
        StorageInfo {
            tracks: tracks.len(),
            total_bytes: tracks.iter().map(|t| t.size).sum(),
            dir: self.dir.clone(),
        }
    }
}
