//! Filename hygiene for uploads.

use std::path::Path;

/// Reduce an upload's suggested name to a safe flat file name.
///
/// Only the last path component survives, characters other than
/// alphanumerics, `.`, `-` and `_` become `_`, and leading dots are dropped
/// so uploads never become hidden files. Returns `None` when nothing is left.
pub(super) fn sanitize_filename(hint: &str) -> Option<String> {
    let base = hint.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Lowercase extension of `name`, if any.
pub(super) fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

pub(super) fn has_allowed_extension(name: &str, extensions: &[String]) -> bool {
    extension_of(name)
        .map(|ext| extensions.iter().any(|e| e == &ext))
        .unwrap_or(false)
}

/// `song.mp3` -> `song_2.mp3` for `n == 2`.
pub(super) fn with_suffix(name: &str, n: usize) -> String {
    let path = Path::new(name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{stem}_{n}.{ext}"),
        None => format!("{stem}_{n}"),
    }
}
