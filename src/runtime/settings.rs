use std::path::PathBuf;

use anyhow::{Context, anyhow};

use crate::config::Settings;

/// Load and validate settings. A `downloads_dir` given on the command line
/// wins over every other source.
pub fn load_settings(downloads_dir: Option<PathBuf>) -> anyhow::Result<Settings> {
    let mut settings = Settings::load().context("failed to load configuration")?;
    if let Some(dir) = downloads_dir {
        settings.library.downloads_dir = dir;
    }
    settings
        .validate()
        .map_err(|msg| anyhow!("invalid configuration: {msg}"))?;
    Ok(settings)
}
