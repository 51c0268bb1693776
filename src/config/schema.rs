use std::path::PathBuf;

use serde::Deserialize;

/// Top-level bot settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/jukebot/config.toml` or `~/.config/jukebot/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `JUKEBOT__`, `__` as nested separator)
/// 2) Legacy variables (`TELEGRAM_BOT_TOKEN`, `SOCKS5_PROXY_URL`, `DOWNLOAD_PATH`, ...)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bot: BotSettings,
    pub library: LibrarySettings,
    pub audio: AudioSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    /// Bot API token issued by @BotFather.
    pub token: Option<String>,
    /// Optional proxy URL used to reach the Bot API, e.g. `socks5://127.0.0.1:1080`.
    pub proxy: Option<String>,
    /// Skip updates that queued up while the bot was offline.
    pub drop_pending_updates: bool,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            token: None,
            proxy: None,
            drop_pending_updates: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Flat directory holding one file per track.
    pub downloads_dir: PathBuf,
    /// File extensions accepted as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Upload size limit in megabytes.
    pub max_file_size_mb: u64,
}

impl LibrarySettings {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    /// Normalized extension list: lowercase, no leading dot, no blanks.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            downloads_dir: PathBuf::from("./downloads"),
            extensions: vec![
                "mp3".into(),
                "wav".into(),
                "ogg".into(),
                "m4a".into(),
                "flac".into(),
            ],
            max_file_size_mb: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Initial output volume in `0.0..=1.0`.
    pub default_volume: f32,
    /// Fade-out duration on shutdown (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            default_volume: 0.7,
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
