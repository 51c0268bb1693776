use std::{env, path::PathBuf};

use super::schema::Settings;

/// Environment variables understood by earlier deployments of the bot, mapped
/// onto nested setting keys.
const LEGACY_VARS: &[(&str, &str)] = &[
    ("TELEGRAM_BOT_TOKEN", "bot__token"),
    ("SOCKS5_PROXY_URL", "bot__proxy"),
    ("DOWNLOAD_PATH", "library__downloads_dir"),
    ("MAX_FILE_SIZE_MB", "library__max_file_size_mb"),
    ("ALLOWED_EXTENSIONS", "library__extensions"),
    ("DEFAULT_VOLUME", "audio__default_volume"),
];

const TOKEN_PLACEHOLDER: &str = "your_bot_token_here";

/// Configuration loading helpers.
///
/// `Settings::load` layers `JUKEBOT__` environment variables over the legacy
/// variables, those over an optional config file, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder
            .add_source(
                ::config::Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("library.extensions")
                    .try_parsing(true)
                    .source(Some(legacy_env())),
            )
            .add_source(
                ::config::Environment::with_prefix("JUKEBOT")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("library.extensions")
                    .try_parsing(true),
            );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.audio.default_volume) {
            return Err("audio.default_volume must be between 0.0 and 1.0".to_string());
        }
        if self.library.max_file_size_mb == 0 {
            return Err("library.max_file_size_mb must be >= 1".to_string());
        }
        if self.library.normalized_extensions().is_empty() {
            return Err("library.extensions must list at least one extension".to_string());
        }
        if let Some(token) = &self.bot.token {
            let token = token.trim();
            if token.is_empty() || token == TOKEN_PLACEHOLDER {
                return Err("bot.token is empty or still the placeholder".to_string());
            }
        }
        Ok(())
    }

    /// The bot token, required before the Telegram adapter can start.
    pub fn token(&self) -> Option<&str> {
        self.bot
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Collect the legacy variables that are set (and non-blank) under their nested keys.
fn legacy_env() -> ::config::Map<String, String> {
    LEGACY_VARS
        .iter()
        .filter_map(|(var, key)| {
            let value = env::var(var).ok()?;
            let value = value.trim();
            if value.is_empty() {
                None
            } else {
                Some((key.to_string(), value.to_string()))
            }
        })
        .collect()
}

/// Resolve the config path from `JUKEBOT_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("JUKEBOT_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/jukebot/config.toml`
/// or `~/.config/jukebot/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("jukebot").join("config.toml"))
}
