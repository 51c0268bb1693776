use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::audio::RodioBackend;
use crate::bot::Dispatcher;
use crate::config::{LogSettings, Settings};
use crate::library::TrackStore;
use crate::playback::PlaybackController;

/// `RUST_LOG` wins; otherwise the configured filter with the HTTP stack quietened.
pub fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},teloxide=warn,reqwest=warn,hyper=warn", log.filter))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Open the downloads directory and the audio output and wire them into a
/// command dispatcher.
pub fn build_dispatcher(settings: &Settings) -> anyhow::Result<Arc<Dispatcher>> {
    let store = TrackStore::open(&settings.library).with_context(|| {
        format!(
            "failed to create downloads directory {}",
            settings.library.downloads_dir.display()
        )
    })?;
    info!(
        dir = %store.dir().display(),
        tracks = store.list().len(),
        "track store ready"
    );

    let backend = RodioBackend::spawn(&settings.audio).context("audio output unavailable")?;
    let player = PlaybackController::new(Box::new(backend), settings.audio.default_volume);

    Ok(Arc::new(Dispatcher::new(store, player)))
}
