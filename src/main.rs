mod audio;
mod bot;
mod config;
mod error;
mod library;
mod playback;
mod runtime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    runtime::run().await
}
