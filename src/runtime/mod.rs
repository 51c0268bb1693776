use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::bot::telegram;

mod settings;
mod startup;

pub async fn run() -> anyhow::Result<()> {
    let settings = settings::load_settings(env::args_os().nth(1).map(PathBuf::from))?;
    startup::init_tracing(&settings.log);

    let token = settings
        .token()
        .context("bot token is not set (TELEGRAM_BOT_TOKEN or JUKEBOT__BOT__TOKEN)")?;
    let bot = telegram::build_bot(token, settings.bot.proxy.as_deref())?;
    let dispatcher = startup::build_dispatcher(&settings)?;

    let result = telegram::run(bot, &settings.bot, Arc::clone(&dispatcher)).await;

    info!("shutting down");
    dispatcher.player().shutdown();
    result
}
