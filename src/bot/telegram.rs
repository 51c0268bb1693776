//! Telegram transport: long polling through teloxide, one plain-text reply
//! per command or upload.

use std::sync::Arc;

use anyhow::Context;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::net::Download;
use teloxide::payloads::DeleteWebhookSetters;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, FileMeta};
use tracing::{info, warn};

use crate::config::BotSettings;

use super::command::Command;
use super::dispatcher::{Dispatcher, SenderId};
use super::messages;

/// What kind of attachment a message carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Audio,
    Voice,
    Document,
}

/// Pick the filename an attachment is stored under.
///
/// Voice notes have no name and are always OGG/Opus. Audio without a name
/// is assumed to be MP3. Documents must carry their own name.
pub fn upload_name(kind: UploadKind, file_name: Option<&str>, unique_id: &str) -> Option<String> {
    let named = file_name.map(str::trim).filter(|n| !n.is_empty());
    match kind {
        UploadKind::Voice => Some(format!("voice_{unique_id}.ogg")),
        UploadKind::Audio => Some(
            named
                .map(str::to_string)
                .unwrap_or_else(|| format!("audio_{unique_id}.mp3")),
        ),
        UploadKind::Document => named.map(str::to_string),
    }
}

struct Attachment<'a> {
    kind: UploadKind,
    meta: &'a FileMeta,
    file_name: Option<&'a str>,
}

fn attachment(msg: &Message) -> Option<Attachment<'_>> {
    if let Some(audio) = msg.audio() {
        return Some(Attachment {
            kind: UploadKind::Audio,
            meta: &audio.file,
            file_name: audio.file_name.as_deref(),
        });
    }
    if let Some(voice) = msg.voice() {
        return Some(Attachment {
            kind: UploadKind::Voice,
            meta: &voice.file,
            file_name: None,
        });
    }
    msg.document().map(|doc| Attachment {
        kind: UploadKind::Document,
        meta: &doc.file,
        file_name: doc.file_name.as_deref(),
    })
}

fn sender_of(msg: &Message) -> SenderId {
    match &msg.from {
        Some(user) => SenderId(user.id.0),
        None => SenderId(msg.chat.id.0.unsigned_abs()),
    }
}

/// Build the Bot API client, routed through `proxy` when one is configured.
pub fn build_bot(token: &str, proxy: Option<&str>) -> anyhow::Result<Bot> {
    let Some(proxy) = proxy else {
        return Ok(Bot::new(token));
    };

    let proxy = reqwest::Proxy::all(proxy).with_context(|| format!("invalid proxy url {proxy}"))?;
    let client = teloxide::net::default_reqwest_settings()
        .proxy(proxy)
        .build()
        .context("failed to build HTTP client")?;
    info!("using proxy for Bot API requests");
    Ok(Bot::with_client(token, client))
}

/// Register commands, then poll for updates until Ctrl-C.
pub async fn run(bot: Bot, settings: &BotSettings, dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    let me = bot.get_me().await.context("failed to reach the Bot API")?;
    info!(username = %me.username(), "connected to Telegram");

    if settings.drop_pending_updates {
        bot.delete_webhook()
            .drop_pending_updates(true)
            .await
            .context("failed to drop pending updates")?;
    }

    let commands: Vec<BotCommand> = Command::ALL
        .iter()
        .map(|c| BotCommand::new(c.name(), c.description()))
        .collect();
    if let Err(e) = bot.set_my_commands(commands).await {
        warn!(error = %e, "failed to register the command list");
    }

    let handler = Update::filter_message().endpoint(on_message);

    teloxide::dispatching::Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("update polling stopped");
    Ok(())
}

async fn on_message(bot: Bot, msg: Message, dispatcher: Arc<Dispatcher>) -> ResponseResult<()> {
    let sender = sender_of(&msg);

    let reply = if let Some(text) = msg.text() {
        let text = text.to_string();
        let d = Arc::clone(&dispatcher);
        match tokio::task::spawn_blocking(move || d.handle_text(&text, sender)).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(%sender, error = %e, "command handler panicked");
                None
            }
        }
    } else if let Some(att) = attachment(&msg) {
        Some(receive_upload(&bot, &dispatcher, att, sender).await)
    } else {
        None
    };

    if let Some(reply) = reply {
        if let Err(e) = bot.send_message(msg.chat.id, reply).await {
            warn!(%sender, error = %e, "failed to send reply");
        }
    }
    Ok(())
}

async fn receive_upload(
    bot: &Bot,
    dispatcher: &Arc<Dispatcher>,
    att: Attachment<'_>,
    sender: SenderId,
) -> String {
    let store = dispatcher.store();
    let unique_id = att.meta.unique_id.to_string();

    let Some(name) = upload_name(att.kind, att.file_name, &unique_id) else {
        return messages::not_audio(store.extensions());
    };
    if !store.accepts(&name) {
        return messages::not_audio(store.extensions());
    }

    let limit = store.max_bytes();
    if u64::from(att.meta.size) > limit {
        info!(%sender, file = %name, size = att.meta.size, "upload refused: too large");
        return messages::too_large(limit / (1024 * 1024));
    }

    let file = match bot.get_file(att.meta.id.clone()).await {
        Ok(f) => f,
        Err(e) => {
            warn!(%sender, file = %name, error = %e, "could not resolve file");
            return messages::save_failed(&e.to_string());
        }
    };

    let mut bytes = Vec::with_capacity(att.meta.size as usize);
    if let Err(e) = bot.download_file(&file.path, &mut bytes).await {
        warn!(%sender, file = %name, error = %e, "download failed");
        return messages::save_failed(&e.to_string());
    }

    let d = Arc::clone(dispatcher);
    match tokio::task::spawn_blocking(move || d.handle_upload(&name, bytes.as_slice(), sender)).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(%sender, error = %e, "upload handler panicked");
            messages::save_failed(&e.to_string())
        }
    }
}
