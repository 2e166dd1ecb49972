use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::utils::markdown::{escape, italic};
use tracing::warn;

use super::respond;
use crate::bot::AppState;
use crate::messages::{remove_message_keyboard, ComposedMessage};
use crate::post::send_composed;

/// Delete the message the button was attached to
pub async fn remove_message(bot: &Bot, q: &CallbackQuery) -> Result<()> {
    if let Some(msg) = q.regular_message() {
        bot.delete_message(msg.chat.id, msg.id).await.ok();
    }

    respond(bot, q).await;

    Ok(())
}

/// Confirm termination, then stop the update dispatcher
pub async fn terminate_bot(bot: &Bot, q: &CallbackQuery, state: &AppState) -> Result<()> {
    if let Some(msg) = q.regular_message() {
        bot.delete_message(msg.chat.id, msg.id).await.ok();
        bot.send_message(msg.chat.id, "🤖 Shutting down, goodbye!")
            .await?;
    }

    respond(bot, q).await;

    if let Some(token) = state.shutdown.get() {
        match token.shutdown() {
            Ok(_) => {}
            Err(err) => warn!(%err, "Failed to signal dispatcher shutdown"),
        }
    }

    Ok(())
}

/// A button payload the bot doesn't understand. Could be a stale message
/// from an older version; the callback still has to be acknowledged.
pub async fn warn_unknown_button(bot: &Bot, q: &CallbackQuery) -> Result<()> {
    warn!(data = ?q.data, "Unexpected button pushed");

    respond(bot, q).await;

    if let Some(msg) = q.regular_message() {
        let composed = ComposedMessage {
            text: italic(&escape("🤖 Unexpected button pushed. Maybe from an old message?")),
            markup: Some(remove_message_keyboard()),
        };

        send_composed(bot, msg.chat.id, composed).await?;
    }

    Ok(())
}
