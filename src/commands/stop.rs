use anyhow::Result;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup};

use crate::interface::CallbackCommand;
use crate::messages::callback_button;

/// Ask for confirmation before terminating the bot
pub async fn handle_stop_command(bot: &Bot, chat: ChatId) -> Result<()> {
    let markup = InlineKeyboardMarkup::new(vec![vec![
        callback_button("Terminate", CallbackCommand::TerminateBot),
        callback_button("Cancel", CallbackCommand::RemoveMessage),
    ]]);

    bot.send_message(chat, "Stop the bot? It will not come back on its own.")
        .reply_markup(markup)
        .await?;

    Ok(())
}
