use anyhow::{Context, Result};
use teloxide::prelude::*;

/// Show the connect code, which is the sender's own user id. The operator
/// sets this id as connected_user_id in the config to authorize the chat.
pub async fn handle_connect_command(bot: &Bot, msg: &Message) -> Result<()> {
    let from = msg
        .from
        .as_ref()
        .context("Expected a sender on the connect command")?;

    bot.send_message(msg.chat.id, format!("🤖 Connection code is: {}", from.id.0))
        .await?;

    Ok(())
}
