use anyhow::{Context, Result};
use teloxide::payloads::EditMessageReplyMarkupSetters;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ForceReply, Message, ParseMode};

use super::respond;
use crate::messages::invoice::question_message_text;
use crate::messages::trade::{move_node_keyboard, trade_title_line};
use crate::messages::FailureKind;
use crate::nodes::{find_node, find_node_by_short_key, NodeRef};
use crate::post::{post_created_trade, post_failure};
use crate::trades::{decode_trade, encode_trade, TradeConnect};

/// Pull the trade token line out of a created trade message
fn message_trade(msg: &Message) -> Option<TradeConnect> {
    let token = msg.text()?.split('\n').nth(1)?;

    decode_trade(token)
}

/// Replace the trade message with an edit question that forces a reply
pub async fn ask_trade_question(
    bot: &Bot,
    q: &CallbackQuery,
    nodes: &[NodeRef],
    question: &str,
) -> Result<()> {
    let msg = q
        .regular_message()
        .context("Expected a message on the trade edit button")?;

    let trade = match message_trade(msg) {
        Some(trade) => trade,
        None => {
            post_failure(bot, msg.chat.id, FailureKind::Generic).await?;
            respond(bot, q).await;

            return Ok(());
        }
    };

    if !trade.nodes.iter().any(|key| find_node(nodes, key).is_some()) {
        post_failure(bot, msg.chat.id, FailureKind::Generic).await?;
        respond(bot, q).await;

        return Ok(());
    }

    let text = question_message_text(&trade_title_line(&trade), &encode_trade(&trade), question);

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(ForceReply::new())
        .await?;

    bot.delete_message(msg.chat.id, msg.id).await.ok();

    respond(bot, q).await;

    Ok(())
}

/// Swap the trade keyboard for the list of nodes it can move to
pub async fn set_trade_node(bot: &Bot, q: &CallbackQuery, nodes: &[NodeRef]) -> Result<()> {
    let msg = q
        .regular_message()
        .context("Expected a message on the trade node button")?;

    bot.edit_message_reply_markup(msg.chat.id, msg.id)
        .reply_markup(move_node_keyboard(nodes))
        .await?;

    respond(bot, q).await;

    Ok(())
}

/// Reassign the trade to the selected node and re-post it
pub async fn move_trade_node(
    bot: &Bot,
    q: &CallbackQuery,
    nodes: &[NodeRef],
    short_key: &str,
) -> Result<()> {
    let msg = q
        .regular_message()
        .context("Expected a message on the trade move button")?;

    let (node, mut trade) = match (find_node_by_short_key(nodes, short_key), message_trade(msg)) {
        (Some(node), Some(trade)) => (node, trade),
        _ => {
            post_failure(bot, msg.chat.id, FailureKind::Generic).await?;
            respond(bot, q).await;

            return Ok(());
        }
    };

    trade.nodes = vec![node.public_key.clone()];

    bot.delete_message(msg.chat.id, msg.id).await.ok();

    post_created_trade(bot, msg.chat.id, nodes, node, &trade).await?;

    respond(bot, q).await;

    Ok(())
}
