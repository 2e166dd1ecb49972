//! Posting to the connected chat: created invoices and trades, failure
//! notices, and the background node-event notifications.

mod notify;

pub use notify::run_notifier;

use anyhow::Result;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};

use crate::messages::invoice::create_invoice_message;
use crate::messages::trade::create_trade_message;
use crate::messages::{failure_message, ComposedMessage, FailureKind};
use crate::nodes::NodeRef;
use crate::trades::TradeConnect;

/// Send a composed MarkdownV2 message with its keyboard
pub async fn send_composed(bot: &Bot, chat: ChatId, composed: ComposedMessage) -> Result<()> {
    let send = bot
        .send_message(chat, composed.text)
        .parse_mode(ParseMode::MarkdownV2);

    match composed.markup {
        Some(markup) => send.reply_markup(markup).await?,
        None => send.await?,
    };

    Ok(())
}

/// Create an invoice on a node and post the created invoice message
pub async fn post_created_invoice(
    bot: &Bot,
    chat: ChatId,
    nodes: &[NodeRef],
    node: &NodeRef,
    description: &str,
    tokens: u64,
) -> Result<()> {
    let created = node.rpc.add_invoice(description, tokens).await?;

    let composed = create_invoice_message(
        &node.from,
        &created.request,
        tokens,
        description,
        nodes.len() > 1,
    );

    send_composed(bot, chat, composed).await
}

/// Post the created trade message for a trade offered by a node
pub async fn post_created_trade(
    bot: &Bot,
    chat: ChatId,
    nodes: &[NodeRef],
    node: &NodeRef,
    trade: &TradeConnect,
) -> Result<()> {
    let composed = create_trade_message(&node.from, trade, nodes.len() > 1);

    send_composed(bot, chat, composed).await
}

/// Post a dismissable failure notice
pub async fn post_failure(bot: &Bot, chat: ChatId, kind: FailureKind) -> Result<()> {
    send_composed(bot, chat, failure_message(kind)).await
}
