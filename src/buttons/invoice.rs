use std::str::FromStr;

use anyhow::{Context, Result};
use lightning_invoice::{Bolt11Invoice, Bolt11InvoiceDescription};
use teloxide::payloads::EditMessageReplyMarkupSetters;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ForceReply, Message, ParseMode};

use super::respond;
use crate::messages::invoice::{invoice_title_line, move_node_keyboard, question_message_text};
use crate::messages::FailureKind;
use crate::nodes::{find_node, find_node_by_short_key, NodeRef};
use crate::post::{post_created_invoice, post_failure};

/// Pull the payment request line out of a created invoice message
fn message_invoice(msg: &Message) -> Option<Bolt11Invoice> {
    let request = msg.text()?.split('\n').nth(1)?;

    Bolt11Invoice::from_str(request).ok()
}

fn invoice_description(invoice: &Bolt11Invoice) -> String {
    match invoice.description() {
        Bolt11InvoiceDescription::Direct(description) => description.to_string(),
        Bolt11InvoiceDescription::Hash(_) => String::new(),
    }
}

fn invoice_tokens(invoice: &Bolt11Invoice) -> u64 {
    invoice
        .amount_milli_satoshis()
        .map(|msat| msat / 1000)
        .unwrap_or_default()
}

/// Replace the invoice message with an edit question that forces a reply
pub async fn ask_invoice_question(
    bot: &Bot,
    q: &CallbackQuery,
    nodes: &[NodeRef],
    question: &str,
) -> Result<()> {
    let msg = q
        .regular_message()
        .context("Expected a message on the invoice edit button")?;

    let invoice = match message_invoice(msg) {
        Some(invoice) => invoice,
        None => {
            post_failure(bot, msg.chat.id, FailureKind::Generic).await?;
            respond(bot, q).await;

            return Ok(());
        }
    };

    let destination = invoice.recover_payee_pub_key().to_string();

    if find_node(nodes, &destination).is_none() {
        post_failure(bot, msg.chat.id, FailureKind::Generic).await?;
        respond(bot, q).await;

        return Ok(());
    }

    let title = invoice_title_line(invoice_tokens(&invoice), &invoice_description(&invoice));
    let text = question_message_text(&title, &invoice.to_string(), question);

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(ForceReply::new())
        .await?;

    bot.delete_message(msg.chat.id, msg.id).await.ok();

    respond(bot, q).await;

    Ok(())
}

/// Swap the invoice keyboard for the list of nodes it can move to
pub async fn set_invoice_node(bot: &Bot, q: &CallbackQuery, nodes: &[NodeRef]) -> Result<()> {
    let msg = q
        .regular_message()
        .context("Expected a message on the invoice node button")?;

    bot.edit_message_reply_markup(msg.chat.id, msg.id)
        .reply_markup(move_node_keyboard(nodes))
        .await?;

    respond(bot, q).await;

    Ok(())
}

/// Recreate the invoice on the selected node and remove the old message
pub async fn move_invoice_node(
    bot: &Bot,
    q: &CallbackQuery,
    nodes: &[NodeRef],
    short_key: &str,
) -> Result<()> {
    let msg = q
        .regular_message()
        .context("Expected a message on the invoice move button")?;

    let (node, invoice) = match (find_node_by_short_key(nodes, short_key), message_invoice(msg)) {
        (Some(node), Some(invoice)) => (node, invoice),
        _ => {
            post_failure(bot, msg.chat.id, FailureKind::Generic).await?;
            respond(bot, q).await;

            return Ok(());
        }
    };

    let description = invoice_description(&invoice);
    let tokens = invoice_tokens(&invoice);

    bot.delete_message(msg.chat.id, msg.id).await.ok();

    post_created_invoice(bot, msg.chat.id, nodes, node, &description, tokens).await?;

    respond(bot, q).await;

    Ok(())
}
