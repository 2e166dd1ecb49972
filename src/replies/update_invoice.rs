use std::str::FromStr;

use anyhow::{Context, Result};
use lightning_invoice::{Bolt11Invoice, Bolt11InvoiceDescription};
use teloxide::prelude::*;

use crate::interface::{parse_tokens, AmountError, CallbackCommand};
use crate::messages::FailureKind;
use crate::nodes::{find_node, NodeRef};
use crate::post::{post_created_invoice, post_failure};

/// Apply a typed reply to a created invoice.
///
/// The replied-to message already classified as an invoice edit question, so
/// its second line is the payment request being edited. The edited invoice
/// is recreated on its node and posted fresh; the question and the answer
/// messages are removed.
pub async fn update_invoice_from_reply(
    bot: &Bot,
    msg: &Message,
    nodes: &[NodeRef],
    action: CallbackCommand,
) -> Result<()> {
    let replied_to = msg
        .reply_to_message()
        .context("Expected a replied-to message to update an invoice")?;

    let text = replied_to.text().unwrap_or_default();

    let request = text
        .split('\n')
        .nth(1)
        .context("Expected a payment request line on the invoice message")?;

    let invoice = Bolt11Invoice::from_str(request)
        .ok()
        .context("Expected a valid payment request to update an invoice")?;

    let destination = invoice.recover_payee_pub_key().to_string();

    let node = match find_node(nodes, &destination) {
        Some(node) => node,
        None => {
            post_failure(bot, msg.chat.id, FailureKind::Generic).await?;

            return Ok(());
        }
    };

    let tokens = invoice
        .amount_milli_satoshis()
        .map(|msat| msat / 1000)
        .unwrap_or_default();

    let description = match invoice.description() {
        Bolt11InvoiceDescription::Direct(description) => description.to_string(),
        Bolt11InvoiceDescription::Hash(_) => String::new(),
    };

    let answer = msg.text().unwrap_or_default().trim().to_string();

    // Remove the question and the answer now that the edit is understood
    bot.delete_message(msg.chat.id, msg.id).await.ok();
    bot.delete_message(replied_to.chat.id, replied_to.id).await.ok();

    let (description, tokens) = match action {
        CallbackCommand::SetInvoiceDescription => (answer, tokens),
        CallbackCommand::SetInvoiceTokens => match parse_tokens(&answer) {
            Ok(updated) => (description, updated),
            Err(err) => {
                let kind = match err {
                    AmountError::Fractional => FailureKind::FractionalAmount,
                    AmountError::Invalid => FailureKind::InvalidAmount,
                };

                post_failure(bot, msg.chat.id, kind).await?;

                // Revert to the last good amount
                (description, tokens)
            }
        },
        _ => return Ok(()),
    };

    post_created_invoice(bot, msg.chat.id, nodes, node, &description, tokens).await
}
