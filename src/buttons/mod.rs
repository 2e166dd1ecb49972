//! Callback button dispatch.
//!
//! A button press carries a payload string; decoding it selects exactly one
//! handler. The dispatcher itself has no side effects beyond the branch it
//! picks, and unknown payloads still acknowledge the callback so the
//! client's loading spinner stops.

mod invoice;
mod misc;
mod trade;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;

use crate::bot::AppState;
use crate::interface::templates::{
    EDIT_INVOICE_DESCRIPTION_QUESTION, EDIT_INVOICE_TOKENS_QUESTION,
    EDIT_TRADE_DESCRIPTION_QUESTION, EDIT_TRADE_EXPIRES_AT_QUESTION,
};
use crate::interface::CallbackCommand;

/// Respond to a button push on a message
pub async fn handle_button_push(bot: &Bot, q: &CallbackQuery, state: &AppState) -> Result<()> {
    let data = q.data.as_deref().unwrap_or_default();
    let nodes = &state.nodes;

    match CallbackCommand::parse(data) {
        Some(CallbackCommand::CancelInvoice) | Some(CallbackCommand::CancelTrade) => {
            misc::remove_message(bot, q).await
        }
        Some(CallbackCommand::MoveInvoiceNode(suffix)) => {
            invoice::move_invoice_node(bot, q, nodes, &suffix).await
        }
        Some(CallbackCommand::MoveTradeNode(suffix)) => {
            trade::move_trade_node(bot, q, nodes, &suffix).await
        }
        Some(CallbackCommand::RemoveMessage) => misc::remove_message(bot, q).await,
        Some(CallbackCommand::SetInvoiceDescription) => {
            invoice::ask_invoice_question(bot, q, nodes, EDIT_INVOICE_DESCRIPTION_QUESTION).await
        }
        Some(CallbackCommand::SetInvoiceNode) => invoice::set_invoice_node(bot, q, nodes).await,
        Some(CallbackCommand::SetInvoiceTokens) => {
            invoice::ask_invoice_question(bot, q, nodes, EDIT_INVOICE_TOKENS_QUESTION).await
        }
        Some(CallbackCommand::SetTradeDescription) => {
            trade::ask_trade_question(bot, q, nodes, EDIT_TRADE_DESCRIPTION_QUESTION).await
        }
        Some(CallbackCommand::SetTradeExpiresAt) => {
            trade::ask_trade_question(bot, q, nodes, EDIT_TRADE_EXPIRES_AT_QUESTION).await
        }
        Some(CallbackCommand::SetTradeNode) => trade::set_trade_node(bot, q, nodes).await,
        Some(CallbackCommand::TerminateBot) => misc::terminate_bot(bot, q, state).await,
        None => misc::warn_unknown_button(bot, q).await,
    }
}

/// Acknowledge a callback so the client stops its loading indicator
pub(crate) async fn respond(bot: &Bot, q: &CallbackQuery) {
    bot.answer_callback_query(q.id.clone()).await.ok();
}
