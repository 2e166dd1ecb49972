use std::sync::{Arc, OnceLock};

use anyhow::Result;
use teloxide::dispatching::ShutdownToken;
use teloxide::prelude::*;
use tracing::{debug, error, info, warn};

use crate::access::check_access;
use crate::buttons::handle_button_push;
use crate::commands::{self, Command};
use crate::interface::CallbackCommand;
use crate::messages::FailureKind;
use crate::nodes::NodeRef;
use crate::post::post_failure;
use crate::replies::{
    is_message_reply_action, reply_action_type, update_invoice_from_reply, update_trade_from_reply,
};

/// Shared application state
pub struct AppState {
    pub nodes: Vec<NodeRef>,
    pub connected_id: u64,
    pub shutdown: OnceLock<ShutdownToken>,
}

impl AppState {
    pub fn new(nodes: Vec<NodeRef>, connected_id: u64) -> Self {
        Self {
            nodes,
            connected_id,
            shutdown: OnceLock::new(),
        }
    }
}

/// Start the Telegram bot
pub async fn run(bot: Bot, state: Arc<AppState>) -> Result<()> {
    info!("Starting Telegram bot...");

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handle_callback))
        .branch(Update::filter_edited_message().endpoint(handle_edited_message))
        .branch(Update::filter_message().endpoint(handle_message));

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state.clone()])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("bot"))
        .build();

    // The /stop confirmation button uses this to end dispatch
    state.shutdown.set(dispatcher.shutdown_token()).ok();

    dispatcher.dispatch().await;

    Ok(())
}

async fn handle_callback(bot: Bot, q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    if check_access(q.from.id.0, state.connected_id).is_err() {
        warn!(user = q.from.id.0, "Ignoring button push from unknown user");
        bot.answer_callback_query(q.id.clone()).await.ok();

        return Ok(());
    }

    if let Err(err) = handle_button_push(&bot, &q, &state).await {
        error!("Error handling button push: {:#}", err);

        if let Some(msg) = q.regular_message() {
            post_failure(&bot, msg.chat.id, FailureKind::Generic).await.ok();
        }
    }

    Ok(())
}

async fn handle_edited_message(msg: Message) -> ResponseResult<()> {
    // Edits to already-handled messages carry no new intent
    debug!(id = ?msg.id, "Ignoring edited message");

    Ok(())
}

async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let user_id = match msg.from.as_ref() {
        Some(user) => user.id.0,
        None => return Ok(()),
    };

    let text = match msg.text() {
        Some(text) => text.to_string(),
        None => return Ok(()),
    };

    if check_access(user_id, state.connected_id).is_err() {
        warn!(user = user_id, "Message from unconnected user");

        // /connect must work before authorization so the operator can
        // learn the id to put in the config
        if Command::parse(&text) == Some(Command::Connect) {
            if let Err(err) = commands::dispatch(&bot, &msg, &state, Command::Connect, &text).await
            {
                error!("Error handling connect command: {:#}", err);
            }
        } else {
            bot.send_message(msg.chat.id, "🤖 Not connected. Use /connect to get your code.")
                .await
                .ok();
        }

        return Ok(());
    }

    let handled = if is_message_reply_action(&msg, &state.nodes) {
        handle_reply(&bot, &msg, &state).await
    } else if let Some(command) = Command::parse(&text) {
        commands::dispatch(&bot, &msg, &state, command, &text).await
    } else {
        // Free text outside a reply context has no meaning here
        debug!("Ignoring non-command message");

        Ok(())
    };

    if let Err(err) = handled {
        error!("Error handling message: {:#}", err);

        post_failure(&bot, msg.chat.id, FailureKind::Generic).await.ok();
    }

    Ok(())
}

async fn handle_reply(bot: &Bot, msg: &Message, state: &AppState) -> Result<()> {
    let replied_to = match msg.reply_to_message().and_then(|m| m.text()) {
        Some(text) => text,
        None => return Ok(()),
    };

    match reply_action_type(replied_to, &state.nodes) {
        Some(
            action @ (CallbackCommand::SetInvoiceDescription | CallbackCommand::SetInvoiceTokens),
        ) => update_invoice_from_reply(bot, msg, &state.nodes, action).await,
        Some(
            action @ (CallbackCommand::SetTradeDescription | CallbackCommand::SetTradeExpiresAt),
        ) => update_trade_from_reply(bot, msg, &state.nodes, action).await,
        _ => Ok(()),
    }
}
