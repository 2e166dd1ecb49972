use anyhow::Result;
use chrono::{Duration, Utc};
use teloxide::prelude::*;
use uuid::Uuid;

use super::{decode_command, CommandError, CommandHelp};
use crate::interface::{parse_tokens, AmountError};
use crate::messages::FailureKind;
use crate::nodes::NodeRef;
use crate::post::{post_created_trade, post_failure};
use crate::trades::TradeConnect;

const HELP: CommandHelp = CommandHelp {
    select_node_text: "Which node should offer the trade?",
    syntax_example_text: "/trade 150000 channel lease",
};

const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// Offer a trade: /trade <amount> [memo...]
pub async fn handle_trade_command(
    bot: &Bot,
    msg: &Message,
    nodes: &[NodeRef],
    text: &str,
) -> Result<()> {
    let mut help_replies = Vec::new();

    let decoded = match decode_command(nodes, text, &HELP, &mut |m| help_replies.push(m)) {
        Ok(decoded) => decoded,
        Err(CommandError::UnknownNode) => {
            for help in help_replies {
                bot.send_message(msg.chat.id, help).await?;
            }

            return Ok(());
        }
    };

    let node = &nodes[decoded.node_index];

    let tokens = match decoded.params.first().map(|amount| parse_tokens(amount)) {
        Some(Ok(tokens)) if tokens > 0 => tokens,
        Some(Err(AmountError::Fractional)) => {
            return post_failure(bot, msg.chat.id, FailureKind::FractionalAmount).await;
        }
        _ => {
            return post_failure(bot, msg.chat.id, FailureKind::InvalidAmount).await;
        }
    };

    let description = decoded.params.get(1..).unwrap_or_default().join(" ");

    let network = node.rpc.get_info().await?.network;

    let trade = TradeConnect {
        id: Uuid::new_v4().simple().to_string(),
        network,
        nodes: vec![node.public_key.clone()],
        description,
        tokens,
        expires_at: Utc::now() + Duration::days(DEFAULT_EXPIRY_DAYS),
    };

    bot.delete_message(msg.chat.id, msg.id).await.ok();

    post_created_trade(bot, msg.chat.id, nodes, node, &trade).await
}
