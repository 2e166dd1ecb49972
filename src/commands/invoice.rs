use anyhow::Result;
use teloxide::prelude::*;

use super::{decode_command, CommandError, CommandHelp};
use crate::interface::{parse_tokens, AmountError};
use crate::messages::FailureKind;
use crate::nodes::NodeRef;
use crate::post::{post_created_invoice, post_failure};

const HELP: CommandHelp = CommandHelp {
    select_node_text: "Which node should create the invoice?",
    syntax_example_text: "/invoice 21000 memo",
};

/// Create an invoice: /invoice [amount] [memo...]
///
/// With several nodes configured the first parameter is the node index.
pub async fn handle_invoice_command(
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

    let tokens = match decoded.params.first() {
        None => 0,
        Some(amount) => match parse_tokens(amount) {
            Ok(tokens) => tokens,
            Err(err) => {
                let kind = match err {
                    AmountError::Fractional => FailureKind::FractionalAmount,
                    AmountError::Invalid => FailureKind::InvalidAmount,
                };

                return post_failure(bot, msg.chat.id, kind).await;
            }
        },
    };

    let description = decoded.params.get(1..).unwrap_or_default().join(" ");

    // The command message itself is noise once the invoice is posted
    bot.delete_message(msg.chat.id, msg.id).await.ok();

    post_created_invoice(bot, msg.chat.id, nodes, node, &description, tokens).await
}
