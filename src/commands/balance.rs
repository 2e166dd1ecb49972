use anyhow::Result;
use futures::future::try_join_all;
use teloxide::prelude::*;
use teloxide::types::ChatId;

use crate::messages::summary::funds_summary;
use crate::messages::ComposedMessage;
use crate::nodes::NodeRef;
use crate::post::send_composed;

/// See the balance of funds across all nodes
pub async fn handle_balance_command(bot: &Bot, chat: ChatId, nodes: &[NodeRef]) -> Result<()> {
    let balances = try_join_all(nodes.iter().map(|node| node.rpc.get_funds())).await?;

    let entries: Vec<_> = nodes
        .iter()
        .map(|node| node.from.clone())
        .zip(balances)
        .collect();

    send_composed(
        bot,
        chat,
        ComposedMessage {
            text: funds_summary(&entries),
            markup: None,
        },
    )
    .await
}
