use anyhow::Result;
use futures::future::try_join_all;
use teloxide::prelude::*;
use teloxide::types::ChatId;

use crate::messages::summary::info_summary;
use crate::messages::ComposedMessage;
use crate::nodes::NodeRef;
use crate::post::send_composed;

/// See identity and status details for every node
pub async fn handle_info_command(bot: &Bot, chat: ChatId, nodes: &[NodeRef]) -> Result<()> {
    let details = try_join_all(nodes.iter().map(|node| node.rpc.get_info())).await?;

    let entries: Vec<_> = nodes
        .iter()
        .map(|node| node.from.clone())
        .zip(details)
        .collect();

    send_composed(
        bot,
        chat,
        ComposedMessage {
            text: info_summary(&entries),
            markup: None,
        },
    )
    .await
}
