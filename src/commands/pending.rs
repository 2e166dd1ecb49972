use anyhow::Result;
use futures::future::try_join_all;
use teloxide::prelude::*;
use teloxide::types::ChatId;

use crate::messages::summary::pending_summary;
use crate::messages::ComposedMessage;
use crate::nodes::NodeRef;
use crate::post::send_composed;

/// See channels that are opening or closing and HTLCs in flight
pub async fn handle_pending_command(bot: &Bot, chat: ChatId, nodes: &[NodeRef]) -> Result<()> {
    let gathered = try_join_all(nodes.iter().map(|node| async move {
        let pending = node.rpc.get_pending_channels().await?;
        let channels = node.rpc.get_channels().await?;

        let htlcs: u64 = channels.iter().map(|c| c.pending_htlcs).sum();

        Ok::<_, anyhow::Error>((node.from.clone(), pending, htlcs))
    }))
    .await?;

    send_composed(
        bot,
        chat,
        ComposedMessage {
            text: pending_summary(&gathered),
            markup: None,
        },
    )
    .await
}
