use anyhow::Result;
use futures::future::try_join_all;
use teloxide::prelude::*;
use teloxide::types::ChatId;

use crate::messages::summary::liquidity_summary;
use crate::messages::ComposedMessage;
use crate::nodes::NodeRef;
use crate::post::send_composed;

/// See inbound and outbound liquidity, optionally filtered to one peer:
/// /liquidity [peer public key]
pub async fn handle_liquidity_command(
    bot: &Bot,
    chat: ChatId,
    nodes: &[NodeRef],
    text: &str,
) -> Result<()> {
    let peer = text.split_whitespace().nth(1).map(|s| s.to_lowercase());
    let peer = peer.as_deref();

    let channels = try_join_all(nodes.iter().map(|node| node.rpc.get_channels())).await?;

    let entries: Vec<(String, u64, u64)> = nodes
        .iter()
        .zip(channels)
        .map(|(node, channels)| {
            // Inactive channels hold no usable liquidity
            let relevant = channels
                .iter()
                .filter(|c| c.is_active)
                .filter(|c| peer.map_or(true, |key| c.peer_public_key == key));

            let (inbound, outbound) = relevant.fold((0, 0), |(inbound, outbound), c| {
                (inbound + c.remote_balance, outbound + c.local_balance)
            });

            (node.from.clone(), inbound, outbound)
        })
        .collect();

    send_composed(
        bot,
        chat,
        ComposedMessage {
            text: liquidity_summary(&entries, peer),
            markup: None,
        },
    )
    .await
}
