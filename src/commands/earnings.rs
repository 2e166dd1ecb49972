use anyhow::Result;
use chrono::{Duration, Utc};
use futures::future::try_join_all;
use teloxide::prelude::*;
use teloxide::types::ChatId;

use crate::messages::summary::earnings_summary;
use crate::messages::ComposedMessage;
use crate::nodes::NodeRef;
use crate::post::send_composed;

/// See forwarding fees earned over the past week
pub async fn handle_earnings_command(bot: &Bot, chat: ChatId, nodes: &[NodeRef]) -> Result<()> {
    let week_ago = Utc::now() - Duration::days(7);

    let forwards = try_join_all(nodes.iter().map(|node| node.rpc.get_forwards(week_ago))).await?;

    let entries: Vec<(String, u64, u64, u64)> = nodes
        .iter()
        .zip(forwards)
        .map(|(node, forwards)| {
            let volume: u64 = forwards.iter().map(|f| f.tokens).sum();
            let fees: u64 = forwards.iter().map(|f| f.fee).sum();

            (node.from.clone(), forwards.len() as u64, volume, fees)
        })
        .collect();

    send_composed(
        bot,
        chat,
        ComposedMessage {
            text: earnings_summary(&entries),
            markup: None,
        },
    )
    .await
}
