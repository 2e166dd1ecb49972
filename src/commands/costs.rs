use anyhow::Result;
use chrono::{Duration, Utc};
use futures::future::try_join_all;
use teloxide::prelude::*;
use teloxide::types::ChatId;

use crate::messages::summary::costs_summary;
use crate::messages::ComposedMessage;
use crate::nodes::NodeRef;
use crate::post::send_composed;

/// See chain fees and payment fees paid over the past week
pub async fn handle_costs_command(bot: &Bot, chat: ChatId, nodes: &[NodeRef]) -> Result<()> {
    let week_ago = Utc::now() - Duration::days(7);

    let gathered = try_join_all(nodes.iter().map(|node| async move {
        let chain_fees = node.rpc.get_chain_fees(week_ago).await?;
        let payment_fees = node.rpc.get_payment_fees(week_ago).await?;

        Ok::<_, anyhow::Error>((node.from.clone(), chain_fees, payment_fees))
    }))
    .await?;

    send_composed(
        bot,
        chat,
        ComposedMessage {
            text: costs_summary(&gathered),
            markup: None,
        },
    )
    .await
}
