//! Background notifier.
//!
//! The bot holds no state of its own, so notifications come from polling
//! each node and diffing against the previous snapshot: channels appearing
//! or disappearing, invoices crossing the settle index, the backup blob
//! changing, and the node stopping to answer at all.

use std::collections::HashSet;
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::{debug, warn};

use crate::interface::format_tokens;
use crate::lnd::Channel;
use crate::nodes::NodeRef;

struct NodeWatch {
    is_online: bool,
    channel_ids: HashSet<String>,
    settle_index: u64,
    backup: String,
}

/// Poll all nodes forever, pushing event notifications into the chat
pub async fn run_notifier(bot: Bot, chat: ChatId, nodes: Vec<NodeRef>, poll_seconds: u64) {
    let mut watches: Vec<Option<NodeWatch>> = nodes.iter().map(|_| None).collect();
    let mut ticker = tokio::time::interval(Duration::from_secs(poll_seconds.max(1)));

    loop {
        ticker.tick().await;

        for (node, watch) in nodes.iter().zip(watches.iter_mut()) {
            if let Err(err) = poll_node(&bot, chat, node, watch).await {
                warn!("Notifier poll failed for {}: {:#}", node.from, err);
            }
        }
    }
}

async fn poll_node(
    bot: &Bot,
    chat: ChatId,
    node: &NodeRef,
    watch: &mut Option<NodeWatch>,
) -> anyhow::Result<()> {
    let is_online = node.rpc.get_info().await.is_ok();

    // First cycle just records the current state, nothing is news yet
    let current = match watch {
        Some(current) => current,
        None => {
            let initial = snapshot(node, is_online).await;

            debug!("Started watching node {}", node.from);
            *watch = Some(initial);

            return Ok(());
        }
    };

    if is_online != current.is_online {
        let text = if is_online {
            format!("🟢 {} is back online", node.from)
        } else {
            format!("🔴 {} is offline", node.from)
        };

        bot.send_message(chat, text).await?;
        current.is_online = is_online;
    }

    if !is_online {
        return Ok(());
    }

    let channels = node.rpc.get_channels().await?;
    let channel_ids: HashSet<String> = channels.iter().map(|c| c.id.clone()).collect();

    for channel in channels.iter().filter(|c| !current.channel_ids.contains(&c.id)) {
        bot.send_message(chat, opened_message(node, channel)).await?;
    }

    for closed in current.channel_ids.difference(&channel_ids) {
        bot.send_message(chat, format!("🥀 {}: channel {} closed", node.from, closed))
            .await?;
    }

    current.channel_ids = channel_ids;

    for settled in node.rpc.settled_invoices_after(current.settle_index).await? {
        let memo = if settled.description.is_empty() {
            String::new()
        } else {
            format!(" “{}”", settled.description)
        };

        bot.send_message(
            chat,
            format!(
                "💰 {}: received {}{}",
                node.from,
                format_tokens(settled.received),
                memo
            ),
        )
        .await?;

        current.settle_index = current.settle_index.max(settled.settle_index);
    }

    let backup = node.rpc.get_backup().await?;

    if !current.backup.is_empty() && backup != current.backup {
        bot.send_message(chat, format!("💾 {}: channel backup updated", node.from))
            .await?;
    }

    current.backup = backup;

    Ok(())
}

fn opened_message(node: &NodeRef, channel: &Channel) -> String {
    let peer = &channel.peer_public_key;
    let short = &peer[..peer.len().min(8)];

    format!(
        "🌱 {}: opened {} channel with {}",
        node.from,
        format_tokens(channel.capacity),
        short
    )
}

async fn snapshot(node: &NodeRef, is_online: bool) -> NodeWatch {
    let channel_ids = match node.rpc.get_channels().await {
        Ok(channels) => channels.into_iter().map(|c| c.id).collect(),
        Err(_) => HashSet::new(),
    };

    let settle_index = match node.rpc.settled_invoices_after(0).await {
        Ok(settled) => settled.iter().map(|s| s.settle_index).max().unwrap_or(0),
        Err(_) => 0,
    };

    let backup = node.rpc.get_backup().await.unwrap_or_default();

    NodeWatch {
        is_online,
        channel_ids,
        settle_index,
        backup,
    }
}
