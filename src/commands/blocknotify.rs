use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::warn;

use crate::lnd::NodeRpc;
use crate::nodes::NodeRef;

const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Notify once when the chain height advances.
///
/// Chain height is network-global, so the first node answers for all of
/// them. The wait runs in a background task and the command returns after
/// confirming the current height.
pub async fn handle_blocknotify_command(bot: &Bot, chat: ChatId, nodes: &[NodeRef]) -> Result<()> {
    let rpc = Arc::clone(&nodes[0].rpc);
    let start = rpc.get_info().await?.block_height;

    bot.send_message(
        chat,
        format!("🤖 Requesting block notification. Chain height is now {start}"),
    )
    .await?;

    let bot = bot.clone();

    tokio::spawn(async move {
        match wait_for_height_above(&rpc, start, POLL_INTERVAL).await {
            Ok(height) => {
                bot.send_message(chat, format!("⛏ Block mined. Chain height is now {height}"))
                    .await
                    .ok();
            }
            Err(err) => warn!("Block notification failed: {:#}", err),
        }
    });

    Ok(())
}

/// Poll until the reported height exceeds the starting height
async fn wait_for_height_above(
    rpc: &Arc<dyn NodeRpc>,
    start: u64,
    poll: Duration,
) -> Result<u64> {
    let mut ticker = tokio::time::interval(poll);

    loop {
        ticker.tick().await;

        let height = rpc.get_info().await?.block_height;

        if height > start {
            return Ok(height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lnd::{
        Channel, CreatedInvoice, Forward, NodeFunds, NodeInfo, PendingChannel, SettledInvoice,
    };
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Reports a chain height that climbs by one per query
    struct ClimbingChain {
        height: AtomicU64,
    }

    #[async_trait]
    impl NodeRpc for ClimbingChain {
        async fn get_info(&self) -> anyhow::Result<NodeInfo> {
            Ok(NodeInfo {
                alias: String::new(),
                public_key: String::new(),
                version: String::new(),
                block_height: self.height.fetch_add(1, Ordering::SeqCst),
                is_synced: true,
                active_channels: 0,
                peers: 0,
                network: "mainnet".to_string(),
                uris: Vec::new(),
            })
        }

        async fn get_funds(&self) -> anyhow::Result<NodeFunds> {
            anyhow::bail!("stub")
        }

        async fn get_channels(&self) -> anyhow::Result<Vec<Channel>> {
            anyhow::bail!("stub")
        }

        async fn get_pending_channels(&self) -> anyhow::Result<Vec<PendingChannel>> {
            anyhow::bail!("stub")
        }

        async fn get_forwards(&self, _: DateTime<Utc>) -> anyhow::Result<Vec<Forward>> {
            anyhow::bail!("stub")
        }

        async fn get_chain_fees(&self, _: DateTime<Utc>) -> anyhow::Result<u64> {
            anyhow::bail!("stub")
        }

        async fn get_payment_fees(&self, _: DateTime<Utc>) -> anyhow::Result<u64> {
            anyhow::bail!("stub")
        }

        async fn add_invoice(&self, _: &str, _: u64) -> anyhow::Result<CreatedInvoice> {
            anyhow::bail!("stub")
        }

        async fn settled_invoices_after(&self, _: u64) -> anyhow::Result<Vec<SettledInvoice>> {
            anyhow::bail!("stub")
        }

        async fn get_backup(&self) -> anyhow::Result<String> {
            anyhow::bail!("stub")
        }
    }

    #[tokio::test]
    async fn waits_until_the_height_passes_the_start() {
        let rpc: Arc<dyn NodeRpc> = Arc::new(ClimbingChain {
            height: AtomicU64::new(100),
        });

        let height = wait_for_height_above(&rpc, 100, Duration::from_millis(1))
            .await
            .unwrap();

        assert_eq!(height, 101);
    }
}
