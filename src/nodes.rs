use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::try_join_all;
use tracing::info;

use crate::config::NodeConfig;
use crate::lnd::{LndRestClient, NodeRpc};

/// Length of the truncated public key carried in move-node button payloads.
/// Telegram limits callback data to 64 bytes, which doesn't fit a full key.
pub const SHORT_KEY_LENGTH: usize = 46;

/// A configured node: label, identity key and an RPC handle.
///
/// The list of node references is loaded once at startup and shared
/// read-only across all chat events.
#[derive(Clone)]
pub struct NodeRef {
    pub from: String,
    pub public_key: String,
    pub rpc: Arc<dyn NodeRpc>,
}

impl NodeRef {
    pub fn short_key(&self) -> &str {
        &self.public_key[..self.public_key.len().min(SHORT_KEY_LENGTH)]
    }
}

/// Connect to every configured node and capture its identity key
pub async fn connect_nodes(configs: &[NodeConfig]) -> Result<Vec<NodeRef>> {
    let nodes = try_join_all(configs.iter().map(|config| async move {
        let rpc: Arc<dyn NodeRpc> = Arc::new(LndRestClient::new(
            &config.rest_host,
            &config.macaroon,
            config.accept_invalid_certs,
        )?);

        let node_info = rpc
            .get_info()
            .await
            .with_context(|| format!("Failed to get identity of node {}", config.from))?;

        info!(
            "Connected to {} ({}) on {}",
            config.from, node_info.public_key, node_info.network
        );

        Ok::<NodeRef, anyhow::Error>(NodeRef {
            from: config.from.clone(),
            public_key: node_info.public_key,
            rpc,
        })
    }))
    .await?;

    Ok(nodes)
}

/// Find the node with the given identity key
pub fn find_node<'a>(nodes: &'a [NodeRef], public_key: &str) -> Option<&'a NodeRef> {
    nodes.iter().find(|n| n.public_key == public_key)
}

/// Find the node whose key starts with a truncated-key button suffix
pub fn find_node_by_short_key<'a>(nodes: &'a [NodeRef], short_key: &str) -> Option<&'a NodeRef> {
    if short_key.is_empty() {
        return None;
    }

    nodes.iter().find(|n| n.public_key.starts_with(short_key))
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::lnd::{
        Channel, CreatedInvoice, Forward, NodeFunds, NodeInfo, PendingChannel, SettledInvoice,
    };
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    /// Node RPC stand-in for tests that never reaches a network
    pub struct StubRpc;

    #[async_trait]
    impl NodeRpc for StubRpc {
        async fn get_info(&self) -> anyhow::Result<NodeInfo> {
            anyhow::bail!("stub")
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

    pub fn node(from: &str, public_key: &str) -> NodeRef {
        NodeRef {
            from: from.to_string(),
            public_key: public_key.to_string(),
            rpc: Arc::new(StubRpc),
        }
    }

    #[test]
    fn short_key_is_truncated_identity() {
        let key = "03e7156ae33b0a208d0744199163177e909e80176e55d97a2f221ede0f934dd9ad";
        let n = node("alpha", key);

        assert_eq!(n.short_key(), &key[..SHORT_KEY_LENGTH]);
        assert_eq!(find_node_by_short_key(&[n.clone()], n.short_key()).map(|f| &*f.from), Some("alpha"));
    }

    #[test]
    fn empty_short_key_matches_nothing() {
        let n = node("alpha", "03aa");

        assert!(find_node_by_short_key(&[n], "").is_none());
    }
}
