pub mod rest;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use rest::LndRestClient;

/// Identity and status details of a node
#[derive(Debug, Clone)]
pub struct NodeInfo {
    pub alias: String,
    pub public_key: String,
    pub version: String,
    pub block_height: u64,
    pub is_synced: bool,
    pub active_channels: u64,
    pub peers: u64,
    pub network: String,
    pub uris: Vec<String>,
}

/// Confirmed and pending balances, on chain and in channels
#[derive(Debug, Clone, Default)]
pub struct NodeFunds {
    pub chain_confirmed: u64,
    pub chain_pending: u64,
    pub channel_balance: u64,
    pub channel_pending: u64,
}

impl NodeFunds {
    pub fn total(&self) -> u64 {
        self.chain_confirmed + self.chain_pending + self.channel_balance + self.channel_pending
    }
}

/// An open channel with a peer
#[derive(Debug, Clone)]
pub struct Channel {
    pub id: String,
    pub peer_public_key: String,
    pub capacity: u64,
    pub local_balance: u64,
    pub remote_balance: u64,
    pub is_active: bool,
    pub pending_htlcs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingChannelKind {
    Opening,
    Closing,
    ForceClosing,
}

/// A channel that is not yet open or not yet fully closed
#[derive(Debug, Clone)]
pub struct PendingChannel {
    pub peer_public_key: String,
    pub capacity: u64,
    pub kind: PendingChannelKind,
}

/// A routed payment that earned a forwarding fee
#[derive(Debug, Clone)]
pub struct Forward {
    pub fee: u64,
    pub tokens: u64,
}

#[derive(Debug, Clone)]
pub struct CreatedInvoice {
    pub request: String,
}

/// An invoice that was paid
#[derive(Debug, Clone)]
pub struct SettledInvoice {
    pub description: String,
    pub received: u64,
    pub settle_index: u64,
}

/// RPC boundary to a Lightning node.
///
/// Everything the bot knows about a node passes through this trait; handlers
/// never talk to the wire format directly. The concrete implementation is
/// [`LndRestClient`], tests substitute their own.
#[async_trait]
pub trait NodeRpc: Send + Sync {
    async fn get_info(&self) -> Result<NodeInfo>;

    async fn get_funds(&self) -> Result<NodeFunds>;

    async fn get_channels(&self) -> Result<Vec<Channel>>;

    async fn get_pending_channels(&self) -> Result<Vec<PendingChannel>>;

    /// Forwards that settled after the given time
    async fn get_forwards(&self, after: DateTime<Utc>) -> Result<Vec<Forward>>;

    /// Chain fees paid on transactions after the given time
    async fn get_chain_fees(&self, after: DateTime<Utc>) -> Result<u64>;

    /// Total fees paid on payments created after the given time
    async fn get_payment_fees(&self, after: DateTime<Utc>) -> Result<u64>;

    async fn add_invoice(&self, description: &str, tokens: u64) -> Result<CreatedInvoice>;

    /// Settled invoices with a settle index greater than the given one
    async fn settled_invoices_after(&self, index: u64) -> Result<Vec<SettledInvoice>>;

    /// Opaque snapshot of the current channels backup
    async fn get_backup(&self) -> Result<String>;
}
