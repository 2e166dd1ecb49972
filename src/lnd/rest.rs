//! LND REST API client.
//!
//! LND exposes its gRPC surface over a REST proxy; authentication is a hex
//! macaroon in the `Grpc-Metadata-macaroon` header and uint64 fields arrive
//! as JSON strings.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{
    Channel, CreatedInvoice, Forward, NodeFunds, NodeInfo, NodeRpc, PendingChannel,
    PendingChannelKind, SettledInvoice,
};

const MACAROON_HEADER: &str = "Grpc-Metadata-macaroon";
const MAX_EVENTS: u32 = 1000;

pub struct LndRestClient {
    base: String,
    macaroon: String,
    http: reqwest::Client,
}

impl LndRestClient {
    pub fn new(rest_host: &str, macaroon_hex: &str, accept_invalid_certs: bool) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .context("Failed to build HTTP client for node")?;

        Ok(Self {
            base: rest_host.trim_end_matches('/').to_string(),
            macaroon: macaroon_hex.to_string(),
            http,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base, path);

        let res = self
            .http
            .get(&url)
            .header(MACAROON_HEADER, &self.macaroon)
            .send()
            .await
            .with_context(|| format!("Failed to reach node at {url}"))?
            .error_for_status()
            .with_context(|| format!("Node returned an error for {path}"))?;

        res.json()
            .await
            .with_context(|| format!("Unexpected response shape from {path}"))
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base, path);

        let res = self
            .http
            .post(&url)
            .header(MACAROON_HEADER, &self.macaroon)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach node at {url}"))?
            .error_for_status()
            .with_context(|| format!("Node returned an error for {path}"))?;

        res.json()
            .await
            .with_context(|| format!("Unexpected response shape from {path}"))
    }
}

/// Parse an LND string-encoded integer, tolerating absent fields
fn sat(n: &str) -> u64 {
    n.parse().unwrap_or_default()
}

fn time(seconds: &str) -> DateTime<Utc> {
    Utc.timestamp_opt(sat(seconds) as i64, 0)
        .single()
        .unwrap_or_default()
}

#[derive(Deserialize)]
struct GetInfoResponse {
    #[serde(default)]
    alias: String,
    #[serde(default)]
    identity_pubkey: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    block_height: u64,
    #[serde(default)]
    synced_to_chain: bool,
    #[serde(default)]
    num_active_channels: u64,
    #[serde(default)]
    num_peers: u64,
    #[serde(default)]
    chains: Vec<ChainInfo>,
    #[serde(default)]
    uris: Vec<String>,
}

#[derive(Deserialize)]
struct ChainInfo {
    #[serde(default)]
    network: String,
}

#[derive(Deserialize)]
struct ChainBalanceResponse {
    #[serde(default)]
    confirmed_balance: String,
    #[serde(default)]
    unconfirmed_balance: String,
}

#[derive(Deserialize)]
struct ChannelBalanceResponse {
    #[serde(default)]
    balance: String,
    #[serde(default)]
    pending_open_balance: String,
}

#[derive(Deserialize)]
struct ListChannelsResponse {
    #[serde(default)]
    channels: Vec<ChannelRecord>,
}

#[derive(Deserialize)]
struct ChannelRecord {
    #[serde(default)]
    chan_id: String,
    #[serde(default)]
    remote_pubkey: String,
    #[serde(default)]
    capacity: String,
    #[serde(default)]
    local_balance: String,
    #[serde(default)]
    remote_balance: String,
    #[serde(default)]
    active: bool,
    #[serde(default)]
    pending_htlcs: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct PendingChannelsResponse {
    #[serde(default)]
    pending_open_channels: Vec<PendingEntry>,
    #[serde(default)]
    waiting_close_channels: Vec<PendingEntry>,
    #[serde(default)]
    pending_force_closing_channels: Vec<PendingEntry>,
}

#[derive(Deserialize)]
struct PendingEntry {
    #[serde(default)]
    channel: Option<PendingChannelRecord>,
}

#[derive(Deserialize, Default)]
struct PendingChannelRecord {
    #[serde(default)]
    remote_node_pub: String,
    #[serde(default)]
    capacity: String,
    #[serde(default)]
    local_balance: String,
}

#[derive(Serialize)]
struct ForwardingHistoryRequest {
    start_time: String,
    num_max_events: u32,
}

#[derive(Deserialize)]
struct ForwardingHistoryResponse {
    #[serde(default)]
    forwarding_events: Vec<ForwardingEvent>,
}

#[derive(Deserialize)]
struct ForwardingEvent {
    #[serde(default)]
    fee: String,
    #[serde(default)]
    amt_out: String,
}

#[derive(Deserialize)]
struct TransactionsResponse {
    #[serde(default)]
    transactions: Vec<TransactionRecord>,
}

#[derive(Deserialize)]
struct TransactionRecord {
    #[serde(default)]
    time_stamp: String,
    #[serde(default)]
    total_fees: String,
}

#[derive(Deserialize)]
struct PaymentsResponse {
    #[serde(default)]
    payments: Vec<PaymentRecord>,
}

#[derive(Deserialize)]
struct PaymentRecord {
    #[serde(default)]
    fee_sat: String,
}

#[derive(Serialize)]
struct AddInvoiceRequest {
    memo: String,
    value: String,
}

#[derive(Deserialize)]
struct AddInvoiceResponse {
    #[serde(default)]
    payment_request: String,
}

#[derive(Deserialize)]
struct ListInvoicesResponse {
    #[serde(default)]
    invoices: Vec<InvoiceRecord>,
}

#[derive(Deserialize)]
struct InvoiceRecord {
    #[serde(default)]
    memo: String,
    #[serde(default)]
    amt_paid_sat: String,
    #[serde(default)]
    settle_index: String,
    #[serde(default)]
    state: String,
}

#[derive(Deserialize)]
struct ChannelBackupResponse {
    #[serde(default)]
    multi_chan_backup: Option<MultiChanBackup>,
}

#[derive(Deserialize, Default)]
struct MultiChanBackup {
    #[serde(default)]
    multi_chan_backup: String,
}

#[async_trait]
impl NodeRpc for LndRestClient {
    async fn get_info(&self) -> Result<NodeInfo> {
        let res: GetInfoResponse = self.get("/v1/getinfo").await?;

        let network = res
            .chains
            .first()
            .map(|c| c.network.clone())
            .unwrap_or_else(|| "mainnet".to_string());

        Ok(NodeInfo {
            alias: res.alias,
            public_key: res.identity_pubkey,
            version: res.version,
            block_height: res.block_height,
            is_synced: res.synced_to_chain,
            active_channels: res.num_active_channels,
            peers: res.num_peers,
            network,
            uris: res.uris,
        })
    }

    async fn get_funds(&self) -> Result<NodeFunds> {
        let chain: ChainBalanceResponse = self.get("/v1/balance/blockchain").await?;
        let channels: ChannelBalanceResponse = self.get("/v1/balance/channels").await?;

        Ok(NodeFunds {
            chain_confirmed: sat(&chain.confirmed_balance),
            chain_pending: sat(&chain.unconfirmed_balance),
            channel_balance: sat(&channels.balance),
            channel_pending: sat(&channels.pending_open_balance),
        })
    }

    async fn get_channels(&self) -> Result<Vec<Channel>> {
        let res: ListChannelsResponse = self.get("/v1/channels").await?;

        Ok(res
            .channels
            .into_iter()
            .map(|c| Channel {
                id: c.chan_id,
                peer_public_key: c.remote_pubkey,
                capacity: sat(&c.capacity),
                local_balance: sat(&c.local_balance),
                remote_balance: sat(&c.remote_balance),
                is_active: c.active,
                pending_htlcs: c.pending_htlcs.len() as u64,
            })
            .collect())
    }

    async fn get_pending_channels(&self) -> Result<Vec<PendingChannel>> {
        let res: PendingChannelsResponse = self.get("/v1/channels/pending").await?;

        let collect = |entries: Vec<PendingEntry>, kind: PendingChannelKind| {
            entries
                .into_iter()
                .map(move |entry| {
                    let channel = entry.channel.unwrap_or_default();

                    PendingChannel {
                        peer_public_key: channel.remote_node_pub,
                        capacity: sat(&channel.capacity),
                        kind,
                    }
                })
                .collect::<Vec<PendingChannel>>()
        };

        let mut pending = collect(res.pending_open_channels, PendingChannelKind::Opening);
        pending.extend(collect(res.waiting_close_channels, PendingChannelKind::Closing));
        pending.extend(collect(
            res.pending_force_closing_channels,
            PendingChannelKind::ForceClosing,
        ));

        Ok(pending)
    }

    async fn get_forwards(&self, after: DateTime<Utc>) -> Result<Vec<Forward>> {
        let body = ForwardingHistoryRequest {
            start_time: after.timestamp().to_string(),
            num_max_events: MAX_EVENTS,
        };

        let res: ForwardingHistoryResponse = self.post("/v1/switch", &body).await?;

        Ok(res
            .forwarding_events
            .into_iter()
            .map(|event| Forward {
                fee: sat(&event.fee),
                tokens: sat(&event.amt_out),
            })
            .collect())
    }

    async fn get_chain_fees(&self, after: DateTime<Utc>) -> Result<u64> {
        let res: TransactionsResponse = self.get("/v1/transactions").await?;

        Ok(res
            .transactions
            .iter()
            .filter(|tx| time(&tx.time_stamp) > after)
            .map(|tx| sat(&tx.total_fees))
            .sum())
    }

    async fn get_payment_fees(&self, after: DateTime<Utc>) -> Result<u64> {
        let path = format!(
            "/v1/payments?include_incomplete=false&creation_date_start={}",
            after.timestamp()
        );

        let res: PaymentsResponse = self.get(&path).await?;

        Ok(res.payments.iter().map(|payment| sat(&payment.fee_sat)).sum())
    }

    async fn add_invoice(&self, description: &str, tokens: u64) -> Result<CreatedInvoice> {
        let body = AddInvoiceRequest {
            memo: description.to_string(),
            value: tokens.to_string(),
        };

        let res: AddInvoiceResponse = self.post("/v1/invoices", &body).await?;

        if res.payment_request.is_empty() {
            anyhow::bail!("Node returned an invoice without a payment request");
        }

        Ok(CreatedInvoice {
            request: res.payment_request,
        })
    }

    async fn settled_invoices_after(&self, index: u64) -> Result<Vec<SettledInvoice>> {
        let res: ListInvoicesResponse = self
            .get("/v1/invoices?pending_only=false&reversed=true&num_max_invoices=100")
            .await?;

        let mut settled: Vec<SettledInvoice> = res
            .invoices
            .into_iter()
            .filter(|invoice| invoice.state == "SETTLED")
            .map(|invoice| SettledInvoice {
                description: invoice.memo,
                received: sat(&invoice.amt_paid_sat),
                settle_index: sat(&invoice.settle_index),
            })
            .filter(|invoice| invoice.settle_index > index)
            .collect();

        settled.sort_by_key(|invoice| invoice.settle_index);

        Ok(settled)
    }

    async fn get_backup(&self) -> Result<String> {
        let res: ChannelBackupResponse = self.get("/v1/channels/backup").await?;

        Ok(res.multi_chan_backup.unwrap_or_default().multi_chan_backup)
    }
}
