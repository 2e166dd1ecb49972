//! Trade-connect token encoding.
//!
//! A created-trade message embeds an opaque token describing the trade and
//! how to connect for it. The token is a hex-wrapped JSON payload behind a
//! magic prefix; the reply classifier only ever decodes it to check that it
//! is well formed and references a node the bot still controls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const TRADE_MAGIC: &str = "747261646501";
const PUBLIC_KEY_HEX_LENGTH: usize = 66;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TradeConnect {
    /// Trade id hex
    pub id: String,
    /// Network name, e.g. "mainnet"
    pub network: String,
    /// Identity keys of nodes offering the trade
    pub nodes: Vec<String>,
    pub description: String,
    pub tokens: u64,
    pub expires_at: DateTime<Utc>,
}

/// Encode a trade as an opaque token string
pub fn encode_trade(trade: &TradeConnect) -> String {
    // Serializing a plain struct to JSON cannot fail
    let payload = serde_json::to_vec(trade).unwrap_or_default();

    format!("{}{}", TRADE_MAGIC, hex::encode(payload))
}

/// Decode a trade token. Any malformed token is None, never an error, since
/// decoding runs speculatively against arbitrary message lines.
pub fn decode_trade(token: &str) -> Option<TradeConnect> {
    let payload = token.strip_prefix(TRADE_MAGIC)?;

    let bytes = hex::decode(payload).ok()?;

    let trade: TradeConnect = serde_json::from_slice(&bytes).ok()?;

    if trade.id.is_empty() || trade.nodes.is_empty() {
        return None;
    }

    if trade.nodes.iter().any(|n| n.len() != PUBLIC_KEY_HEX_LENGTH) {
        return None;
    }

    Some(trade)
}
