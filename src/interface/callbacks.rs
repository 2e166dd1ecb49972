//! Callback button payloads.
//!
//! Every inline button the bot attaches to a message carries one of these
//! payloads. The two move-to-node families embed a truncated node key after
//! the prefix, all other payloads match exactly.

/// Payload prefix for moving an invoice to another saved node
pub const MOVE_INVOICE_NODE_PREFIX: &str = "move-invoice-node:";

/// Payload prefix for moving a trade to another saved node
pub const MOVE_TRADE_NODE_PREFIX: &str = "move-trade-node:";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackCommand {
    CancelInvoice,
    CancelTrade,
    /// Move an invoice to the node whose key starts with the suffix
    MoveInvoiceNode(String),
    /// Move a trade to the node whose key starts with the suffix
    MoveTradeNode(String),
    RemoveMessage,
    SetInvoiceDescription,
    SetInvoiceNode,
    SetInvoiceTokens,
    SetTradeDescription,
    SetTradeExpiresAt,
    SetTradeNode,
    TerminateBot,
}

impl CallbackCommand {
    /// Decode a callback payload. Prefix families are checked before the
    /// exact-match table; unknown payloads are None, never an error.
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(suffix) = data.strip_prefix(MOVE_INVOICE_NODE_PREFIX) {
            return Some(Self::MoveInvoiceNode(suffix.to_string()));
        }

        if let Some(suffix) = data.strip_prefix(MOVE_TRADE_NODE_PREFIX) {
            return Some(Self::MoveTradeNode(suffix.to_string()));
        }

        match data {
            "cancel-invoice" => Some(Self::CancelInvoice),
            "cancel-trade" => Some(Self::CancelTrade),
            "remove-message" => Some(Self::RemoveMessage),
            "set-invoice-description" => Some(Self::SetInvoiceDescription),
            "set-invoice-node" => Some(Self::SetInvoiceNode),
            "set-invoice-tokens" => Some(Self::SetInvoiceTokens),
            "set-trade-description" => Some(Self::SetTradeDescription),
            "set-trade-expires-at" => Some(Self::SetTradeExpiresAt),
            "set-trade-node" => Some(Self::SetTradeNode),
            "terminate-bot" => Some(Self::TerminateBot),
            _ => None,
        }
    }

    /// Encode as callback payload data for keyboard construction
    pub fn to_data(&self) -> String {
        match self {
            Self::CancelInvoice => "cancel-invoice".to_string(),
            Self::CancelTrade => "cancel-trade".to_string(),
            Self::MoveInvoiceNode(suffix) => format!("{MOVE_INVOICE_NODE_PREFIX}{suffix}"),
            Self::MoveTradeNode(suffix) => format!("{MOVE_TRADE_NODE_PREFIX}{suffix}"),
            Self::RemoveMessage => "remove-message".to_string(),
            Self::SetInvoiceDescription => "set-invoice-description".to_string(),
            Self::SetInvoiceNode => "set-invoice-node".to_string(),
            Self::SetInvoiceTokens => "set-invoice-tokens".to_string(),
            Self::SetTradeDescription => "set-trade-description".to_string(),
            Self::SetTradeExpiresAt => "set-trade-expires-at".to_string(),
            Self::SetTradeNode => "set-trade-node".to_string(),
            Self::TerminateBot => "terminate-bot".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_payloads_round_trip() {
        let commands = [
            CallbackCommand::CancelInvoice,
            CallbackCommand::CancelTrade,
            CallbackCommand::RemoveMessage,
            CallbackCommand::SetInvoiceDescription,
            CallbackCommand::SetInvoiceNode,
            CallbackCommand::SetInvoiceTokens,
            CallbackCommand::SetTradeDescription,
            CallbackCommand::SetTradeExpiresAt,
            CallbackCommand::SetTradeNode,
            CallbackCommand::TerminateBot,
        ];

        for command in commands {
            assert_eq!(CallbackCommand::parse(&command.to_data()), Some(command));
        }
    }

    #[test]
    fn move_payloads_carry_their_suffix() {
        let parsed = CallbackCommand::parse("move-invoice-node:03abcdef");

        assert_eq!(
            parsed,
            Some(CallbackCommand::MoveInvoiceNode("03abcdef".to_string()))
        );

        let parsed = CallbackCommand::parse("move-trade-node:02aa");

        assert_eq!(parsed, Some(CallbackCommand::MoveTradeNode("02aa".to_string())));
    }

    #[test]
    fn unknown_payloads_are_none() {
        assert_eq!(CallbackCommand::parse("totally-unknown"), None);
        assert_eq!(CallbackCommand::parse(""), None);
    }

    #[test]
    fn move_data_stays_within_telegram_limit() {
        let suffix = "0".repeat(crate::nodes::SHORT_KEY_LENGTH);
        let data = CallbackCommand::MoveInvoiceNode(suffix).to_data();

        // Telegram rejects callback data over 64 bytes
        assert!(data.len() <= 64);
    }
}
