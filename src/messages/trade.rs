//! Created-trade message composition, mirroring the invoice message shape
//! with a trade token in place of a payment request.

use teloxide::types::InlineKeyboardMarkup;
use teloxide::utils::markdown::{code_inline, escape, italic};

use super::{callback_button, ComposedMessage};
use crate::interface::templates::CREATED_TRADE_TITLE_PREFIX;
use crate::interface::{format_tokens, CallbackCommand};
use crate::nodes::NodeRef;
use crate::trades::{encode_trade, TradeConnect};

/// Plain-text first line of a created trade message
pub fn trade_title_line(trade: &TradeConnect) -> String {
    let memo = if trade.description.is_empty() {
        String::new()
    } else {
        format!(" “{}”", trade.description)
    };

    format!(
        "{}{}{} expires {}",
        CREATED_TRADE_TITLE_PREFIX,
        format_tokens(trade.tokens),
        memo,
        trade.expires_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

fn edit_keyboard(is_multi_node: bool) -> InlineKeyboardMarkup {
    let top = vec![
        callback_button("Description", CallbackCommand::SetTradeDescription),
        callback_button("Expiry", CallbackCommand::SetTradeExpiresAt),
    ];

    let mut bottom = Vec::new();

    if is_multi_node {
        bottom.push(callback_button("Node", CallbackCommand::SetTradeNode));
    }

    bottom.push(callback_button("Cancel", CallbackCommand::CancelTrade));

    InlineKeyboardMarkup::new(vec![top, bottom])
}

/// Compose the created trade message with its edit buttons
pub fn create_trade_message(from: &str, trade: &TradeConnect, is_multi_node: bool) -> ComposedMessage {
    let mut lines = vec![
        escape(&trade_title_line(trade)),
        code_inline(&encode_trade(trade)),
    ];

    if is_multi_node {
        lines.push(italic(&escape(from)));
    }

    ComposedMessage {
        text: lines.join("\n"),
        markup: Some(edit_keyboard(is_multi_node)),
    }
}

/// Keyboard listing saved nodes a trade can be moved to
pub fn move_node_keyboard(nodes: &[NodeRef]) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![
        callback_button("Description", CallbackCommand::SetTradeDescription),
        callback_button("Expiry", CallbackCommand::SetTradeExpiresAt),
        callback_button("Cancel", CallbackCommand::CancelTrade),
    ]];

    for node in nodes {
        rows.push(vec![callback_button(
            &format!("Node: {}", node.from),
            CallbackCommand::MoveTradeNode(node.short_key().to_string()),
        )]);
    }

    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn trade() -> TradeConnect {
        TradeConnect {
            id: "0011".to_string(),
            network: "mainnet".to_string(),
            nodes: vec![
                "03e7156ae33b0a208d0744199163177e909e80176e55d97a2f221ede0f934dd9ad".to_string(),
            ],
            description: "channel lease".to_string(),
            tokens: 250000,
            expires_at: Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn title_line_names_price_memo_and_expiry() {
        let line = trade_title_line(&trade());

        assert!(line.starts_with(CREATED_TRADE_TITLE_PREFIX));
        assert!(line.contains("“channel lease”"));
        assert!(line.contains("expires 2030-06-01 12:00 UTC"));
    }

    #[test]
    fn message_embeds_a_decodable_token() {
        let composed = create_trade_message("alpha", &trade(), false);

        // Second line is the token wrapped in inline code markers
        let token = composed.text.lines().nth(1).unwrap().trim_matches('`');

        assert_eq!(crate::trades::decode_trade(token), Some(trade()));
    }
}
