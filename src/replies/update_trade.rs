use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use teloxide::prelude::*;

use crate::interface::CallbackCommand;
use crate::messages::FailureKind;
use crate::nodes::{find_node, NodeRef};
use crate::post::{post_created_trade, post_failure};
use crate::trades::decode_trade;

/// Apply a typed reply to a created trade.
///
/// The trade token on the second line of the replied-to message carries the
/// full trade details, so editing is decode, update one field, re-post.
pub async fn update_trade_from_reply(
    bot: &Bot,
    msg: &Message,
    nodes: &[NodeRef],
    action: CallbackCommand,
) -> Result<()> {
    let replied_to = msg
        .reply_to_message()
        .context("Expected a replied-to message to update a trade")?;

    let text = replied_to.text().unwrap_or_default();

    let token = text
        .split('\n')
        .nth(1)
        .context("Expected a trade token line on the trade message")?;

    let mut trade = decode_trade(token).context("Expected a valid trade token to update")?;

    let node = match trade.nodes.iter().find_map(|key| find_node(nodes, key)) {
        Some(node) => node,
        None => {
            post_failure(bot, msg.chat.id, FailureKind::Generic).await?;

            return Ok(());
        }
    };

    let answer = msg.text().unwrap_or_default().trim().to_string();

    bot.delete_message(msg.chat.id, msg.id).await.ok();
    bot.delete_message(replied_to.chat.id, replied_to.id).await.ok();

    match action {
        CallbackCommand::SetTradeDescription => trade.description = answer,
        CallbackCommand::SetTradeExpiresAt => match parse_expiry(&answer) {
            Some(expires_at) => trade.expires_at = expires_at,
            None => {
                // Keep the previous expiry when the answer doesn't parse
                post_failure(bot, msg.chat.id, FailureKind::InvalidExpiry).await?;
            }
        },
        _ => return Ok(()),
    }

    post_created_trade(bot, msg.chat.id, nodes, node, &trade).await
}

/// Parse an expiry answer: a day count, an RFC 3339 timestamp, or a date
fn parse_expiry(answer: &str) -> Option<DateTime<Utc>> {
    let trimmed = answer.trim();

    if let Ok(days) = trimmed.parse::<u16>() {
        if days == 0 {
            return None;
        }

        return Some(Utc::now() + Duration::days(i64::from(days)));
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(at.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|at| Utc.from_utc_datetime(&at));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_counts_extend_from_now() {
        let parsed = parse_expiry("7").unwrap();

        assert!(parsed > Utc::now() + Duration::days(6));
        assert!(parsed < Utc::now() + Duration::days(8));
    }

    #[test]
    fn dates_and_timestamps_parse() {
        let date = parse_expiry("2030-06-01").unwrap();

        assert_eq!(date, Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap());

        let at = parse_expiry("2030-06-01T12:30:00Z").unwrap();

        assert_eq!(at, Utc.with_ymd_and_hms(2030, 6, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn unparseable_expiries_are_none() {
        assert_eq!(parse_expiry(""), None);
        assert_eq!(parse_expiry("0"), None);
        assert_eq!(parse_expiry("whenever"), None);
    }
}
