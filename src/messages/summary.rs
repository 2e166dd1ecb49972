//! Report composers for the query commands. All pure: node data in,
//! MarkdownV2 text out.

use teloxide::utils::markdown::{bold, escape, italic};

use crate::interface::amounts::{format_tokens, format_tokens_or};
use crate::lnd::{NodeFunds, NodeInfo, PendingChannel, PendingChannelKind};

/// Truncate a key for display. Slices on a char boundary since the peer
/// argument of /liquidity arrives here unvalidated.
fn short_key(public_key: &str) -> &str {
    match public_key.char_indices().nth(8) {
        Some((i, _)) => &public_key[..i],
        None => public_key,
    }
}

/// Summarize funds across all nodes
pub fn funds_summary(entries: &[(String, NodeFunds)]) -> String {
    let total: u64 = entries.iter().map(|(_, funds)| funds.total()).sum();
    let is_multi = entries.len() > 1;

    let mut lines = vec![bold(&escape("Funds:")), String::new()];

    for (from, funds) in entries {
        lines.push(format!(
            "{}: {}",
            italic(&escape(from)),
            escape(&format_tokens(funds.total()))
        ));

        if funds.chain_confirmed + funds.chain_pending > 0 {
            lines.push(escape(&format!(
                "  chain: {}",
                format_tokens(funds.chain_confirmed + funds.chain_pending)
            )));
        }

        if funds.channel_balance + funds.channel_pending > 0 {
            lines.push(escape(&format!(
                "  channels: {}",
                format_tokens(funds.channel_balance + funds.channel_pending)
            )));
        }
    }

    if is_multi {
        lines.push(String::new());
        lines.push(format!(
            "{} {}",
            bold(&escape("Total:")),
            escape(&format_tokens(total))
        ));
    }

    lines.join("\n")
}

/// Summarize inbound and outbound liquidity, optionally with one peer
pub fn liquidity_summary(entries: &[(String, u64, u64)], peer: Option<&str>) -> String {
    let header = match peer {
        Some(key) => bold(&escape(&format!("Liquidity with {}:", short_key(key)))),
        None => bold(&escape("Liquidity:")),
    };

    let mut lines = vec![header, String::new()];

    for (from, inbound, outbound) in entries {
        if *inbound == 0 && *outbound == 0 {
            continue;
        }

        lines.push(format!(
            "{}: {} in / {} out",
            italic(&escape(from)),
            escape(&format_tokens_or(*inbound, "-")),
            escape(&format_tokens_or(*outbound, "-"))
        ));
    }

    if lines.len() == 2 {
        lines.push(escape("No liquidity"));
    }

    lines.join("\n")
}

fn pending_kind_label(kind: PendingChannelKind) -> &'static str {
    match kind {
        PendingChannelKind::Opening => "opening",
        PendingChannelKind::Closing => "closing",
        PendingChannelKind::ForceClosing => "force closing",
    }
}

/// Summarize pending channels and in-flight HTLCs
pub fn pending_summary(entries: &[(String, Vec<PendingChannel>, u64)]) -> String {
    let mut lines = vec![bold(&escape("Pending:")), String::new()];
    let mut is_quiet = true;

    for (from, channels, htlcs) in entries {
        if channels.is_empty() && *htlcs == 0 {
            continue;
        }

        is_quiet = false;
        lines.push(format!("{}:", italic(&escape(from))));

        for channel in channels {
            lines.push(escape(&format!(
                "  {} {} with {}",
                pending_kind_label(channel.kind),
                format_tokens(channel.capacity),
                short_key(&channel.peer_public_key)
            )));
        }

        if *htlcs > 0 {
            lines.push(escape(&format!("  {htlcs} HTLCs in flight")));
        }
    }

    if is_quiet {
        lines.push(escape("Nothing pending"));
    }

    lines.join("\n")
}

/// Summarize a week of chain fees and payment fees
pub fn costs_summary(entries: &[(String, u64, u64)]) -> String {
    let mut lines = vec![bold(&escape("Costs in the past week:")), String::new()];

    for (from, chain_fees, payment_fees) in entries {
        lines.push(format!(
            "{}: {} chain fees, {} payment fees",
            italic(&escape(from)),
            escape(&format_tokens_or(*chain_fees, "no")),
            escape(&format_tokens_or(*payment_fees, "no"))
        ));
    }

    lines.join("\n")
}

/// Summarize a week of forwarding earnings
pub fn earnings_summary(entries: &[(String, u64, u64, u64)]) -> String {
    let mut lines = vec![bold(&escape("Earnings in the past week:")), String::new()];

    for (from, count, volume, fees) in entries {
        lines.push(format!(
            "{}: {} forwards routed {}, earned {}",
            italic(&escape(from)),
            escape(&count.to_string()),
            escape(&format_tokens_or(*volume, "nothing")),
            escape(&format_tokens_or(*fees, "nothing"))
        ));
    }

    lines.join("\n")
}

/// Summarize node identity and status
pub fn info_summary(entries: &[(String, NodeInfo)]) -> String {
    let mut lines = Vec::new();

    for (from, node_info) in entries {
        let sync = if node_info.is_synced { "synced" } else { "not synced" };

        lines.push(format!(
            "{} {}",
            bold(&escape(from)),
            escape(&format!("({})", node_info.alias))
        ));
        lines.push(escape(&format!("  {}", node_info.public_key)));
        lines.push(escape(&format!(
            "  version {}, height {}, {}",
            node_info.version, node_info.block_height, sync
        )));
        lines.push(escape(&format!(
            "  {} active channels, {} peers",
            node_info.active_channels, node_info.peers
        )));

        for uri in &node_info.uris {
            lines.push(escape(&format!("  {uri}")));
        }

        lines.push(String::new());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funds(total: u64) -> NodeFunds {
        NodeFunds {
            chain_confirmed: total,
            ..Default::default()
        }
    }

    #[test]
    fn single_node_funds_report_has_no_total_row() {
        let report = funds_summary(&[("alpha".to_string(), funds(100000000))]);

        // MarkdownV2 output escapes the decimal point
        assert!(report.contains(r"1\.00000000"));
        assert!(!report.contains("Total"));
    }

    #[test]
    fn multi_node_funds_report_sums_nodes() {
        let report = funds_summary(&[
            ("alpha".to_string(), funds(100000000)),
            ("beta".to_string(), funds(50000000)),
        ]);

        assert!(report.contains("Total"));
        assert!(report.contains(r"1\.50000000"));
    }

    #[test]
    fn liquidity_report_skips_empty_nodes() {
        let report = liquidity_summary(
            &[
                ("alpha".to_string(), 1000, 2000),
                ("beta".to_string(), 0, 0),
            ],
            None,
        );

        assert!(report.contains("alpha"));
        assert!(!report.contains("beta"));
    }

    #[test]
    fn peer_liquidity_report_names_the_peer() {
        let report = liquidity_summary(&[("alpha".to_string(), 0, 5000)], Some("03e7156ae33b"));

        assert!(report.contains("03e7156a"));
    }

    #[test]
    fn multibyte_peer_arguments_do_not_split_chars() {
        let report = liquidity_summary(&[("alpha".to_string(), 1, 1)], Some("⚡⚡⚡"));

        assert!(report.contains("⚡⚡⚡"));

        // Longer than eight chars still truncates per char, not per byte
        let report = liquidity_summary(&[("alpha".to_string(), 1, 1)], Some("⚡⚡⚡⚡⚡⚡⚡⚡⚡"));

        assert!(report.contains("⚡⚡⚡⚡⚡⚡⚡⚡"));
        assert!(!report.contains("⚡⚡⚡⚡⚡⚡⚡⚡⚡"));
    }

    #[test]
    fn quiet_pending_report_says_so() {
        let report = pending_summary(&[("alpha".to_string(), Vec::new(), 0)]);

        assert!(report.contains("Nothing pending"));
    }

    #[test]
    fn pending_report_labels_channel_kinds() {
        let channels = vec![PendingChannel {
            peer_public_key: "03aabbccddeeff00".to_string(),
            capacity: 1000000,
            kind: PendingChannelKind::ForceClosing,
        }];

        let report = pending_summary(&[("alpha".to_string(), channels, 2)]);

        assert!(report.contains("force closing"));
        assert!(report.contains("03aabbcc"));
        assert!(report.contains("2 HTLCs in flight"));
    }
}
