//! Slash command parsing and handling.

pub mod decode;

mod backup;
mod balance;
mod blocknotify;
mod connect;
mod costs;
mod earnings;
mod info;
mod invoice;
mod liquidity;
mod mempool;
mod pending;
mod stop;
mod trade;
mod version;

pub use decode::{decode_command, CommandError, CommandHelp, DecodedCommand};

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::ChatAction;

use crate::bot::AppState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Backup,
    Balance,
    Blocknotify,
    Connect,
    Costs,
    Earnings,
    Info,
    Invoice,
    Liquidity,
    Mempool,
    Pending,
    Start,
    Stop,
    Trade,
    Version,
}

impl Command {
    /// Parse the leading /command token, tolerating an @botname suffix
    pub fn parse(text: &str) -> Option<Self> {
        let token = text.split_whitespace().next()?;
        let name = token.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);

        match name {
            "backup" => Some(Self::Backup),
            "balance" => Some(Self::Balance),
            "blocknotify" => Some(Self::Blocknotify),
            "connect" => Some(Self::Connect),
            "costs" => Some(Self::Costs),
            "earnings" => Some(Self::Earnings),
            "info" => Some(Self::Info),
            "invoice" => Some(Self::Invoice),
            "liquidity" => Some(Self::Liquidity),
            "mempool" => Some(Self::Mempool),
            "pending" => Some(Self::Pending),
            "start" | "help" => Some(Self::Start),
            "stop" => Some(Self::Stop),
            "trade" => Some(Self::Trade),
            "version" => Some(Self::Version),
            _ => None,
        }
    }
}

const START_TEXT: &str = "🤖 Hi! I watch over your Lightning nodes.\n\n\
    /backup - Send channel backup files\n\
    /balance - Funds on all nodes\n\
    /blocknotify - Notify on the next block\n\
    /connect - Show the connect code\n\
    /costs - Chain and payment fees this week\n\
    /earnings - Forwarding fees this week\n\
    /info - Node details\n\
    /invoice [amount] [memo] - Create an invoice\n\
    /liquidity [peer] - Inbound and outbound liquidity\n\
    /mempool - Chain fee estimates\n\
    /pending - Pending channels and HTLCs\n\
    /trade <amount> [memo] - Offer a trade\n\
    /version - Check for updates\n\
    /stop - Stop the bot";

/// Route a parsed command to its handler
pub async fn dispatch(
    bot: &Bot,
    msg: &Message,
    state: &AppState,
    command: Command,
    text: &str,
) -> Result<()> {
    // Let the user see that a slow lookup is underway
    bot.send_chat_action(msg.chat.id, ChatAction::Typing).await.ok();

    match command {
        Command::Backup => backup::handle_backup_command(bot, msg.chat.id, &state.nodes).await,
        Command::Balance => balance::handle_balance_command(bot, msg.chat.id, &state.nodes).await,
        Command::Blocknotify => {
            blocknotify::handle_blocknotify_command(bot, msg.chat.id, &state.nodes).await
        }
        Command::Connect => connect::handle_connect_command(bot, msg).await,
        Command::Costs => costs::handle_costs_command(bot, msg.chat.id, &state.nodes).await,
        Command::Earnings => {
            earnings::handle_earnings_command(bot, msg.chat.id, &state.nodes).await
        }
        Command::Info => info::handle_info_command(bot, msg.chat.id, &state.nodes).await,
        Command::Invoice => {
            invoice::handle_invoice_command(bot, msg, &state.nodes, text).await
        }
        Command::Liquidity => {
            liquidity::handle_liquidity_command(bot, msg.chat.id, &state.nodes, text).await
        }
        Command::Mempool => mempool::handle_mempool_command(bot, msg.chat.id).await,
        Command::Pending => pending::handle_pending_command(bot, msg.chat.id, &state.nodes).await,
        Command::Start => {
            bot.send_message(msg.chat.id, START_TEXT).await?;

            Ok(())
        }
        Command::Stop => stop::handle_stop_command(bot, msg.chat.id).await,
        Command::Trade => trade::handle_trade_command(bot, msg, &state.nodes, text).await,
        Command::Version => version::handle_version_command(bot, msg.chat.id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tokens_parse() {
        assert_eq!(Command::parse("/backup"), Some(Command::Backup));
        assert_eq!(Command::parse("/balance"), Some(Command::Balance));
        assert_eq!(Command::parse("/blocknotify"), Some(Command::Blocknotify));
        assert_eq!(Command::parse("/invoice 21000 memo"), Some(Command::Invoice));
        assert_eq!(Command::parse("/help"), Some(Command::Start));
        assert_eq!(Command::parse("/balance@lnbot"), Some(Command::Balance));
    }

    #[test]
    fn non_commands_do_not_parse() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("balance"), None);
        assert_eq!(Command::parse("/unknowncommand"), None);
    }
}
