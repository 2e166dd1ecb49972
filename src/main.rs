mod access;
mod bot;
mod buttons;
mod commands;
mod config;
mod interface;
mod lnd;
mod messages;
mod nodes;
mod post;
mod replies;
mod trades;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bot::AppState;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lnbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    info!("Configuration loaded successfully");
    info!("  Connected user: {}", config.telegram.connected_user_id);
    info!("  Saved nodes: {}", config.nodes.len());

    // Connect to every saved node before accepting chat events
    let nodes = nodes::connect_nodes(&config.nodes).await?;

    let telegram_bot = Bot::new(&config.telegram.bot_token);
    let connected_chat = ChatId(config.telegram.connected_user_id as i64);

    // Background node watcher posts channel, invoice and status events
    tokio::spawn(post::run_notifier(
        telegram_bot.clone(),
        connected_chat,
        nodes.clone(),
        config.notify.poll_seconds,
    ));

    let state = Arc::new(AppState::new(nodes, config.telegram.connected_user_id));

    info!("Bot is starting...");
    bot::run(telegram_bot, state).await?;

    Ok(())
}
