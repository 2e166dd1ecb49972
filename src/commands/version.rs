use anyhow::{Context, Result};
use serde::Deserialize;
use teloxide::prelude::*;
use teloxide::types::ChatId;

const REGISTRY_URL: &str = "https://crates.io/api/v1/crates/lnbot";

const RUNNING_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Deserialize)]
struct RegistryResponse {
    #[serde(rename = "crate")]
    krate: RegistryCrate,
}

#[derive(Deserialize)]
struct RegistryCrate {
    max_version: String,
}

/// Report the running version and the latest published one
pub async fn handle_version_command(bot: &Bot, chat: ChatId) -> Result<()> {
    bot.send_message(chat, format!("🤖 Running version: {RUNNING_VERSION}"))
        .await?;

    let client = reqwest::Client::new();

    let latest = client
        .get(REGISTRY_URL)
        .header(reqwest::header::USER_AGENT, "lnbot")
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .context("Failed to get latest version from the registry");

    let latest = match latest {
        Ok(res) => res
            .json::<RegistryResponse>()
            .await
            .context("Unexpected registry response")?,
        Err(_) => {
            bot.send_message(chat, "🤖 Failed to get latest version information")
                .await?;

            return Ok(());
        }
    };

    bot.send_message(chat, format!("🤖 Latest version: {}", latest.krate.max_version))
        .await?;

    Ok(())
}
