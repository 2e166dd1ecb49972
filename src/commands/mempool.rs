use anyhow::{Context, Result};
use serde::Deserialize;
use teloxide::prelude::*;
use teloxide::types::ChatId;

const FEES_URL: &str = "https://mempool.space/api/v1/fees/recommended";

#[derive(Deserialize)]
struct RecommendedFees {
    #[serde(rename = "fastestFee")]
    fastest: u64,
    #[serde(rename = "halfHourFee")]
    half_hour: u64,
    #[serde(rename = "hourFee")]
    hour: u64,
    #[serde(rename = "minimumFee", default)]
    minimum: u64,
}

/// See current chain fee estimates from mempool.space
pub async fn handle_mempool_command(bot: &Bot, chat: ChatId) -> Result<()> {
    let fees: RecommendedFees = reqwest::get(FEES_URL)
        .await
        .context("Failed to reach mempool.space")?
        .error_for_status()
        .context("mempool.space returned an error")?
        .json()
        .await
        .context("Unexpected fee estimate response")?;

    let text = format!(
        "⛓ Chain fees (sat/vB):\nfastest: {}\n30 min: {}\n1 hour: {}\nminimum: {}",
        fees.fastest, fees.half_hour, fees.hour, fees.minimum
    );

    bot.send_message(chat, text).await?;

    Ok(())
}
