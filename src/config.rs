use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(rename = "node")]
    pub nodes: Vec<NodeConfig>,
    #[serde(default = "default_notify_config")]
    pub notify: NotifyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// The single user id allowed to operate the bot.
    pub connected_user_id: u64,
}

/// A saved node the bot can operate, reached over the LND REST API.
#[derive(Debug, Deserialize, Clone)]
pub struct NodeConfig {
    /// User-facing label for the node
    pub from: String,
    /// Base URL of the REST proxy, e.g. "https://127.0.0.1:8080"
    pub rest_host: String,
    /// Admin macaroon as hex
    pub macaroon: String,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotifyConfig {
    #[serde(default = "default_poll_seconds")]
    pub poll_seconds: u64,
}

fn default_poll_seconds() -> u64 {
    30
}

fn default_notify_config() -> NotifyConfig {
    NotifyConfig {
        poll_seconds: default_poll_seconds(),
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if config.nodes.is_empty() {
            anyhow::bail!("Expected at least one [[node]] entry in config");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config: Config = toml::from_str(
            r#"
            [telegram]
            bot_token = "123:abc"
            connected_user_id = 42

            [[node]]
            from = "alpha"
            rest_host = "https://127.0.0.1:8080"
            macaroon = "0201"
            "#,
        )
        .unwrap();

        assert_eq!(config.telegram.connected_user_id, 42);
        assert_eq!(config.nodes.len(), 1);
        assert_eq!(config.nodes[0].from, "alpha");
        assert!(!config.nodes[0].accept_invalid_certs);
        assert_eq!(config.notify.poll_seconds, 30);
    }

    #[test]
    fn multi_node_config_keeps_order() {
        let config: Config = toml::from_str(
            r#"
            [telegram]
            bot_token = "123:abc"
            connected_user_id = 42

            [notify]
            poll_seconds = 5

            [[node]]
            from = "alpha"
            rest_host = "https://127.0.0.1:8080"
            macaroon = "0201"

            [[node]]
            from = "beta"
            rest_host = "https://127.0.0.1:8180"
            macaroon = "0202"
            accept_invalid_certs = true
            "#,
        )
        .unwrap();

        assert_eq!(config.notify.poll_seconds, 5);
        let names: Vec<&str> = config.nodes.iter().map(|n| n.from.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert!(config.nodes[1].accept_invalid_certs);
    }
}
