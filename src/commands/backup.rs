use anyhow::Result;
use base64::{engine::general_purpose, Engine};
use chrono::Utc;
use futures::future::try_join_all;
use teloxide::payloads::SendDocumentSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile};

use crate::nodes::NodeRef;

/// File name identifying a channel backup snapshot
fn backup_file_name(from: &str, public_key: &str) -> String {
    format!(
        "{}-{}-{}.backup",
        Utc::now().format("%Y-%m-%d"),
        from,
        public_key
    )
}

/// Send every node's channel backup into the chat as a document
pub async fn handle_backup_command(bot: &Bot, chat: ChatId, nodes: &[NodeRef]) -> Result<()> {
    let gathered = try_join_all(nodes.iter().map(|node| async move {
        let backup = node.rpc.get_backup().await?;
        let channels = node.rpc.get_channels().await?;

        Ok::<_, anyhow::Error>((node, backup, channels.len()))
    }))
    .await?;

    for (node, backup, channels) in gathered {
        // LND's REST proxy base64-encodes bytes fields
        let bytes = general_purpose::STANDARD
            .decode(backup.as_bytes())
            .unwrap_or_else(|_| backup.clone().into_bytes());

        let document = InputFile::memory(bytes)
            .file_name(backup_file_name(&node.from, &node.public_key));

        bot.send_document(chat, document)
            .caption(format!(
                "Backup for {} channels on {} {}",
                channels, node.from, node.public_key
            ))
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_file_names_identify_the_node() {
        let name = backup_file_name("alpha", "03aabb");

        assert!(name.ends_with("-alpha-03aabb.backup"));
        assert!(name.starts_with(&Utc::now().format("%Y-%m-%d").to_string()));
    }
}
