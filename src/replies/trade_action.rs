use crate::interface::templates::{
    CREATED_TRADE_TITLE_PREFIX, EDIT_TRADE_DESCRIPTION_QUESTION, EDIT_TRADE_EXPIRES_AT_QUESTION,
};
use crate::interface::CallbackCommand;
use crate::nodes::NodeRef;
use crate::trades::decode_trade;

/// Classify a message as a trade edit question, if it is one.
///
/// Structurally parallel to `invoice_action_type` with a trade token in
/// place of the payment request: title, token, spacer, question, and the
/// token must reference a node the bot controls.
pub fn trade_action_type(text: &str, nodes: &[NodeRef]) -> Option<CallbackCommand> {
    if !text.starts_with(CREATED_TRADE_TITLE_PREFIX) {
        return None;
    }

    let mut lines = text.split('\n');

    let _title = lines.next()?;
    let token = lines.next()?;
    let spacer = lines.next()?;
    let question = lines.next()?;

    if lines.next().is_some() {
        return None;
    }

    if token.is_empty() || !spacer.is_empty() {
        return None;
    }

    let trade = decode_trade(token)?;

    if !trade
        .nodes
        .iter()
        .any(|key| nodes.iter().any(|n| &n.public_key == key))
    {
        return None;
    }

    match question {
        EDIT_TRADE_DESCRIPTION_QUESTION => Some(CallbackCommand::SetTradeDescription),
        EDIT_TRADE_EXPIRES_AT_QUESTION => Some(CallbackCommand::SetTradeExpiresAt),
        _ => None,
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::nodes::tests::node;
    use crate::trades::{encode_trade, TradeConnect};
    use chrono::{TimeZone, Utc};

    pub const DESTINATION: &str =
        "03e7156ae33b0a208d0744199163177e909e80176e55d97a2f221ede0f934dd9ad";

    pub fn trade() -> TradeConnect {
        TradeConnect {
            id: "00112233".to_string(),
            network: "mainnet".to_string(),
            nodes: vec![DESTINATION.to_string()],
            description: "lease".to_string(),
            tokens: 1000,
            expires_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    pub fn question_text(question: &str) -> String {
        format!(
            "{}0.00001000\n{}\n\n{}",
            CREATED_TRADE_TITLE_PREFIX,
            encode_trade(&trade()),
            question
        )
    }

    #[test]
    fn recognized_questions_map_to_commands() {
        let nodes = [node("alpha", DESTINATION)];

        assert_eq!(
            trade_action_type(&question_text(EDIT_TRADE_DESCRIPTION_QUESTION), &nodes),
            Some(CallbackCommand::SetTradeDescription)
        );
        assert_eq!(
            trade_action_type(&question_text(EDIT_TRADE_EXPIRES_AT_QUESTION), &nodes),
            Some(CallbackCommand::SetTradeExpiresAt)
        );
    }

    #[test]
    fn unknown_trade_node_is_no_action() {
        let nodes = [node("alpha", "020000000000000000000000000000000000000000000000000000000000000001")];

        assert_eq!(
            trade_action_type(&question_text(EDIT_TRADE_DESCRIPTION_QUESTION), &nodes),
            None
        );
    }

    #[test]
    fn composed_question_messages_classify() {
        use crate::messages::trade::trade_title_line;

        let nodes = [node("alpha", DESTINATION)];

        let text = format!(
            "{}\n{}\n\n{}",
            trade_title_line(&trade()),
            encode_trade(&trade()),
            EDIT_TRADE_EXPIRES_AT_QUESTION
        );

        assert_eq!(
            trade_action_type(&text, &nodes),
            Some(CallbackCommand::SetTradeExpiresAt)
        );
    }

    #[test]
    fn malformed_token_is_no_action() {
        let nodes = [node("alpha", DESTINATION)];

        let text = format!(
            "{}0\nnot-a-token\n\n{}",
            CREATED_TRADE_TITLE_PREFIX, EDIT_TRADE_DESCRIPTION_QUESTION
        );

        assert_eq!(trade_action_type(&text, &nodes), None);
    }
}
