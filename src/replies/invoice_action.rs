use std::str::FromStr;

use lightning_invoice::Bolt11Invoice;

use crate::interface::templates::{
    CREATED_INVOICE_TITLE_PREFIX, EDIT_INVOICE_DESCRIPTION_QUESTION, EDIT_INVOICE_TOKENS_QUESTION,
};
use crate::interface::CallbackCommand;
use crate::nodes::NodeRef;

/// Classify a message as an invoice edit question, if it is one.
///
/// An invoice question message is exactly four lines: the created-invoice
/// title, a payment request, a spacer, and one of the recognized edit
/// questions. The request must decode and its destination must be a node the
/// bot still controls. This runs speculatively against historical messages,
/// so every mismatch is None rather than an error.
pub fn invoice_action_type(text: &str, nodes: &[NodeRef]) -> Option<CallbackCommand> {
    if !text.starts_with(CREATED_INVOICE_TITLE_PREFIX) {
        return None;
    }

    let mut lines = text.split('\n');

    let _title = lines.next()?;
    let request = lines.next()?;
    let spacer = lines.next()?;
    let question = lines.next()?;

    if lines.next().is_some() {
        return None;
    }

    if request.is_empty() || !spacer.is_empty() {
        return None;
    }

    // A decode failure means this isn't an invoice message, not a fault
    let invoice = Bolt11Invoice::from_str(request).ok()?;

    let destination = invoice.recover_payee_pub_key().to_string();

    // Ignore invoices for nodes that are no longer configured
    if !nodes.iter().any(|n| n.public_key == destination) {
        return None;
    }

    match question {
        EDIT_INVOICE_DESCRIPTION_QUESTION => Some(CallbackCommand::SetInvoiceDescription),
        EDIT_INVOICE_TOKENS_QUESTION => Some(CallbackCommand::SetInvoiceTokens),
        _ => None,
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::nodes::tests::node;

    /// BOLT11 spec test vector, destination key below
    pub const REQUEST: &str = "lnbc1pvjluezpp5qqqsyqcyq5rqwzqfqqqsyqcyq5rqwzqfqqqsyqcyq5rqwzqfqypqdpl2pkx2ctnv5sxxmmwwd5kgetjypeh2ursdae8g6twvus8g6rfwvs8qun0dfjkxaq8rkx3yf5tcsyz3d73gafnh3cax9rn449d9p5uxz9ezhhypd0elx87sjle52x86fux2ypatgddc6k63n7erqz25le42c4u4ecky03ylcqca784w";

    pub const DESTINATION: &str =
        "03e7156ae33b0a208d0744199163177e909e80176e55d97a2f221ede0f934dd9ad";

    pub fn question_text(question: &str) -> String {
        format!(
            "{}0.00000000\n{}\n\n{}",
            CREATED_INVOICE_TITLE_PREFIX, REQUEST, question
        )
    }

    #[test]
    fn unrelated_text_is_no_action() {
        let nodes = [node("alpha", DESTINATION)];

        assert_eq!(invoice_action_type("", &nodes), None);
        assert_eq!(invoice_action_type("hello there", &nodes), None);
        assert_eq!(invoice_action_type("/balance", &nodes), None);
    }

    #[test]
    fn recognized_questions_map_to_commands() {
        let nodes = [node("alpha", DESTINATION)];

        assert_eq!(
            invoice_action_type(&question_text(EDIT_INVOICE_DESCRIPTION_QUESTION), &nodes),
            Some(CallbackCommand::SetInvoiceDescription)
        );
        assert_eq!(
            invoice_action_type(&question_text(EDIT_INVOICE_TOKENS_QUESTION), &nodes),
            Some(CallbackCommand::SetInvoiceTokens)
        );
    }

    #[test]
    fn unknown_destination_is_no_action() {
        let nodes = [node("alpha", "020000000000000000000000000000000000000000000000000000000000000001")];

        assert_eq!(
            invoice_action_type(&question_text(EDIT_INVOICE_TOKENS_QUESTION), &nodes),
            None
        );
    }

    #[test]
    fn structural_mismatches_are_no_action() {
        let nodes = [node("alpha", DESTINATION)];

        // Missing question line
        let three_lines = format!("{}0\n{}\n", CREATED_INVOICE_TITLE_PREFIX, REQUEST);
        assert_eq!(invoice_action_type(&three_lines, &nodes), None);

        // Trailing fifth line
        let five_lines = format!(
            "{}\nextra",
            question_text(EDIT_INVOICE_TOKENS_QUESTION)
        );
        assert_eq!(invoice_action_type(&five_lines, &nodes), None);

        // Non-empty spacer
        let bad_spacer = format!(
            "{}0\n{}\nx\n{}",
            CREATED_INVOICE_TITLE_PREFIX, REQUEST, EDIT_INVOICE_TOKENS_QUESTION
        );
        assert_eq!(invoice_action_type(&bad_spacer, &nodes), None);

        // Unrecognized question
        let bad_question = question_text("What color should the invoice be?");
        assert_eq!(invoice_action_type(&bad_question, &nodes), None);
    }

    #[test]
    fn invalid_request_is_no_action_not_an_error() {
        let nodes = [node("alpha", DESTINATION)];

        let bad_request = format!(
            "{}0\nlnbc1notarealrequest\n\n{}",
            CREATED_INVOICE_TITLE_PREFIX, EDIT_INVOICE_TOKENS_QUESTION
        );

        assert_eq!(invoice_action_type(&bad_request, &nodes), None);
    }

    #[test]
    fn composed_question_messages_classify() {
        use crate::messages::invoice::invoice_title_line;

        let nodes = [node("alpha", DESTINATION)];

        // The plain-rendered form of what question_message_text sends
        let text = format!(
            "{}\n{}\n\n{}",
            invoice_title_line(0, ""),
            REQUEST,
            EDIT_INVOICE_DESCRIPTION_QUESTION
        );

        assert_eq!(
            invoice_action_type(&text, &nodes),
            Some(CallbackCommand::SetInvoiceDescription)
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let nodes = [node("alpha", DESTINATION)];
        let text = question_text(EDIT_INVOICE_DESCRIPTION_QUESTION);

        assert_eq!(
            invoice_action_type(&text, &nodes),
            invoice_action_type(&text, &nodes)
        );
    }
}
