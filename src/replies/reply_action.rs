use teloxide::types::Message;

use super::{invoice_action_type, trade_action_type};
use crate::interface::CallbackCommand;
use crate::nodes::NodeRef;

/// Determine the type of a reply action, if any.
///
/// Invoice messages are checked before trade messages; a text that somehow
/// matched both shapes resolves as an invoice.
pub fn reply_action_type(text: &str, nodes: &[NodeRef]) -> Option<CallbackCommand> {
    if let Some(action) = invoice_action_type(text, nodes) {
        return Some(action);
    }

    trade_action_type(text, nodes)
}

/// Does this new message require reply-action handling at all?
///
/// True only for a reply to a prior message whose non-empty text classifies
/// as an edit question. Callers only invoke this for new messages; edited
/// messages never reach the reply-update flow.
pub fn is_message_reply_action(msg: &Message, nodes: &[NodeRef]) -> bool {
    let replied_to = match msg.reply_to_message() {
        Some(replied_to) => replied_to,
        None => return false,
    };

    match replied_to.text() {
        Some(text) => reply_action_type(text, nodes).is_some(),
        None => false,
    }
}
