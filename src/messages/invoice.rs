//! Created-invoice message composition.
//!
//! The reply classifier parses these messages back out of the chat, so the
//! line structure here and in [`question_message_text`] is load bearing: see
//! `interface::templates`.

use teloxide::types::InlineKeyboardMarkup;
use teloxide::utils::markdown::{code_inline, escape, italic};

use super::{callback_button, ComposedMessage};
use crate::interface::templates::CREATED_INVOICE_TITLE_PREFIX;
use crate::interface::{format_tokens, CallbackCommand};
use crate::nodes::NodeRef;

/// Plain-text first line of a created invoice message
pub fn invoice_title_line(tokens: u64, description: &str) -> String {
    let memo = if description.is_empty() {
        String::new()
    } else {
        format!(" “{description}”")
    };

    format!("{}{}{}", CREATED_INVOICE_TITLE_PREFIX, format_tokens(tokens), memo)
}

fn edit_keyboard(is_multi_node: bool) -> InlineKeyboardMarkup {
    let top = vec![
        callback_button("Description", CallbackCommand::SetInvoiceDescription),
        callback_button("Amount", CallbackCommand::SetInvoiceTokens),
    ];

    let mut bottom = Vec::new();

    if is_multi_node {
        bottom.push(callback_button("Node", CallbackCommand::SetInvoiceNode));
    }

    bottom.push(callback_button("Cancel", CallbackCommand::CancelInvoice));

    InlineKeyboardMarkup::new(vec![top, bottom])
}

/// Compose the created invoice message with its edit buttons
pub fn create_invoice_message(
    from: &str,
    request: &str,
    tokens: u64,
    description: &str,
    is_multi_node: bool,
) -> ComposedMessage {
    let mut lines = vec![
        escape(&invoice_title_line(tokens, description)),
        code_inline(request),
    ];

    if is_multi_node {
        lines.push(italic(&escape(from)));
    }

    ComposedMessage {
        text: lines.join("\n"),
        markup: Some(edit_keyboard(is_multi_node)),
    }
}

/// Compose the four-line edit question message the classifier recognizes:
/// title, request, spacer, question.
pub fn question_message_text(title_line: &str, request: &str, question: &str) -> String {
    [
        escape(title_line),
        code_inline(request),
        String::new(),
        italic(&escape(question)),
    ]
    .join("\n")
}

/// Keyboard listing saved nodes an invoice can be moved to
pub fn move_node_keyboard(nodes: &[NodeRef]) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![
        callback_button("Description", CallbackCommand::SetInvoiceDescription),
        callback_button("Amount", CallbackCommand::SetInvoiceTokens),
        callback_button("Cancel", CallbackCommand::CancelInvoice),
    ]];

    for node in nodes {
        rows.push(vec![callback_button(
            &format!("Node: {}", node.from),
            CallbackCommand::MoveInvoiceNode(node.short_key().to_string()),
        )]);
    }

    InlineKeyboardMarkup::new(rows)
}
