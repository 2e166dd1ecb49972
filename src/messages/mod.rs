pub mod invoice;
pub mod summary;
pub mod trade;

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::markdown::{escape, italic};

use crate::interface::CallbackCommand;

/// A composed chat message: MarkdownV2 text plus an optional keyboard
pub struct ComposedMessage {
    pub text: String,
    pub markup: Option<InlineKeyboardMarkup>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Generic,
    InvalidAmount,
    FractionalAmount,
    InvalidExpiry,
}

pub fn callback_button(label: &str, command: CallbackCommand) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label.to_string(), command.to_data())
}

/// Keyboard with a single OK button that removes the message
pub fn remove_message_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![callback_button(
        "OK",
        CallbackCommand::RemoveMessage,
    )]])
}

/// A failure notice with an OK button to dismiss it
pub fn failure_message(kind: FailureKind) -> ComposedMessage {
    let text = match kind {
        FailureKind::Generic => "⚠️ Unexpected error :(",
        FailureKind::InvalidAmount => "⚠️ Amount not understood. Try a number?",
        FailureKind::FractionalAmount => "⚠️ Amount not understood. Try a non-fractional number?",
        FailureKind::InvalidExpiry => "⚠️ Expiry not understood. Try a date or a number of days?",
    };

    ComposedMessage {
        text: italic(&escape(text)),
        markup: Some(remove_message_keyboard()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_messages_carry_a_dismiss_button() {
        let composed = failure_message(FailureKind::InvalidAmount);

        assert!(composed.text.contains("Amount not understood"));

        let markup = composed.markup.unwrap();
        let button = &markup.inline_keyboard[0][0];

        assert_eq!(button.text, "OK");
    }

    #[test]
    fn expiry_failure_talks_about_dates_not_amounts() {
        let composed = failure_message(FailureKind::InvalidExpiry);

        assert!(composed.text.contains("Expiry not understood"));
        assert!(!composed.text.contains("Amount"));
    }
}
