//! Message template constants.
//!
//! The reply classifier reverse-engineers the bot's own created-invoice and
//! created-trade messages, so the composers and the classifier must agree on
//! these strings exactly. Comparisons happen against the plain rendered text
//! Telegram hands back, not the MarkdownV2 source the composers send.

pub const CREATED_INVOICE_TITLE_PREFIX: &str = "⚡️ Created invoice for ";

pub const CREATED_TRADE_TITLE_PREFIX: &str = "🤝 Created trade for ";

pub const EDIT_INVOICE_DESCRIPTION_QUESTION: &str = "What should the invoice description be?";

pub const EDIT_INVOICE_TOKENS_QUESTION: &str = "What should the invoice amount be?";

pub const EDIT_TRADE_DESCRIPTION_QUESTION: &str = "What should the trade description be?";

pub const EDIT_TRADE_EXPIRES_AT_QUESTION: &str =
    "When should the trade expire? (date or days from now)";
