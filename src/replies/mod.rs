//! Reply-context decoding.
//!
//! When the connected user replies to a message the bot previously posted,
//! the bot has to infer what edit the reply is asking for from the text of
//! the replied-to message alone. The classifiers here are pure and total:
//! arbitrary historical text either matches a known template or is None.

mod invoice_action;
mod reply_action;
mod trade_action;
mod update_invoice;
mod update_trade;

pub use invoice_action::invoice_action_type;
pub use reply_action::{is_message_reply_action, reply_action_type};
pub use trade_action::trade_action_type;
pub use update_invoice::update_invoice_from_reply;
pub use update_trade::update_trade_from_reply;
