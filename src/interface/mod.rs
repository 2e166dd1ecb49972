pub mod amounts;
pub mod callbacks;
pub mod templates;

pub use amounts::{format_tokens, parse_tokens, AmountError};
pub use callbacks::CallbackCommand;
