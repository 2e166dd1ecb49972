//! Single-user access gate. Only the connected user id from the
//! configuration may drive the bot.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("user {0} is not the connected user")]
    Unauthorized(u64),
}

pub fn check_access(from: u64, connected: u64) -> Result<(), AccessError> {
    if from == connected {
        Ok(())
    } else {
        Err(AccessError::Unauthorized(from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_connected_user_passes() {
        assert_eq!(check_access(7, 7), Ok(()));
        assert_eq!(check_access(8, 7), Err(AccessError::Unauthorized(8)));
    }
}
