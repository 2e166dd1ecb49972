//! Token amount display and entry.

use thiserror::Error;

const COIN: f64 = 1e8;

/// How an amount entered in chat failed to parse
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is fractional")]
    Fractional,
    #[error("amount is not understood")]
    Invalid,
}

fn group_thousands(tokens: u64) -> String {
    let digits = tokens.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Format tokens for display.
///
/// The default is the big-unit notation with 8 decimal places; setting
/// PREFERRED_TOKENS_TYPE=full switches to grouped whole tokens.
pub fn format_tokens(tokens: u64) -> String {
    match std::env::var("PREFERRED_TOKENS_TYPE").as_deref() {
        Ok("full") | Ok("rounded") => group_thousands(tokens),
        _ => format!("{:.8}", tokens as f64 / COIN),
    }
}

/// Format tokens, substituting a placeholder for zero
pub fn format_tokens_or(tokens: u64, none: &str) -> String {
    if tokens == 0 {
        return none.to_string();
    }

    format_tokens(tokens)
}

/// Parse a user-entered amount into tokens.
///
/// Accepts a whole number of tokens or a big-unit decimal like "0.0001",
/// with underscores and commas as separators. Fractional token amounts and
/// anything else are user-input errors, not faults.
pub fn parse_tokens(amount: &str) -> Result<u64, AmountError> {
    let cleaned: String = amount
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    if cleaned.is_empty() {
        return Err(AmountError::Invalid);
    }

    if let Ok(tokens) = cleaned.parse::<u64>() {
        return Ok(tokens);
    }

    let value: f64 = cleaned.parse().map_err(|_| AmountError::Invalid)?;

    if !value.is_finite() || value < 0.0 {
        return Err(AmountError::Invalid);
    }

    let tokens = value * COIN;

    if (tokens - tokens.round()).abs() > f64::EPSILON * COIN {
        return Err(AmountError::Fractional);
    }

    Ok(tokens.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_token_amounts_parse() {
        assert_eq!(parse_tokens("21000"), Ok(21000));
        assert_eq!(parse_tokens(" 1,000 "), Ok(1000));
        assert_eq!(parse_tokens("1_000_000"), Ok(1000000));
    }

    #[test]
    fn big_unit_amounts_convert_to_tokens() {
        assert_eq!(parse_tokens("0.00010000"), Ok(10000));
        assert_eq!(parse_tokens("1.5"), Ok(150000000));
    }

    #[test]
    fn fractional_token_amounts_are_rejected() {
        assert_eq!(parse_tokens("0.000000001"), Err(AmountError::Fractional));
    }

    #[test]
    fn garbage_amounts_are_invalid() {
        assert_eq!(parse_tokens(""), Err(AmountError::Invalid));
        assert_eq!(parse_tokens("lots"), Err(AmountError::Invalid));
        assert_eq!(parse_tokens("-5"), Err(AmountError::Invalid));
    }

    #[test]
    fn grouping_inserts_separators() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn zero_formats_as_placeholder() {
        assert_eq!(format_tokens_or(0, "-"), "-");
    }
}
