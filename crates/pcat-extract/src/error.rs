use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid price \"{raw}\": {reason}")]
    InvalidPrice { raw: String, reason: String },

    #[error("invalid {what} pattern: {source}")]
    Pattern {
        what: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("amount {amount} cannot be converted exactly")]
    UnrepresentableAmount { amount: f64 },

    #[error("conversion rate must be positive, got {0}")]
    InvalidRate(Decimal),
}
