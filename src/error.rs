use thiserror::Error;

/// Rejections raised by the link issuer for malformed payment requests.
///
/// Always recoverable: the caller surfaces the message and re-prompts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount is not a valid decimal number")]
    AmountNotANumber,
    #[error("amount must not be negative")]
    NegativeAmount,
    #[error("amount has more than {max_scale} decimal places allowed for {unit}")]
    ExcessivePrecision { unit: &'static str, max_scale: u32 },
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

impl ValidationError {
    /// The request field the rejection refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::AmountNotANumber | Self::NegativeAmount | Self::ExcessivePrecision { .. } => {
                "amount"
            }
            Self::UnsupportedCurrency(_) => "currency",
        }
    }
}

/// Session construction failures. These indicate an integration bug in the
/// caller, not bad user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("payment window must be positive, got {0} seconds")]
    NonPositiveWindow(u64),
}
