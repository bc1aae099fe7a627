use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Whether the entered amount is fiat- or asset-denominated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AmountType {
    Usd,
    Crypto,
}

/// Settlement assets accepted for payment links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Btc,
    Eth,
    Usdt,
}

impl Currency {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "BTC" => Some(Self::Btc),
            "ETH" => Some(Self::Eth),
            "USDT" => Some(Self::Usdt),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Eth => "ETH",
            Self::Usdt => "USDT",
        }
    }

    /// Decimal places of the asset's smallest representable unit.
    pub fn max_scale(&self) -> u32 {
        match self {
            Self::Btc => 8,
            Self::Eth => 18,
            Self::Usdt => 6,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Merchant input for a new payment link.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: String,
    pub amount_type: AmountType,
    pub description: Option<String>,
    pub currency: String,
}

/// A freshly minted payment link. Immutable once issued.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentLink {
    pub id: LinkId,
    pub url: String,
}

/// Validate a payment request and mint a link for it.
///
/// `base_url` is the deployment's public payment base, e.g.
/// `https://pay.example.com/payment`. No collision retry: ids carry 64 bits
/// of entropy and links only live for one payment window.
pub fn create_payment_link(
    request: &PaymentRequest,
    base_url: &str,
) -> Result<PaymentLink, ValidationError> {
    let currency = resolve_currency(&request.currency)?;
    validate_amount(&request.amount, request.amount_type, currency)?;

    let id = LinkId::generate();
    let url = format!("{}/{}", base_url, id);

    Ok(PaymentLink { id, url })
}

fn resolve_currency(code: &str) -> Result<Currency, ValidationError> {
    Currency::from_code(code).ok_or_else(|| ValidationError::UnsupportedCurrency(code.to_string()))
}

fn validate_amount(
    raw: &str,
    amount_type: AmountType,
    currency: Currency,
) -> Result<Decimal, ValidationError> {
    let amount = Decimal::from_str(raw.trim()).map_err(|_| ValidationError::AmountNotANumber)?;

    if amount.is_sign_negative() {
        return Err(ValidationError::NegativeAmount);
    }

    // Fiat entry is capped at cents; asset entry at the asset's precision.
    let (unit, max_scale) = match amount_type {
        AmountType::Usd => ("USD", 2),
        AmountType::Crypto => (currency.code(), currency.max_scale()),
    };
    if amount.scale() > max_scale {
        return Err(ValidationError::ExcessivePrecision { unit, max_scale });
    }

    Ok(amount)
}

pub mod link_id;

pub use link_id::LinkId;
