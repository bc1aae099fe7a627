use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::issuer::{Currency, LinkId};

/// External feed of payment confirmations.
///
/// A production deployment backs this with a chain-monitoring service that
/// resolves once funds matching the expected amount and address have enough
/// confirmations. The session tracker ignores resolutions that arrive after
/// the session reached a terminal state, so implementations are free to
/// resolve late or more than once per id.
#[async_trait]
pub trait ConfirmationSource: Send + Sync {
    async fn wait_for_confirmation(&self, id: &LinkId) -> Result<()>;
}

/// Stand-in confirmation source that resolves after a fixed delay.
pub struct SimulatedConfirmation {
    delay: Duration,
}

impl SimulatedConfirmation {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ConfirmationSource for SimulatedConfirmation {
    async fn wait_for_confirmation(&self, id: &LinkId) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        tracing::debug!("simulated confirmation for payment {}", id);
        Ok(())
    }
}

/// Destination and display data for one payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub merchant_name: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub usd_amount: Decimal,
    pub description: String,
    pub address: String,
}

/// Read-only source of destination addresses and exact amounts, keyed by
/// payment id. The widget renders these and the scannable payment code.
#[async_trait]
pub trait AddressProvider: Send + Sync {
    async fn payment_details(&self, id: &LinkId) -> Result<PaymentDetails>;
}

/// Fixed demo address book, standing in for the merchant's wallet backend.
pub struct StaticAddressBook;

#[async_trait]
impl AddressProvider for StaticAddressBook {
    async fn payment_details(&self, _id: &LinkId) -> Result<PaymentDetails> {
        Ok(PaymentDetails {
            merchant_name: "Digital Store".to_string(),
            amount: Decimal::new(235, 4), // 0.0235
            currency: Currency::Btc,
            usd_amount: Decimal::new(125_000, 2), // 1250.00
            description: "Premium subscription".to_string(),
            address: "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh".to_string(),
        })
    }
}
