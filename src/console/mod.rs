use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::issuer::Currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: u64,
    pub txid: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub status: TransactionStatus,
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    pub currency: Currency,
    pub amount: Decimal,
    pub usd_value: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiPermission {
    Read,
    Write,
    Webhook,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub id: u64,
    pub name: String,
    pub key: String,
    pub created: String,
    pub last_used: Option<String>,
    pub permissions: Vec<ApiPermission>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKeyRequest {
    pub name: String,
    pub permissions: Vec<ApiPermission>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub currency: String,
    pub interval: BillingInterval,
    pub features: Vec<String>,
    pub active: bool,
    pub subscribers: u32,
    pub created: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub currency: String,
    pub interval: BillingInterval,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutWallet {
    pub id: u64,
    pub currency: Currency,
    pub address: String,
    pub label: String,
    pub is_default: bool,
    pub verified: bool,
    pub added: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    pub currency: Currency,
    pub address: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRule {
    pub id: u64,
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub wallet_id: u64,
    pub min_amount: Decimal,
    pub enabled: bool,
    pub created: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub wallet_id: u64,
    pub min_amount: Decimal,
}

#[derive(Debug)]
struct ConsoleData {
    next_id: u64,
    transactions: Vec<TransactionRecord>,
    balances: Vec<AssetBalance>,
    api_keys: Vec<ApiKey>,
    plans: Vec<SubscriptionPlan>,
    payout_wallets: Vec<PayoutWallet>,
    payout_rules: Vec<PayoutRule>,
}

impl ConsoleData {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn seed() -> Self {
        Self {
            next_id: 100,
            transactions: vec![
                TransactionRecord {
                    id: 1,
                    txid: "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984".to_string(),
                    amount: Decimal::new(235, 4),
                    currency: Currency::Btc,
                    status: TransactionStatus::Confirmed,
                    date: "2024-01-15".to_string(),
                },
                TransactionRecord {
                    id: 2,
                    txid: "0x2f9840a85d5af5bf1d1762f925bdaddc4201f985".to_string(),
                    amount: Decimal::new(15_847, 4),
                    currency: Currency::Eth,
                    status: TransactionStatus::Pending,
                    date: "2024-01-14".to_string(),
                },
                TransactionRecord {
                    id: 3,
                    txid: "0x3f9840a85d5af5bf1d1762f925bdaddc4201f986".to_string(),
                    amount: Decimal::new(50_000, 2),
                    currency: Currency::Usdt,
                    status: TransactionStatus::Confirmed,
                    date: "2024-01-13".to_string(),
                },
                TransactionRecord {
                    id: 4,
                    txid: "0x4f9840a85d5af5bf1d1762f925bdaddc4201f987".to_string(),
                    amount: Decimal::new(1_250, 4),
                    currency: Currency::Btc,
                    status: TransactionStatus::Failed,
                    date: "2024-01-12".to_string(),
                },
            ],
            balances: vec![
                AssetBalance {
                    currency: Currency::Btc,
                    amount: Decimal::new(5_847, 5),
                    usd_value: Decimal::new(254_378, 2),
                },
                AssetBalance {
                    currency: Currency::Eth,
                    amount: Decimal::new(12_847, 4),
                    usd_value: Decimal::new(321_045, 2),
                },
                AssetBalance {
                    currency: Currency::Usdt,
                    amount: Decimal::new(125_000, 2),
                    usd_value: Decimal::new(125_000, 2),
                },
            ],
            api_keys: vec![
                ApiKey {
                    id: 1,
                    name: "Production API".to_string(),
                    key: "owl_live_sk_1234567890abcdef1234567890abcdef".to_string(),
                    created: "2024-01-15".to_string(),
                    last_used: Some("2024-01-20".to_string()),
                    permissions: vec![ApiPermission::Read, ApiPermission::Write],
                },
                ApiKey {
                    id: 2,
                    name: "Development API".to_string(),
                    key: "owl_test_sk_abcdef1234567890abcdef1234567890".to_string(),
                    created: "2024-01-10".to_string(),
                    last_used: Some("2024-01-19".to_string()),
                    permissions: vec![ApiPermission::Read],
                },
            ],
            plans: vec![
                SubscriptionPlan {
                    id: 1,
                    name: "Basic Plan".to_string(),
                    description: "Perfect for small businesses".to_string(),
                    price: Decimal::new(29, 0),
                    currency: "USD".to_string(),
                    interval: BillingInterval::Monthly,
                    features: vec![
                        "Up to 100 transactions".to_string(),
                        "Email support".to_string(),
                        "Basic analytics".to_string(),
                    ],
                    active: true,
                    subscribers: 45,
                    created: "2024-01-15".to_string(),
                },
                SubscriptionPlan {
                    id: 2,
                    name: "Pro Plan".to_string(),
                    description: "For growing businesses".to_string(),
                    price: Decimal::new(99, 0),
                    currency: "USD".to_string(),
                    interval: BillingInterval::Monthly,
                    features: vec![
                        "Unlimited transactions".to_string(),
                        "Priority support".to_string(),
                        "Advanced analytics".to_string(),
                    ],
                    active: true,
                    subscribers: 12,
                    created: "2024-01-10".to_string(),
                },
            ],
            payout_wallets: vec![
                PayoutWallet {
                    id: 1,
                    currency: Currency::Btc,
                    address: "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh".to_string(),
                    label: "Main BTC Wallet".to_string(),
                    is_default: true,
                    verified: true,
                    added: "2024-01-15".to_string(),
                },
                PayoutWallet {
                    id: 2,
                    currency: Currency::Eth,
                    address: "0x742d35Cc6634C0532925a3b8D4C2C4e4C4C4C4C4".to_string(),
                    label: "Personal ETH Wallet".to_string(),
                    is_default: false,
                    verified: true,
                    added: "2024-01-12".to_string(),
                },
            ],
            payout_rules: vec![PayoutRule {
                id: 1,
                from_currency: Currency::Eth,
                to_currency: Currency::Btc,
                wallet_id: 1,
                min_amount: Decimal::new(1, 2),
                enabled: true,
                created: "2024-01-16".to_string(),
            }],
        }
    }
}

/// In-memory backing store for the merchant console.
///
/// Seeded with demo data. Everything here is plain list upkeep with no
/// lifecycle beyond add and remove.
pub struct ConsoleStore {
    data: RwLock<ConsoleData>,
}

impl Default for ConsoleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(ConsoleData::seed()),
        }
    }

    pub async fn transactions(&self) -> Vec<TransactionRecord> {
        self.data.read().await.transactions.clone()
    }

    pub async fn balances(&self) -> Vec<AssetBalance> {
        self.data.read().await.balances.clone()
    }

    pub async fn api_keys(&self) -> Vec<ApiKey> {
        self.data.read().await.api_keys.clone()
    }

    pub async fn create_api_key(&self, req: CreateApiKeyRequest) -> ApiKey {
        let mut data = self.data.write().await;
        let key = ApiKey {
            id: data.next_id(),
            name: req.name,
            key: format!("owl_live_sk_{}", hex::encode(rand::random::<[u8; 16]>())),
            created: today(),
            last_used: None,
            permissions: req.permissions,
        };
        data.api_keys.push(key.clone());
        key
    }

    pub async fn delete_api_key(&self, id: u64) -> bool {
        let mut data = self.data.write().await;
        let before = data.api_keys.len();
        data.api_keys.retain(|k| k.id != id);
        data.api_keys.len() != before
    }

    pub async fn plans(&self) -> Vec<SubscriptionPlan> {
        self.data.read().await.plans.clone()
    }

    pub async fn create_plan(&self, req: CreatePlanRequest) -> SubscriptionPlan {
        let mut data = self.data.write().await;
        let plan = SubscriptionPlan {
            id: data.next_id(),
            name: req.name,
            description: req.description,
            price: req.price,
            currency: req.currency,
            interval: req.interval,
            features: req.features,
            active: true,
            subscribers: 0,
            created: today(),
        };
        data.plans.push(plan.clone());
        plan
    }

    pub async fn delete_plan(&self, id: u64) -> bool {
        let mut data = self.data.write().await;
        let before = data.plans.len();
        data.plans.retain(|p| p.id != id);
        data.plans.len() != before
    }

    pub async fn payout_wallets(&self) -> Vec<PayoutWallet> {
        self.data.read().await.payout_wallets.clone()
    }

    pub async fn create_payout_wallet(&self, req: CreateWalletRequest) -> PayoutWallet {
        let mut data = self.data.write().await;
        let wallet = PayoutWallet {
            id: data.next_id(),
            currency: req.currency,
            address: req.address,
            label: req.label,
            is_default: data.payout_wallets.is_empty(),
            verified: false,
            added: today(),
        };
        data.payout_wallets.push(wallet.clone());
        wallet
    }

    pub async fn delete_payout_wallet(&self, id: u64) -> bool {
        let mut data = self.data.write().await;
        let before = data.payout_wallets.len();
        data.payout_wallets.retain(|w| w.id != id);
        data.payout_wallets.len() != before
    }

    pub async fn payout_rules(&self) -> Vec<PayoutRule> {
        self.data.read().await.payout_rules.clone()
    }

    pub async fn create_payout_rule(&self, req: CreateRuleRequest) -> PayoutRule {
        let mut data = self.data.write().await;
        let rule = PayoutRule {
            id: data.next_id(),
            from_currency: req.from_currency,
            to_currency: req.to_currency,
            wallet_id: req.wallet_id,
            min_amount: req.min_amount,
            enabled: true,
            created: today(),
        };
        data.payout_rules.push(rule.clone());
        rule
    }

    pub async fn delete_payout_rule(&self, id: u64) -> bool {
        let mut data = self.data.write().await;
        let before = data.payout_rules.len();
        data.payout_rules.retain(|r| r.id != id);
        data.payout_rules.len() != before
    }
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_data_is_present() {
        let store = ConsoleStore::new();
        assert_eq!(store.transactions().await.len(), 4);
        assert_eq!(store.balances().await.len(), 3);
        assert_eq!(store.api_keys().await.len(), 2);
        assert_eq!(store.plans().await.len(), 2);
        assert_eq!(store.payout_wallets().await.len(), 2);
        assert_eq!(store.payout_rules().await.len(), 1);
    }

    #[tokio::test]
    async fn test_created_api_keys_get_fresh_secrets() {
        let store = ConsoleStore::new();
        let a = store
            .create_api_key(CreateApiKeyRequest {
                name: "CI".to_string(),
                permissions: vec![ApiPermission::Read],
            })
            .await;
        let b = store
            .create_api_key(CreateApiKeyRequest {
                name: "Staging".to_string(),
                permissions: vec![ApiPermission::Read, ApiPermission::Webhook],
            })
            .await;

        assert!(a.key.starts_with("owl_live_sk_"));
        assert_eq!(a.key.len(), "owl_live_sk_".len() + 32);
        assert_ne!(a.key, b.key);
        assert_ne!(a.id, b.id);
        assert_eq!(store.api_keys().await.len(), 4);
    }

    #[tokio::test]
    async fn test_delete_removes_only_the_target() {
        let store = ConsoleStore::new();
        assert!(store.delete_api_key(1).await);
        assert!(!store.delete_api_key(1).await);
        assert_eq!(store.api_keys().await.len(), 1);

        assert!(store.delete_plan(2).await);
        assert!(!store.delete_plan(99).await);
        assert_eq!(store.plans().await.len(), 1);
    }

    #[tokio::test]
    async fn test_first_wallet_becomes_default() {
        let store = ConsoleStore::new();
        assert!(store.delete_payout_wallet(1).await);
        assert!(store.delete_payout_wallet(2).await);

        let wallet = store
            .create_payout_wallet(CreateWalletRequest {
                currency: Currency::Usdt,
                address: "TY2b5eXaB9vGqzLM3xP1".to_string(),
                label: "Treasury".to_string(),
            })
            .await;
        assert!(wallet.is_default);
        assert!(!wallet.verified);
    }
}
