use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    app_state::AppState,
    console::{
        ApiKey, AssetBalance, CreateApiKeyRequest, CreatePlanRequest, CreateRuleRequest,
        CreateWalletRequest, PayoutRule, PayoutWallet, SubscriptionPlan, TransactionRecord,
    },
};

/// GET /api/transactions
pub async fn list_transactions(State(state): State<AppState>) -> Json<Vec<TransactionRecord>> {
    Json(state.console.transactions().await)
}

/// GET /api/balances
pub async fn list_balances(State(state): State<AppState>) -> Json<Vec<AssetBalance>> {
    Json(state.console.balances().await)
}

/// GET /api/keys
pub async fn list_api_keys(State(state): State<AppState>) -> Json<Vec<ApiKey>> {
    Json(state.console.api_keys().await)
}

/// POST /api/keys
pub async fn create_api_key(
    State(state): State<AppState>,
    Json(req): Json<CreateApiKeyRequest>,
) -> Json<ApiKey> {
    Json(state.console.create_api_key(req).await)
}

/// DELETE /api/keys/{id}
pub async fn delete_api_key(Path(id): Path<u64>, State(state): State<AppState>) -> StatusCode {
    if state.console.delete_api_key(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// GET /api/plans
pub async fn list_plans(State(state): State<AppState>) -> Json<Vec<SubscriptionPlan>> {
    Json(state.console.plans().await)
}

/// POST /api/plans
pub async fn create_plan(
    State(state): State<AppState>,
    Json(req): Json<CreatePlanRequest>,
) -> Json<SubscriptionPlan> {
    Json(state.console.create_plan(req).await)
}

/// DELETE /api/plans/{id}
pub async fn delete_plan(Path(id): Path<u64>, State(state): State<AppState>) -> StatusCode {
    if state.console.delete_plan(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// GET /api/payouts/wallets
pub async fn list_wallets(State(state): State<AppState>) -> Json<Vec<PayoutWallet>> {
    Json(state.console.payout_wallets().await)
}

/// POST /api/payouts/wallets
pub async fn create_wallet(
    State(state): State<AppState>,
    Json(req): Json<CreateWalletRequest>,
) -> Json<PayoutWallet> {
    Json(state.console.create_payout_wallet(req).await)
}

/// DELETE /api/payouts/wallets/{id}
pub async fn delete_wallet(Path(id): Path<u64>, State(state): State<AppState>) -> StatusCode {
    if state.console.delete_payout_wallet(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// GET /api/payouts/rules
pub async fn list_rules(State(state): State<AppState>) -> Json<Vec<PayoutRule>> {
    Json(state.console.payout_rules().await)
}

/// POST /api/payouts/rules
pub async fn create_rule(
    State(state): State<AppState>,
    Json(req): Json<CreateRuleRequest>,
) -> Json<PayoutRule> {
    Json(state.console.create_payout_rule(req).await)
}

/// DELETE /api/payouts/rules/{id}
pub async fn delete_rule(Path(id): Path<u64>, State(state): State<AppState>) -> StatusCode {
    if state.console.delete_payout_rule(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
