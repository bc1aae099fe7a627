use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::{
    app_state::AppState, issuer::LinkId, monitor::PaymentDetails, session::SessionSnapshot,
};

#[derive(Debug, Serialize)]
pub struct PaymentError {
    pub status: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub id: String,
    pub details: PaymentDetails,
    pub session: SessionSnapshot,
}

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub status: String,
    pub applied: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// GET /payment/{id}
/// Opens the payment view, starting the session countdown on first view
pub async fn open_payment(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PaymentView>, (StatusCode, Json<PaymentError>)> {
    let id = parse_id(&id)?;

    let details = state.addresses.payment_details(&id).await.map_err(|err| {
        tracing::warn!("address provider failed for payment {}: {}", id, err);
        error_response(StatusCode::BAD_GATEWAY, "Payment details unavailable")
    })?;

    let session = state
        .sessions
        .open(&id, state.config.window_secs, state.confirmations.clone())
        .await
        .map_err(|err| error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()))?;

    Ok(Json(PaymentView {
        id: id.to_string(),
        details,
        session,
    }))
}

/// GET /payment/{id}/status
pub async fn payment_status(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, (StatusCode, Json<PaymentError>)> {
    let id = parse_id(&id)?;

    state
        .sessions
        .snapshot(&id)
        .await
        .map(Json)
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "No session for this payment"))
}

/// POST /payment/{id}/confirm
/// Inbound confirmation signal; signals landing after a terminal state are
/// dropped (applied = false), not errors
pub async fn confirm_payment(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ConfirmResponse>, (StatusCode, Json<PaymentError>)> {
    let id = parse_id(&id)?;

    let applied = state
        .sessions
        .confirm(&id)
        .await
        .ok_or_else(|| error_response(StatusCode::NOT_FOUND, "No session for this payment"))?;

    Ok(Json(ConfirmResponse {
        status: "OK".to_string(),
        applied,
    }))
}

/// DELETE /payment/{id}
/// Tears the session down, cancelling its timers
pub async fn close_payment(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<PaymentError>)> {
    let id = parse_id(&id)?;

    if state.sessions.close(&id).await {
        Ok(Json(StatusResponse {
            status: "OK".to_string(),
        }))
    } else {
        Err(error_response(
            StatusCode::NOT_FOUND,
            "No session for this payment",
        ))
    }
}

fn parse_id(raw: &str) -> Result<LinkId, (StatusCode, Json<PaymentError>)> {
    LinkId::from_hex(raw)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid payment id"))
}

fn error_response(code: StatusCode, reason: &str) -> (StatusCode, Json<PaymentError>) {
    (
        code,
        Json(PaymentError {
            status: "ERROR".to_string(),
            reason: reason.to_string(),
        }),
    )
}
