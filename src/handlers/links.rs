use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::{
    app_state::AppState,
    error::ValidationError,
    issuer::{self, PaymentRequest},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub status: String,
    pub id: String,
    pub url: String,
    pub amount: String,
    pub currency: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LinkError {
    pub status: String,
    pub field: &'static str,
    pub reason: String,
}

/// POST /api/links
/// Validates the request and mints a shareable payment link
pub async fn create_link(
    State(state): State<AppState>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<CreateLinkResponse>, (StatusCode, Json<LinkError>)> {
    let link = issuer::create_payment_link(&req, &state.config.payment_base())
        .map_err(error_response)?;

    tracing::info!("issued payment link {}", link.id);

    Ok(Json(CreateLinkResponse {
        status: "OK".to_string(),
        id: link.id.to_string(),
        url: link.url,
        amount: req.amount,
        currency: req.currency,
        description: req.description,
    }))
}

fn error_response(err: ValidationError) -> (StatusCode, Json<LinkError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(LinkError {
            status: "ERROR".to_string(),
            field: err.field(),
            reason: err.to_string(),
        }),
    )
}
