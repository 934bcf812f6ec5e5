//! Admin review surface: list orders and adjudicate them.
//!
//! Every handler requires a shared-secret bearer token. When no token is
//! configured the whole surface is refused.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::orders::OrderResponse;
use super::AppState;
use crate::domain::Order;
use crate::error::AppError;
use crate::notify::status_changed_message;
use crate::orders::AdminStatus;

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let token = state
        .config
        .admin_token
        .as_deref()
        .ok_or(AppError::Unauthorized)?;

    let supplied = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if supplied == format!("Bearer {}", token) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

#[derive(Debug, Serialize)]
pub struct ListOrdersResponse {
    pub orders: Vec<Order>,
}

pub async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListOrdersResponse>, AppError> {
    authorize(&state, &headers)?;

    let orders = state.service.list().await?;
    Ok(Json(ListOrdersResponse { orders }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusRequest {
    pub order_id: Option<String>,
    pub status: Option<String>,
    pub reason: Option<String>,
}

pub async fn set_order_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    authorize(&state, &headers)?;

    let order_id = req
        .order_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing orderId".to_string()))?;

    let status = req
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing status".to_string()))?;
    let status = AdminStatus::parse(status).ok_or_else(|| {
        AppError::BadRequest("Invalid status. Use: completed, rejected, expired".to_string())
    })?;

    let order = state.service.set_status(&order_id, status, req.reason).await?;

    state.notify_detached(status_changed_message(&order));

    Ok(Json(OrderResponse { order }))
}
