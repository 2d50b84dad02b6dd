//! Admin endpoints: discount generation, statistics and reset.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use shopfront_commerce::prelude::*;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DiscountResponse {
    pub discount: DiscountCode,
}

/// `POST /admin/discounts/generate`
pub async fn generate_discount(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<DiscountResponse>), ApiError> {
    let mut shop = state.shop.lock().await;
    let discount = shop.generate_discount()?;
    Ok((StatusCode::CREATED, Json(DiscountResponse { discount })))
}

/// `GET /admin/stats`
pub async fn stats(State(state): State<AppState>) -> Result<Json<Stats>, ApiError> {
    let stats = state.shop.lock().await.stats()?;
    Ok(Json(stats))
}

/// `POST /admin/reset`
pub async fn reset(State(state): State<AppState>) -> StatusCode {
    state.shop.lock().await.reset();
    StatusCode::NO_CONTENT
}
