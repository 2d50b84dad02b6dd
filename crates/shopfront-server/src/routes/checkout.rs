//! Checkout endpoint.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use shopfront_commerce::prelude::*;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub discount_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Order,
}

impl CheckoutRequest {
    /// Decode a checkout body. An empty body carries no code, whatever its
    /// content type; anything else must be a JSON object.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|err| ApiError::malformed("invalid_discount", err.to_string()))
    }
}

/// `POST /checkout/:user_id`
///
/// The body is optional. A body that is present but undecodable is rejected
/// with `invalid_discount` before the cart is touched.
pub async fn checkout(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let request = CheckoutRequest::from_body(&body)?;
    let user_id = UserId::from(user_id);

    let mut shop = state.shop.lock().await;
    let order = shop.checkout(&user_id, request.discount_code.as_deref())?;

    Ok((StatusCode::CREATED, Json(OrderResponse { order })))
}
