//! Cart endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use shopfront_commerce::prelude::*;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// `{ "cart": [...] }`
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Vec<CartItem>,
}

impl CartResponse {
    fn new(items: &[CartItem]) -> Json<Self> {
        Json(Self {
            cart: items.to_vec(),
        })
    }
}

/// `GET /cart/:user_id`
pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<CartResponse> {
    let shop = state.shop.lock().await;
    CartResponse::new(shop.cart(&UserId::from(user_id)))
}

/// `POST /cart/:user_id/items`
pub async fn add_item(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<Json<NewCartItem>, JsonRejection>,
) -> Result<(StatusCode, Json<CartResponse>), ApiError> {
    let Json(item) = body.map_err(|rejection| ApiError::malformed("invalid_item", rejection.body_text()))?;
    let user_id = UserId::from(user_id);

    let mut shop = state.shop.lock().await;
    let cart = shop.add_item(&user_id, item)?;
    info!(user_id = %user_id, lines = cart.len(), "item added to cart");

    Ok((StatusCode::CREATED, CartResponse::new(cart)))
}

/// `PATCH /cart/:user_id/items/:item_id`
///
/// An unknown item is reported before a bad body.
pub async fn update_item(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(String, String)>,
    body: Result<Json<CartItemUpdate>, JsonRejection>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id = UserId::from(user_id);
    let item_id = LineItemId::from(item_id);

    let mut shop = state.shop.lock().await;
    shop.require_item(&user_id, &item_id)?;
    let Json(update) =
        body.map_err(|rejection| ApiError::malformed("invalid_quantity", rejection.body_text()))?;

    let cart = shop.update_item(&user_id, &item_id, update)?;
    Ok(CartResponse::new(cart))
}

/// `DELETE /cart/:user_id/items/:item_id`
pub async fn remove_item(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(String, String)>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id = UserId::from(user_id);
    let item_id = LineItemId::from(item_id);

    let mut shop = state.shop.lock().await;
    let cart = shop.remove_item(&user_id, &item_id)?;
    info!(user_id = %user_id, item_id = %item_id, "item removed from cart");

    Ok(CartResponse::new(cart))
}
