//! HTTP routing.

mod admin;
mod cart;
mod checkout;
mod rules;

use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::state::AppState;

pub use admin::DiscountResponse;
pub use cart::CartResponse;
pub use checkout::{CheckoutRequest, OrderResponse};

/// Bare API routes, without middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/cart/:user_id", get(cart::get_cart))
        .route("/cart/:user_id/items", post(cart::add_item))
        .route(
            "/cart/:user_id/items/:item_id",
            patch(cart::update_item).delete(cart::remove_item),
        )
        .route("/checkout/:user_id", post(checkout::checkout))
        .route("/admin/discounts/generate", post(admin::generate_discount))
        .route("/admin/stats", get(admin::stats))
        .route("/admin/reset", post(admin::reset))
        .route("/rules/evaluate", post(rules::evaluate))
        .route("/health", get(health))
        .with_state(state)
}

/// API routes with the standard middleware stack.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    with_middleware(router(state), config)
}

/// Wrap `router` in panic recovery and request tracing, plus permissive CORS
/// when enabled. A panicking handler answers 500 `server_error`.
pub fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    let router = router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http());
    if config.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "handler panicked".to_string()
    };
    ApiError::Internal(detail).into_response()
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
