// src/api/routes.rs
use crate::trading::session::Session;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use super::handlers;

pub fn create_router(session: Arc<Session>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/balance", get(handlers::balance))
        .route("/api/price", get(handlers::price))
        .route(
            "/api/orders",
            get(handlers::open_orders).post(handlers::place_order),
        )
        .route("/api/orders/cancel", post(handlers::cancel_order))
        .with_state(session)
}
