// src/api/handlers.rs
use crate::domain::errors::ExchangeError;
use crate::domain::models::{AccountBalance, OrderRecord, OrderRequest, OrderSide};
use crate::exchange::types::CancelAck;
use crate::trading::session::Session;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Error envelope returned to the dashboard. Every facade failure becomes a
/// status code plus the error message, never a crash.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ExchangeError> for ApiError {
    fn from(err: ExchangeError) -> Self {
        let status = match &err {
            ExchangeError::SymbolNotFound(_) => StatusCode::NOT_FOUND,
            ExchangeError::BelowMinimum { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ExchangeError::Rejected { .. } => StatusCode::BAD_REQUEST,
            ExchangeError::Connection(_) | ExchangeError::Transport(_) => StatusCode::BAD_GATEWAY,
            ExchangeError::Parse(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub symbol: String,
}

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderForm {
    pub symbol: String,
    pub side: String,
    pub kind: String,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct CancelForm {
    pub symbol: String,
    pub order_id: i64,
}

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub symbol: String,
    pub price: Decimal,
}

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../templates/dashboard.html"))
}

pub async fn balance(
    State(session): State<Arc<Session>>,
) -> Result<Json<AccountBalance>, ApiError> {
    let balance = session.balance().await?;
    Ok(Json(balance))
}

pub async fn price(
    State(session): State<Arc<Session>>,
    Query(params): Query<PriceQuery>,
) -> Result<Json<PriceResponse>, ApiError> {
    let price = session.current_price(&params.symbol).await?;
    Ok(Json(PriceResponse {
        symbol: params.symbol.to_uppercase(),
        price,
    }))
}

pub async fn open_orders(
    State(session): State<Arc<Session>>,
    Query(params): Query<OrdersQuery>,
) -> Result<Json<Vec<OrderRecord>>, ApiError> {
    let orders = session.open_orders(params.symbol.as_deref()).await?;
    Ok(Json(orders))
}

pub async fn place_order(
    State(session): State<Arc<Session>>,
    Json(form): Json<PlaceOrderForm>,
) -> Result<Json<OrderRecord>, ApiError> {
    let side: OrderSide = form
        .side
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid side: {}", form.side)))?;

    if form.quantity <= Decimal::ZERO {
        return Err(ApiError::bad_request("Quantity must be positive"));
    }

    let request = match form.kind.to_uppercase().as_str() {
        "MARKET" => OrderRequest::market(&form.symbol, side, form.quantity),
        "LIMIT" => {
            let price = form
                .price
                .filter(|p| *p > Decimal::ZERO)
                .ok_or_else(|| ApiError::bad_request("Limit orders need a positive price"))?;
            OrderRequest::limit(&form.symbol, side, form.quantity, price)
        }
        other => return Err(ApiError::bad_request(format!("Invalid order kind: {}", other))),
    };

    let record = session.place(&request).await?;
    Ok(Json(record))
}

pub async fn cancel_order(
    State(session): State<Arc<Session>>,
    Json(form): Json<CancelForm>,
) -> Result<Json<CancelAck>, ApiError> {
    let ack = session.cancel(&form.symbol, form.order_id).await?;
    Ok(Json(ack))
}
