// src/exchange/types.rs
use crate::domain::errors::{ExchangeError, ExchangeResult};
use crate::domain::models::OrderSide;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Futures account snapshot as returned by the exchange.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub total_margin_balance: String,
    pub available_balance: String,
    pub total_unrealized_profit: String,
    #[serde(default)]
    pub assets: Vec<RawAssetBalance>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssetBalance {
    pub asset: String,
    pub wallet_balance: String,
}

/// Bulk instrument metadata. One call returns every listed symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub price_precision: u32,
    pub quantity_precision: u32,
    #[serde(default)]
    pub filters: Vec<SymbolFilter>,
}

/// One entry of a symbol's filter list. Only the LOT_SIZE fields are
/// consumed; everything else stays `None`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolFilter {
    pub filter_type: String,
    #[serde(default)]
    pub min_qty: Option<String>,
    #[serde(default)]
    pub step_size: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

/// Raw order payload, shared by order creation and open-order listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub order_id: i64,
    pub symbol: String,
    pub side: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub orig_qty: String,
    /// Absent for market orders
    #[serde(default)]
    pub price: Option<String>,
    pub status: String,
}

/// Cancellation acknowledgement, passed through to the caller raw.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAck {
    pub order_id: i64,
    pub symbol: String,
    pub status: String,
}

/// Parameters for creating an order, serialized into the request query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderRequest {
    pub symbol: String,
    pub side: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<String>,
}

impl NewOrderRequest {
    pub fn market(symbol: &str, side: OrderSide, quantity: String) -> Self {
        Self {
            symbol: symbol.to_string(),
            side: side.as_str().to_string(),
            kind: "MARKET".to_string(),
            quantity,
            price: None,
            time_in_force: None,
        }
    }

    /// Limit orders are always placed good-until-cancelled.
    pub fn limit(symbol: &str, side: OrderSide, quantity: String, price: String) -> Self {
        Self {
            symbol: symbol.to_string(),
            side: side.as_str().to_string(),
            kind: "LIMIT".to_string(),
            quantity,
            price: Some(price),
            time_in_force: Some("GTC".to_string()),
        }
    }
}

/// Parse a decimal field from an exchange payload.
pub fn parse_decimal(value: &str, field: &str) -> ExchangeResult<Decimal> {
    Decimal::from_str(value)
        .map_err(|e| ExchangeError::Parse(format!("Invalid {} '{}': {}", field, value, e)))
}
