// src/domain/models.rs
use crate::domain::errors::ExchangeError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Per-symbol trading constraints fetched from the exchange's instrument
/// metadata. Immutable once fetched; cached for the process lifetime.
///
/// Invariant: `step_size > 0`; every accepted quantity is an integer
/// multiple of `step_size` and at least `min_quantity`.
#[derive(Debug, Clone, PartialEq)]
pub struct TradingRules {
    /// Decimal places allowed in a price
    pub price_precision: u32,

    /// Decimal places allowed in a quantity
    pub quantity_precision: u32,

    /// Minimum order size
    pub min_quantity: Decimal,

    /// Quantization granularity for order size
    pub step_size: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderSide {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(OrderSide::Buy),
            "SELL" => Ok(OrderSide::Sell),
            other => Err(ExchangeError::Parse(format!(
                "Invalid order side: {}",
                other
            ))),
        }
    }
}

/// Order kind on the request path. A limit order carries its price, so a
/// priceless limit order is unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderKind {
    Market,
    Limit(Decimal),
}

impl OrderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderKind::Market => "MARKET",
            OrderKind::Limit(_) => "LIMIT",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrderKind::Market => write!(f, "MARKET"),
            OrderKind::Limit(price) => write!(f, "LIMIT {}", price),
        }
    }
}

/// A single order placement request. Transient; constructed per call.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub kind: OrderKind,
    pub quantity: Decimal,
}

impl OrderRequest {
    pub fn market(symbol: &str, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            side,
            kind: OrderKind::Market,
            quantity,
        }
    }

    pub fn limit(symbol: &str, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            side,
            kind: OrderKind::Limit(price),
            quantity,
        }
    }
}

/// Canonical order record produced from the exchange's raw reply.
///
/// Side, kind and status are kept as the exchange-defined strings: the
/// mapper stays total over order types this client never places but may
/// still see in an open-order listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    pub order_id: i64,
    pub symbol: String,
    pub side: String,
    pub kind: String,
    pub quantity: Decimal,
    /// Zero for market orders, which carry no price field.
    pub price: Decimal,
    pub status: String,
}

/// Result of quantity normalization. Both the requested and the adjusted
/// value are surfaced so callers can see how much of the request the step
/// size truncated away before anything is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuantity {
    pub requested: Decimal,
    pub adjusted: Decimal,
    /// Adjusted value formatted with exactly `quantity_precision`
    /// fractional digits, ready for the order request.
    pub formatted: String,
}

impl NormalizedQuantity {
    /// True when the step size discarded part of the requested quantity.
    pub fn was_truncated(&self) -> bool {
        self.adjusted != self.requested
    }
}

/// Aggregated futures account balance.
#[derive(Debug, Clone, Serialize)]
pub struct AccountBalance {
    pub total_margin_balance: Decimal,
    pub available_balance: Decimal,
    pub total_unrealized_pnl: Decimal,
    /// Assets with a non-zero wallet balance
    pub assets: Vec<AssetBalance>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetBalance {
    pub asset: String,
    pub wallet_balance: Decimal,
}
