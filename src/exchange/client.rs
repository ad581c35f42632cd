// src/exchange/client.rs
use crate::domain::errors::ExchangeResult;
use crate::exchange::types::{
    AccountSnapshot, CancelAck, ExchangeInfo, NewOrderRequest, RawOrder, TickerPrice,
};
use async_trait::async_trait;

/// Raw futures REST surface, one method per request/response pair.
///
/// The exchange is an opaque collaborator behind this trait: the trading
/// layer never issues HTTP itself, which also lets tests substitute a stub
/// exchange. All calls are single blocking round-trips with no retries.
#[async_trait]
pub trait FuturesApi: Send + Sync {
    /// Connectivity check
    async fn ping(&self) -> ExchangeResult<()>;

    /// Full account snapshot
    async fn account(&self) -> ExchangeResult<AccountSnapshot>;

    /// Bulk instrument metadata for every listed symbol
    async fn exchange_info(&self) -> ExchangeResult<ExchangeInfo>;

    /// Latest price for one symbol
    async fn symbol_ticker(&self, symbol: &str) -> ExchangeResult<TickerPrice>;

    /// Create a new order
    async fn create_order(&self, order: &NewOrderRequest) -> ExchangeResult<RawOrder>;

    /// List open orders, optionally restricted to one symbol
    async fn open_orders(&self, symbol: Option<&str>) -> ExchangeResult<Vec<RawOrder>>;

    /// Cancel a specific order
    async fn cancel_order(&self, symbol: &str, order_id: i64) -> ExchangeResult<CancelAck>;
}
