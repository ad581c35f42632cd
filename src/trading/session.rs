// src/trading/session.rs
use crate::domain::errors::{ExchangeError, ExchangeResult};
use crate::domain::models::{
    AccountBalance, AssetBalance, NormalizedQuantity, OrderKind, OrderRecord, OrderRequest,
    OrderSide,
};
use crate::exchange::client::FuturesApi;
use crate::exchange::types::{parse_decimal, CancelAck, NewOrderRequest, RawOrder};
use crate::trading::rules::{self, RulesCache};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Connected trading session, the single entry point for both front ends.
///
/// A `Session` value only exists after the connectivity gate in
/// [`Session::connect`] has passed; there is no half-connected state to
/// check per call. Every operation is a single request (or a bounded
/// sequence that aborts on the first failure) and errors propagate to the
/// caller verbatim — no retries, no recovery.
pub struct Session {
    api: Arc<dyn FuturesApi>,
    rules: RulesCache,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    /// Establish a session: ping the exchange, then fetch the account once.
    ///
    /// Either failure maps to [`ExchangeError::Connection`] and no session
    /// is produced. The caller keeps its `Arc<dyn FuturesApi>` and may call
    /// `connect` again without rebuilding the HTTP client.
    pub async fn connect(api: Arc<dyn FuturesApi>) -> ExchangeResult<Session> {
        api.ping()
            .await
            .map_err(|e| ExchangeError::Connection(format!("Ping failed: {}", e)))?;

        api.account()
            .await
            .map_err(|e| ExchangeError::Connection(format!("Account check failed: {}", e)))?;

        log::info!("Exchange connection verified");

        Ok(Session {
            rules: RulesCache::new(api.clone()),
            api,
        })
    }

    /// Trading-rules cache, exposed for its refresh/eviction hooks.
    pub fn rules(&self) -> &RulesCache {
        &self.rules
    }

    /// Aggregate the account snapshot into margin/available/PnL totals plus
    /// the non-zero asset balances.
    pub async fn balance(&self) -> ExchangeResult<AccountBalance> {
        let snapshot = self.api.account().await?;

        let mut assets = Vec::new();
        for asset in &snapshot.assets {
            let wallet_balance = parse_decimal(&asset.wallet_balance, "walletBalance")?;
            if wallet_balance > Decimal::ZERO {
                assets.push(AssetBalance {
                    asset: asset.asset.clone(),
                    wallet_balance,
                });
            }
        }

        Ok(AccountBalance {
            total_margin_balance: parse_decimal(
                &snapshot.total_margin_balance,
                "totalMarginBalance",
            )?,
            available_balance: parse_decimal(&snapshot.available_balance, "availableBalance")?,
            total_unrealized_pnl: parse_decimal(
                &snapshot.total_unrealized_profit,
                "totalUnrealizedProfit",
            )?,
            assets,
        })
    }

    /// Latest traded price for a symbol.
    pub async fn current_price(&self, symbol: &str) -> ExchangeResult<Decimal> {
        let ticker = self.api.symbol_ticker(&symbol.to_uppercase()).await?;
        parse_decimal(&ticker.price, "price")
    }

    /// Preview how a raw quantity aligns to the symbol's rules without
    /// submitting anything.
    pub async fn normalize_quantity(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> ExchangeResult<NormalizedQuantity> {
        let rules = self.rules.get(symbol).await?;
        rules::normalize_quantity(&rules, quantity)
    }

    /// Place a market order for the normalized quantity.
    pub async fn place_market(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
    ) -> ExchangeResult<OrderRecord> {
        let symbol = symbol.to_uppercase();
        let rules = self.rules.get(&symbol).await?;
        let normalized = rules::normalize_quantity(&rules, quantity)?;
        Self::warn_on_truncation(&symbol, &normalized);

        let request = NewOrderRequest::market(&symbol, side, normalized.formatted);
        let raw = self.api.create_order(&request).await?;
        map_order(&raw)
    }

    /// Place a good-until-cancelled limit order. The quantity is normalized
    /// against the step size and the price against the symbol's price
    /// precision.
    pub async fn place_limit(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> ExchangeResult<OrderRecord> {
        let symbol = symbol.to_uppercase();
        let rules = self.rules.get(&symbol).await?;
        let normalized = rules::normalize_quantity(&rules, quantity)?;
        Self::warn_on_truncation(&symbol, &normalized);
        let price = rules::normalize_price(&rules, price);

        let request = NewOrderRequest::limit(&symbol, side, normalized.formatted, price);
        let raw = self.api.create_order(&request).await?;
        map_order(&raw)
    }

    /// Dispatch an [`OrderRequest`] to the matching placement operation.
    pub async fn place(&self, request: &OrderRequest) -> ExchangeResult<OrderRecord> {
        match request.kind {
            OrderKind::Market => {
                self.place_market(&request.symbol, request.side, request.quantity)
                    .await
            }
            OrderKind::Limit(price) => {
                self.place_limit(&request.symbol, request.side, request.quantity, price)
                    .await
            }
        }
    }

    /// List open orders, for one symbol or across the whole account.
    pub async fn open_orders(&self, symbol: Option<&str>) -> ExchangeResult<Vec<OrderRecord>> {
        let symbol = symbol.map(str::to_uppercase);
        let raw = self.api.open_orders(symbol.as_deref()).await?;
        raw.iter().map(map_order).collect()
    }

    /// Cancel one order. An already filled, cancelled or unknown order id
    /// surfaces as the exchange's rejection; no retry is attempted.
    pub async fn cancel(&self, symbol: &str, order_id: i64) -> ExchangeResult<CancelAck> {
        self.api
            .cancel_order(&symbol.to_uppercase(), order_id)
            .await
    }

    fn warn_on_truncation(symbol: &str, normalized: &NormalizedQuantity) {
        if normalized.was_truncated() {
            log::warn!(
                "{}: requested quantity {} truncated to {} by the step size",
                symbol,
                normalized.requested,
                normalized.formatted
            );
        }
    }
}

/// Map a raw exchange order into the canonical record. Pure; no network.
///
/// Market orders carry no price field and map to price zero.
pub fn map_order(order: &RawOrder) -> ExchangeResult<OrderRecord> {
    let quantity = parse_decimal(&order.orig_qty, "origQty")?;

    let price = match order.price.as_deref() {
        Some(raw) if !raw.is_empty() => parse_decimal(raw, "price")?,
        _ => Decimal::ZERO,
    };

    Ok(OrderRecord {
        order_id: order.order_id,
        symbol: order.symbol.clone(),
        side: order.side.clone(),
        kind: order.kind.clone(),
        quantity,
        price,
        status: order.status.clone(),
    })
}
