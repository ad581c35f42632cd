// src/trading/rules.rs
use crate::domain::errors::{ExchangeError, ExchangeResult};
use crate::domain::models::{NormalizedQuantity, TradingRules};
use crate::exchange::client::FuturesApi;
use crate::exchange::types::parse_decimal;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const LOT_SIZE_FILTER: &str = "LOT_SIZE";

/// Lazily populated cache of per-symbol trading rules.
///
/// A cache miss costs one bulk `exchange_info` round-trip; hits are served
/// from memory for the process lifetime. There is no expiry: exchange rules
/// rarely change intra-session, and `refresh`/`invalidate` cover the cases
/// where staleness matters. The map is mutex-guarded because the dashboard
/// serves concurrent requests over one shared session.
pub struct RulesCache {
    api: Arc<dyn FuturesApi>,
    rules: Mutex<HashMap<String, TradingRules>>,
}

impl RulesCache {
    pub fn new(api: Arc<dyn FuturesApi>) -> Self {
        Self {
            api,
            rules: Mutex::new(HashMap::new()),
        }
    }

    /// Get the trading rules for a symbol, fetching them on first use.
    pub async fn get(&self, symbol: &str) -> ExchangeResult<TradingRules> {
        let key = symbol.to_uppercase();

        if let Some(rules) = self.rules.lock().unwrap().get(&key) {
            return Ok(rules.clone());
        }

        self.fetch(&key).await
    }

    /// Force a re-fetch of one symbol's rules, replacing the cached entry.
    pub async fn refresh(&self, symbol: &str) -> ExchangeResult<TradingRules> {
        self.fetch(&symbol.to_uppercase()).await
    }

    /// Drop one symbol's cached rules.
    pub fn invalidate(&self, symbol: &str) {
        self.rules.lock().unwrap().remove(&symbol.to_uppercase());
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.rules.lock().unwrap().clear();
    }

    async fn fetch(&self, key: &str) -> ExchangeResult<TradingRules> {
        let info = self.api.exchange_info().await?;

        let symbol = info
            .symbols
            .iter()
            .find(|s| s.symbol == key)
            .ok_or_else(|| ExchangeError::SymbolNotFound(key.to_string()))?;

        let lot_size = symbol
            .filters
            .iter()
            .find(|f| f.filter_type == LOT_SIZE_FILTER)
            .ok_or_else(|| {
                ExchangeError::Parse(format!("Missing {} filter for {}", LOT_SIZE_FILTER, key))
            })?;

        let min_quantity = lot_size
            .min_qty
            .as_deref()
            .ok_or_else(|| ExchangeError::Parse(format!("Missing minQty for {}", key)))
            .and_then(|v| parse_decimal(v, "minQty"))?;

        let step_size = lot_size
            .step_size
            .as_deref()
            .ok_or_else(|| ExchangeError::Parse(format!("Missing stepSize for {}", key)))
            .and_then(|v| parse_decimal(v, "stepSize"))?;

        if step_size <= Decimal::ZERO {
            return Err(ExchangeError::Parse(format!(
                "Non-positive stepSize {} for {}",
                step_size, key
            )));
        }

        let rules = TradingRules {
            price_precision: symbol.price_precision,
            quantity_precision: symbol.quantity_precision,
            min_quantity,
            step_size,
        };

        self.rules
            .lock()
            .unwrap()
            .insert(key.to_string(), rules.clone());

        log::info!(
            "Cached trading rules for {}: step {}, min {}",
            key,
            rules.step_size,
            rules.min_quantity
        );

        Ok(rules)
    }
}

/// Align a raw quantity to the symbol's trading rules.
///
/// Quantities under the exchange minimum are rejected. Anything else is
/// truncated down to the nearest step-size multiple: a request for 0.0035
/// with step 0.001 yields 0.003, not an error. The returned value carries
/// both the requested and the adjusted quantity so the caller can inspect
/// the truncation before submitting.
pub fn normalize_quantity(
    rules: &TradingRules,
    quantity: Decimal,
) -> ExchangeResult<NormalizedQuantity> {
    if quantity < rules.min_quantity {
        return Err(ExchangeError::BelowMinimum {
            requested: quantity,
            minimum: rules.min_quantity,
        });
    }

    let adjusted = (quantity / rules.step_size).trunc() * rules.step_size;
    let formatted = format!("{:.*}", rules.quantity_precision as usize, adjusted);

    Ok(NormalizedQuantity {
        requested: quantity,
        adjusted,
        formatted,
    })
}

/// Align a limit price to the symbol's price precision, truncating toward
/// zero, and format it with exactly that many fractional digits.
pub fn normalize_price(rules: &TradingRules, price: Decimal) -> String {
    let truncated =
        price.round_dp_with_strategy(rules.price_precision, RoundingStrategy::ToZero);
    format!("{:.*}", rules.price_precision as usize, truncated)
}
