// src/exchange/binance.rs
use crate::domain::errors::{ExchangeError, ExchangeResult};
use crate::exchange::client::FuturesApi;
use crate::exchange::types::{
    AccountSnapshot, CancelAck, ExchangeInfo, NewOrderRequest, RawOrder, TickerPrice,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// USDT-M futures testnet. No real money involved.
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Binance USDT-M futures REST client.
///
/// Thin request/response plumbing only: the API key travels in the
/// `X-MBX-APIKEY` header, API-level rejections are decoded from the
/// `{code, msg}` error body, and transport failures surface as-is.
/// No retries, no rate limiting, no idempotency keys.
pub struct BinanceFutures {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    code: i64,
    msg: String,
}

impl BinanceFutures {
    /// Create a client against the futures testnet
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, TESTNET_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Request timestamp, required on every account-scoped endpoint.
    fn timestamp() -> (&'static str, String) {
        ("timestamp", chrono::Utc::now().timestamp_millis().to_string())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ExchangeResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await?;

        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        order: &NewOrderRequest,
    ) -> ExchangeResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .query(order)
            .query(&[Self::timestamp()])
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await?;

        Self::handle_response(resp).await
    }

    async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ExchangeResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .delete(&url)
            .query(query)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await?;

        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> ExchangeResult<T> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&text) {
                return Err(ExchangeError::Rejected {
                    code: body.code,
                    message: body.msg,
                });
            }
            return Err(ExchangeError::Parse(format!("HTTP {}: {}", status, text)));
        }

        serde_json::from_str(&text)
            .map_err(|e| ExchangeError::Parse(format!("Failed to decode exchange response: {}", e)))
    }
}

#[async_trait]
impl FuturesApi for BinanceFutures {
    async fn ping(&self) -> ExchangeResult<()> {
        let _: serde_json::Value = self.get("/fapi/v1/ping", &[]).await?;
        Ok(())
    }

    async fn account(&self) -> ExchangeResult<AccountSnapshot> {
        self.get("/fapi/v2/account", &[Self::timestamp()]).await
    }

    async fn exchange_info(&self) -> ExchangeResult<ExchangeInfo> {
        self.get("/fapi/v1/exchangeInfo", &[]).await
    }

    async fn symbol_ticker(&self, symbol: &str) -> ExchangeResult<TickerPrice> {
        self.get("/fapi/v1/ticker/price", &[("symbol", symbol.to_string())])
            .await
    }

    async fn create_order(&self, order: &NewOrderRequest) -> ExchangeResult<RawOrder> {
        self.post("/fapi/v1/order", order).await
    }

    async fn open_orders(&self, symbol: Option<&str>) -> ExchangeResult<Vec<RawOrder>> {
        let mut query = vec![Self::timestamp()];
        if let Some(symbol) = symbol {
            query.push(("symbol", symbol.to_string()));
        }
        self.get("/fapi/v1/openOrders", &query).await
    }

    async fn cancel_order(&self, symbol: &str, order_id: i64) -> ExchangeResult<CancelAck> {
        self.delete(
            "/fapi/v1/order",
            &[
                ("symbol", symbol.to_string()),
                ("orderId", order_id.to_string()),
                Self::timestamp(),
            ],
        )
        .await
    }
}
