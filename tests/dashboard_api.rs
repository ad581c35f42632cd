//! Integration tests for the dashboard HTTP API.
//!
//! The router is exercised in-process against a stub exchange, one
//! `oneshot` request per case.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use futures_bot::api::create_router;
use futures_bot::domain::errors::{ExchangeError, ExchangeResult};
use futures_bot::exchange::client::FuturesApi;
use futures_bot::exchange::types::{
    AccountSnapshot, CancelAck, ExchangeInfo, NewOrderRequest, RawAssetBalance, RawOrder,
    SymbolFilter, SymbolInfo, TickerPrice,
};
use futures_bot::trading::session::Session;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Stub exchange backing the router under test. Echoes new orders back
/// and rejects cancels for unknown order ids.
#[derive(Default)]
struct StubApi;

#[async_trait]
impl FuturesApi for StubApi {
    async fn ping(&self) -> ExchangeResult<()> {
        Ok(())
    }

    async fn account(&self) -> ExchangeResult<AccountSnapshot> {
        Ok(AccountSnapshot {
            total_margin_balance: "15000.00".to_string(),
            available_balance: "12500.50".to_string(),
            total_unrealized_profit: "-12.25".to_string(),
            assets: vec![RawAssetBalance {
                asset: "USDT".to_string(),
                wallet_balance: "15000.00".to_string(),
            }],
        })
    }

    async fn exchange_info(&self) -> ExchangeResult<ExchangeInfo> {
        Ok(ExchangeInfo {
            symbols: vec![SymbolInfo {
                symbol: "BTCUSDT".to_string(),
                price_precision: 2,
                quantity_precision: 3,
                filters: vec![SymbolFilter {
                    filter_type: "LOT_SIZE".to_string(),
                    min_qty: Some("0.001".to_string()),
                    step_size: Some("0.001".to_string()),
                }],
            }],
        })
    }

    async fn symbol_ticker(&self, symbol: &str) -> ExchangeResult<TickerPrice> {
        Ok(TickerPrice {
            symbol: symbol.to_string(),
            price: "43250.10".to_string(),
        })
    }

    async fn create_order(&self, order: &NewOrderRequest) -> ExchangeResult<RawOrder> {
        Ok(RawOrder {
            order_id: 5,
            symbol: order.symbol.clone(),
            side: order.side.clone(),
            kind: order.kind.clone(),
            orig_qty: order.quantity.clone(),
            price: order.price.clone(),
            status: "NEW".to_string(),
        })
    }

    async fn open_orders(&self, _symbol: Option<&str>) -> ExchangeResult<Vec<RawOrder>> {
        Ok(vec![RawOrder {
            order_id: 7,
            symbol: "BTCUSDT".to_string(),
            side: "SELL".to_string(),
            kind: "LIMIT".to_string(),
            orig_qty: "0.020".to_string(),
            price: Some("45000.00".to_string()),
            status: "NEW".to_string(),
        }])
    }

    async fn cancel_order(&self, symbol: &str, order_id: i64) -> ExchangeResult<CancelAck> {
        if order_id != 7 {
            return Err(ExchangeError::Rejected {
                code: -2011,
                message: "Unknown order sent.".to_string(),
            });
        }
        Ok(CancelAck {
            order_id,
            symbol: symbol.to_string(),
            status: "CANCELED".to_string(),
        })
    }
}

async fn test_app() -> Router {
    let session = Session::connect(Arc::new(StubApi)).await.unwrap();
    create_router(Arc::new(session))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn index_serves_dashboard_page() {
    let app = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("Futures Trading Bot"));
}

#[tokio::test]
async fn balance_returns_aggregated_account() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/balance")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total_margin_balance"], "15000.00");
    assert_eq!(body["available_balance"], "12500.50");
    assert_eq!(body["assets"][0]["asset"], "USDT");
}

#[tokio::test]
async fn price_uppercases_symbol() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/price?symbol=btcusdt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["symbol"], "BTCUSDT");
    assert_eq!(body["price"], "43250.10");
}

#[tokio::test]
async fn open_orders_are_listed() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/orders")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body[0]["order_id"], 7);
    assert_eq!(body[0]["kind"], "LIMIT");
    assert_eq!(body[0]["price"], "45000.00");
}

#[tokio::test]
async fn market_order_is_placed_and_echoed() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/orders",
            json!({
                "symbol": "btcusdt",
                "side": "BUY",
                "kind": "MARKET",
                "quantity": "0.01"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["order_id"], 5);
    assert_eq!(body["symbol"], "BTCUSDT");
    assert_eq!(body["side"], "BUY");
    assert_eq!(body["status"], "NEW");
}

#[tokio::test]
async fn limit_order_without_price_is_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/orders",
            json!({
                "symbol": "BTCUSDT",
                "side": "SELL",
                "kind": "LIMIT",
                "quantity": "0.01"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("positive price"));
}

#[tokio::test]
async fn below_minimum_quantity_maps_to_422() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/orders",
            json!({
                "symbol": "BTCUSDT",
                "side": "BUY",
                "kind": "MARKET",
                "quantity": "0.0005"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_symbol_maps_to_404() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/orders",
            json!({
                "symbol": "DOGEUSDT",
                "side": "BUY",
                "kind": "MARKET",
                "quantity": "1"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cancel_round_trips_the_acknowledgement() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/orders/cancel",
            json!({ "symbol": "BTCUSDT", "order_id": 7 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["orderId"], 7);
    assert_eq!(body["status"], "CANCELED");
}

#[tokio::test]
async fn rejected_cancel_surfaces_the_exchange_error() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/orders/cancel",
            json!({ "symbol": "BTCUSDT", "order_id": 999 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("-2011"));
}
