// src/exchange/mod.rs
pub mod binance;
pub mod client;
pub mod types;

// Re-export main interfaces for easy access
pub use binance::{BinanceFutures, TESTNET_BASE_URL};
pub use client::FuturesApi;
pub use types::*;
