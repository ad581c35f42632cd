// src/domain/errors.rs
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Exchange error: {0}")]
    Exchange(#[from] ExchangeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Ping or account check failed while establishing the session.
    /// Fatal to the session; the caller must connect again.
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Quantity {requested} is below the minimum {minimum}")]
    BelowMinimum { requested: Decimal, minimum: Decimal },

    /// The exchange answered with an API-level error, e.g. invalid
    /// parameters, insufficient margin or an unknown order id on cancel.
    #[error("Exchange rejected the request: {message} (code {code})")]
    Rejected { code: i64, message: String },

    /// Network-level failure, no usable response received.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type ExchangeResult<T> = Result<T, ExchangeError>;
