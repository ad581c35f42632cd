// src/config.rs
use crate::domain::errors::{AppError, AppResult};
use crate::exchange::binance::TESTNET_BASE_URL;
use dotenv::dotenv;
use std::env;
use std::fs::OpenOptions;

/// Trading bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Exchange API credentials and endpoint
    pub exchange: ExchangeConfig,

    /// Dashboard server configuration
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Exchange API configuration
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// API key; may be empty, the CLI then prompts for it
    pub api_key: String,

    /// API secret, collected alongside the key. Request signing is out of
    /// scope for this client, so only the key ever reaches the wire.
    pub api_secret: String,

    /// Futures REST base URL (testnet by default)
    pub base_url: String,
}

impl ExchangeConfig {
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

/// Dashboard server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,

    /// Log to file instead of stderr
    pub to_file: bool,

    /// Log file path
    pub file_path: String,
}

impl Config {
    /// Load configuration from environment variables (and .env if present)
    pub fn from_env() -> AppResult<Self> {
        dotenv().ok();

        let exchange = ExchangeConfig {
            api_key: env::var("BINANCE_TESTNET_API_KEY").unwrap_or_default(),
            api_secret: env::var("BINANCE_TESTNET_API_SECRET").unwrap_or_default(),
            base_url: env::var("FUTURES_BASE_URL")
                .unwrap_or_else(|_| TESTNET_BASE_URL.to_string()),
        };

        let server = ServerConfig {
            host: env::var("DASHBOARD_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("DASHBOARD_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| AppError::Config("DASHBOARD_PORT must be a port number".to_string()))?,
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            to_file: env::var("LOG_TO_FILE")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            file_path: env::var("LOG_FILE_PATH").unwrap_or_else(|_| "trading_bot.log".to_string()),
        };

        Ok(Config {
            exchange,
            server,
            logging,
        })
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> AppResult<()> {
        let mut builder = env_logger::Builder::new();

        let log_level = match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        };

        builder.filter_level(log_level);

        // The activity log is append-only; restarts keep prior sessions.
        if self.logging.to_file {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.logging.file_path)
                .map_err(|e| AppError::Config(format!("Failed to open log file: {}", e)))?;

            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        builder.init();

        Ok(())
    }
}
