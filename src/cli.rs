// src/cli.rs
use crate::config::Config;
use crate::domain::errors::AppResult;
use crate::domain::models::{OrderKind, OrderRecord, OrderSide};
use crate::exchange::binance::BinanceFutures;
use crate::exchange::client::FuturesApi;
use crate::trading::session::Session;
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;

/// Interactive menu front end. Every session operation can fail; failures
/// are printed and the loop continues.
pub async fn run(config: &Config) -> AppResult<()> {
    print_header(&config.exchange.base_url);

    let (api_key, _api_secret) = credentials(config)?;
    if api_key.is_empty() {
        println!("[X] An API key is required.");
        return Ok(());
    }

    let api: Arc<dyn FuturesApi> =
        Arc::new(BinanceFutures::with_base_url(&api_key, &config.exchange.base_url));

    println!("\nConnecting to {} ...", config.exchange.base_url);
    let session = match Session::connect(api).await {
        Ok(session) => session,
        Err(e) => {
            log::error!("Session setup failed: {}", e);
            println!("[X] Failed to connect: {}", e);
            return Ok(());
        }
    };
    println!("[+] Connected.");

    show_balance(&session).await;

    loop {
        print_menu();
        match prompt("Enter your choice: ")?.as_str() {
            "1" => show_balance(&session).await,
            "2" => show_price(&session).await?,
            "3" => place_order(&session, OrderKind::Market).await?,
            "4" => place_limit_order(&session).await?,
            "5" => show_open_orders(&session).await,
            "6" => cancel_order(&session).await?,
            "7" => {
                println!("Goodbye!");
                return Ok(());
            }
            _ => println!("[X] Invalid choice."),
        }
    }
}

fn print_header(base_url: &str) {
    println!("{}", "=".repeat(60));
    println!("    BINANCE FUTURES TRADING BOT - TESTNET");
    println!("{}", "=".repeat(60));
    println!("[!] Testnet only, no real money involved");
    println!("[+] Endpoint: {}", base_url);
    println!("{}", "=".repeat(60));
}

fn print_menu() {
    println!("\n{}", "=".repeat(20));
    println!("[MENU]");
    println!("{}", "-".repeat(20));
    println!("1. View Account Balance");
    println!("2. Check Current Price");
    println!("3. Place Market Order");
    println!("4. Place Limit Order");
    println!("5. View Open Orders");
    println!("6. Cancel Order");
    println!("7. Exit");
    println!("{}", "=".repeat(20));
}

/// Credentials come from the environment (or .env); missing values are
/// prompted for interactively.
fn credentials(config: &Config) -> AppResult<(String, String)> {
    if config.exchange.has_credentials() {
        println!("[+] Found credentials in the environment.");
        return Ok((
            config.exchange.api_key.clone(),
            config.exchange.api_secret.clone(),
        ));
    }

    println!("[!] Credentials not found in the environment.");
    let api_key = prompt("Enter your API key: ")?;
    let api_secret = prompt("Enter your API secret: ")?;
    Ok((api_key, api_secret))
}

fn prompt(label: &str) -> AppResult<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_decimal(label: &str) -> AppResult<Option<Decimal>> {
    let raw = prompt(label)?;
    match Decimal::from_str(&raw) {
        Ok(value) if value > Decimal::ZERO => Ok(Some(value)),
        _ => {
            println!("[X] Expected a positive number, got '{}'.", raw);
            Ok(None)
        }
    }
}

async fn show_balance(session: &Session) {
    match session.balance().await {
        Ok(balance) => {
            println!("\n--- ACCOUNT BALANCE ---");
            println!("Total Margin Balance: ${}", balance.total_margin_balance);
            println!("Available Balance:    ${}", balance.available_balance);
            println!("Unrealized PnL:       ${}", balance.total_unrealized_pnl);
            if !balance.assets.is_empty() {
                println!("{:<10} {:>20}", "Asset", "Wallet Balance");
                for asset in &balance.assets {
                    println!("{:<10} {:>20}", asset.asset, asset.wallet_balance);
                }
            }
        }
        Err(e) => println!("[X] Failed to get balance: {}", e),
    }
}

async fn show_price(session: &Session) -> AppResult<()> {
    let symbol = prompt("Enter symbol (e.g., BTCUSDT): ")?;
    if symbol.is_empty() {
        return Ok(());
    }

    match session.current_price(&symbol).await {
        Ok(price) => println!("Current price of {}: ${}", symbol.to_uppercase(), price),
        Err(e) => println!("[X] Failed to get price for {}: {}", symbol, e),
    }
    Ok(())
}

async fn place_order(session: &Session, kind: OrderKind) -> AppResult<()> {
    let symbol = prompt("Enter symbol (e.g., BTCUSDT): ")?;
    let side = match prompt("Enter side (BUY/SELL): ")?.parse::<OrderSide>() {
        Ok(side) => side,
        Err(e) => {
            println!("[X] {}", e);
            return Ok(());
        }
    };
    let Some(quantity) = prompt_decimal("Enter quantity: ")? else {
        return Ok(());
    };

    // Preview the step-size truncation before anything is submitted.
    match session.normalize_quantity(&symbol, quantity).await {
        Ok(normalized) if normalized.was_truncated() => {
            println!(
                "[!] Quantity {} will be truncated to {} to fit the step size.",
                normalized.requested, normalized.formatted
            );
        }
        Ok(_) => {}
        Err(e) => {
            println!("[X] Failed to place order: {}", e);
            return Ok(());
        }
    }

    let result = match kind {
        OrderKind::Market => session.place_market(&symbol, side, quantity).await,
        OrderKind::Limit(price) => session.place_limit(&symbol, side, quantity, price).await,
    };

    match result {
        Ok(record) => {
            println!("\n[+] {} order placed successfully!", record.kind);
            print_order(&record);
        }
        Err(e) => println!("[X] Failed to place order: {}", e),
    }
    Ok(())
}

async fn place_limit_order(session: &Session) -> AppResult<()> {
    let Some(price) = prompt_decimal("Enter limit price: ")? else {
        return Ok(());
    };
    place_order(session, OrderKind::Limit(price)).await
}

async fn show_open_orders(session: &Session) {
    match session.open_orders(None).await {
        Ok(orders) if orders.is_empty() => println!("No open orders found."),
        Ok(orders) => print_order_table(&orders),
        Err(e) => println!("[X] Failed to get open orders: {}", e),
    }
}

async fn cancel_order(session: &Session) -> AppResult<()> {
    let orders = match session.open_orders(None).await {
        Ok(orders) => orders,
        Err(e) => {
            println!("[X] Failed to get open orders: {}", e);
            return Ok(());
        }
    };
    if orders.is_empty() {
        println!("No open orders found.");
        return Ok(());
    }
    print_order_table(&orders);

    let raw = prompt("\nEnter Order ID to cancel: ")?;
    let Ok(order_id) = raw.parse::<i64>() else {
        println!("[X] Expected an order id, got '{}'.", raw);
        return Ok(());
    };

    // The cancel endpoint needs the symbol; take it from the listing.
    let Some(order) = orders.iter().find(|o| o.order_id == order_id) else {
        println!("[X] Order ID not found.");
        return Ok(());
    };

    match session.cancel(&order.symbol, order_id).await {
        Ok(ack) => println!("\n[+] Order {} cancelled ({}).", ack.order_id, ack.status),
        Err(e) => println!("[X] Failed to cancel order: {}", e),
    }
    Ok(())
}

fn print_order(record: &OrderRecord) {
    println!("{}", "-".repeat(20));
    println!("Order Id: {}", record.order_id);
    println!("Symbol:   {}", record.symbol);
    println!("Side:     {}", record.side);
    println!("Type:     {}", record.kind);
    println!("Quantity: {}", record.quantity);
    println!("Price:    {}", record.price);
    println!("Status:   {}", record.status);
    println!("{}", "-".repeat(20));
}

fn print_order_table(orders: &[OrderRecord]) {
    println!(
        "{:<12} {:<10} {:<6} {:<12} {:>12} {:>14} {:<10}",
        "ID", "Symbol", "Side", "Type", "Qty", "Price", "Status"
    );
    for order in orders {
        println!(
            "{:<12} {:<10} {:<6} {:<12} {:>12} {:>14} {:<10}",
            order.order_id,
            order.symbol,
            order.side,
            order.kind,
            order.quantity,
            order.price,
            order.status
        );
    }
}
