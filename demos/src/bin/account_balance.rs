//! Demo 3: Account Balance
//!
//! Showcases: Signed private calls, credentials from the environment
//!
//! Run: KRAKEN_API_KEY=... KRAKEN_PRIVATE_KEY=... cargo run --bin account_balance

use colored::*;
use kraken_rest::{KrakenRestClient, RestError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT BALANCE".cyan().bold());
    println!("{}", "  Kraken REST Demo - Private Endpoints".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = KrakenRestClient::from_env()?;
    if !client.has_credentials() {
        println!(
            "{} Set KRAKEN_API_KEY and KRAKEN_PRIVATE_KEY to query the account",
            "✗".red()
        );
        return Ok(());
    }

    let balance = match client.get_balance().await {
        Ok(balance) => balance,
        Err(RestError::Api(errors)) if errors.is_auth_failure() => {
            println!("{} Kraken rejected the credentials: {}", "✗".red(), errors);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut assets: Vec<_> = balance.non_zero().into_iter().collect();
    assets.sort_by(|a, b| a.0.cmp(&b.0));

    println!("  {:<10} {:>24}", "ASSET".white().bold(), "BALANCE".white().bold());
    println!("  {}", "─".repeat(36));
    for (asset, amount) in &assets {
        println!("  {:<10} {:>24}", asset, amount);
    }
    if assets.is_empty() {
        println!("  {}", "(no funds)".dimmed());
    }
    println!();

    let account = client.account()?;
    let trade_balance = account.get_trade_balance(Some("ZUSD")).await?;
    println!("  {} {}", "Equivalent balance (USD):".white(), trade_balance.eb);
    println!("  {} {}", "Free margin (USD):".white(), trade_balance.mf);

    let orders = account.get_open_orders(false, None).await?;
    println!("  {} {}", "Open orders:".white(), orders.open.len());
    println!(
        "  {} {}",
        "Last nonce:".dimmed(),
        client.dispatcher().last_nonce().unwrap_or_default()
    );

    Ok(())
}
