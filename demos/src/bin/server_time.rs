//! Demo 1: Server Time and System Status
//!
//! Showcases: Public endpoints, clock drift against the exchange
//!
//! Run: cargo run --bin server_time
//! Logs: RUST_LOG=kraken_rest=debug cargo run --bin server_time

use colored::*;
use kraken_rest::KrakenRestClient;
use kraken_types::SystemState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  SERVER TIME".cyan().bold());
    println!("{}", "  Kraken REST Demo - Public Endpoints".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = KrakenRestClient::new()?;

    let time = client.get_server_time().await?;
    let local = chrono::Utc::now().timestamp();
    println!("  {:<14} {}", "Unix time:".white(), time.unixtime);
    println!("  {:<14} {}", "RFC 1123:".white(), time.rfc1123);

    let drift = local - time.unixtime;
    let drift_text = format!("{:+}s", drift);
    let drift_text = if drift.abs() > 2 {
        drift_text.yellow()
    } else {
        drift_text.green()
    };
    println!("  {:<14} {}", "Local drift:".white(), drift_text);

    let status = client.market().get_system_status().await?;
    let state = match status.status {
        SystemState::Online => status.status.to_string().green(),
        SystemState::Maintenance => status.status.to_string().red(),
        _ => status.status.to_string().yellow(),
    };
    println!("  {:<14} {} ({})", "Status:".white(), state, status.timestamp);

    Ok(())
}
