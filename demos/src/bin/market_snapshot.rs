//! Demo 2: Market Snapshot
//!
//! Showcases: Ticker, orderbook depth chart, OHLC paging with `last`
//!
//! Run: cargo run --bin market_snapshot -- XBTUSD

use colored::*;
use kraken_rest::{BookLevel, Interval, KrakenRestClient};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

const LEVELS_TO_SHOW: usize = 10;
const HALF_WIDTH: usize = 25;

fn bar(volume: Decimal, max_volume: Decimal) -> usize {
    if max_volume.is_zero() {
        return 0;
    }
    ((volume / max_volume) * Decimal::from(HALF_WIDTH))
        .to_usize()
        .unwrap_or(0)
        .min(HALF_WIDTH)
}

fn draw_depth_chart(bids: &[BookLevel], asks: &[BookLevel]) {
    let max_volume = bids
        .iter()
        .chain(asks)
        .take(LEVELS_TO_SHOW * 2)
        .map(|l| l.volume)
        .max()
        .unwrap_or(dec!(1));

    for level in asks.iter().take(LEVELS_TO_SHOW).rev() {
        let len = bar(level.volume, max_volume);
        println!(
            "  {:>12.4} │{}{}│ {:<12}",
            level.volume,
            " ".repeat(HALF_WIDTH - len),
            "█".repeat(len).red(),
            level.price
        );
    }

    if let (Some(ask), Some(bid)) = (asks.first(), bids.first()) {
        println!(
            "  {:>12} ├{}┤ {}",
            "",
            "─".repeat(HALF_WIDTH * 2),
            format!("SPREAD: {}", ask.price - bid.price).yellow()
        );
    }

    for level in bids.iter().take(LEVELS_TO_SHOW) {
        let len = bar(level.volume, max_volume);
        println!(
            "  {:>12.4} │{}{}│ {:<12}",
            level.volume,
            "█".repeat(len).green(),
            " ".repeat(HALF_WIDTH - len),
            level.price
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pair = std::env::args().nth(1).unwrap_or_else(|| "XBTUSD".to_string());

    println!("{}", "═".repeat(70).cyan());
    println!("{}", format!("  {} MARKET SNAPSHOT", pair).cyan().bold());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let client = KrakenRestClient::new()?;
    let market = client.market();

    let ticker = market.get_ticker(&pair).await?;
    println!(
        "  {} {}  {} {}  {} {}",
        "Bid:".green(),
        ticker.bid_price().unwrap_or_default(),
        "Ask:".red(),
        ticker.ask_price().unwrap_or_default(),
        "Last:".white(),
        ticker.last_price().unwrap_or_default()
    );
    if let Some(bps) = ticker.spread_bps() {
        println!("  {} {:.2} bps", "Spread:".yellow(), bps);
    }
    println!();

    let books = market.get_orderbook(&pair, Some(LEVELS_TO_SHOW as u32)).await?;
    for (name, book) in &books {
        println!("  {}", name.white().bold());
        draw_depth_chart(&book.bids, &book.asks);
    }
    println!();

    // Two pages of hourly candles: the second picks up from the first cursor
    let first = market.get_ohlc(&pair, Interval::OneHour, None).await?;
    let candles: usize = first.data.values().map(Vec::len).sum();
    println!(
        "  {} {} hourly candles, cursor {}",
        "OHLC:".cyan(),
        candles,
        first.last
    );
    let next = market
        .get_ohlc(&pair, Interval::OneHour, Some(first.last))
        .await?;
    for (name, rows) in &next.data {
        if let Some(candle) = rows.last() {
            println!(
                "  {} {}  O {}  H {}  L {}  C {}  V {}",
                name.white(),
                chrono::DateTime::from_timestamp(candle.time, 0)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
                candle.open,
                candle.high,
                candle.low,
                candle.close,
                candle.volume
            );
        }
    }

    Ok(())
}
