//! REST API client for Kraken cryptocurrency exchange
//!
//! This crate provides a typed REST API client for Kraken's spot API,
//! covering market data, account management, order execution and funding.
//!
//! # Features
//!
//! - **Market Data**: Server time, assets, pairs, ticker, orderbook, OHLC, trades, spreads
//! - **Account**: Balances, orders, trade history, positions, ledgers, fee volume
//! - **Trading**: Place and cancel orders
//! - **Funding**: Deposit/withdraw operations
//!
//! # Architecture
//!
//! Every operation is a [`KrakenMethod`] with a static [`MethodDescriptor`].
//! The [`Dispatcher`] builds the request, signs it when the method is
//! private, sends it over an [`HttpTransport`] and decodes Kraken's
//! `{error, result}` envelope. Operations whose result carries a `last`
//! cursor (OHLC, Trades, Spread) decode into [`WithCursor`].
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA512 as specified by Kraken's API documentation, using a nonce
//! that strictly increases for the lifetime of the client.
//!
//! # Example
//!
//! ```no_run
//! use kraken_rest::{KrakenRestClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = KrakenRestClient::new()?;
//!     let ticker = client.get_ticker("XBTUSD").await?;
//!     println!("BTC/USD: {:?}", ticker.last_price());
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = KrakenRestClient::with_credentials(creds)?;
//!     let balance = auth_client.get_balance().await?;
//!     println!("Balances: {:?}", balance.non_zero());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rate Limiting
//!
//! The client never throttles or retries. Rate limit rejections surface as
//! [`RestError::Api`]; check [`RestError::is_rate_limited`].

pub mod client;
pub mod dispatcher;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod method;
pub mod params;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, KrakenRestClient};
pub use dispatcher::Dispatcher;
pub use envelope::{decode, decode_with_cursor, ApiResponse, WithCursor};
pub use error::{ApiErrors, ErrorKind, RestError, RestResult};
pub use kraken_auth::Credentials;
pub use method::{descriptor_for, KrakenMethod, MethodDescriptor, Visibility};
pub use params::Params;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    AssetInfo, AssetPairInfo, BookLevel, OhlcCandle, OhlcData, OrderbookData, RecentSpreads,
    RecentTrades, ServerTime, SpreadData, SystemStatus, TickerInfo, TradeData,
    // Account
    BalanceInfo, ClosedOrders, ClosedOrdersQuery, HistoryQuery, LedgerEntry, Ledgers, OpenOrders,
    OrderInfo, OrderStatus, PositionInfo, TradeBalance, TradeHistoryEntry, TradesHistory,
    TradeVolume, WebSocketToken,
    // Trading
    CancelOrderResult, OrderRequest, OrderResponse,
    // Funding
    DepositAddress, DepositMethod, FundingStatus, WithdrawInfo, WithdrawResult,
};
pub use kraken_types::{
    CloseTime, Interval, OrderFlag, OrderSide, OrderType, SystemState, TimeInForce,
};
