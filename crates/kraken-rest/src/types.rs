//! Types for Kraken REST API requests and responses
//!
//! Prices, volumes, fees and fractional timestamps are [`Decimal`]. Kraken
//! sends most of them as strings and some as JSON numbers; both decode.

use std::collections::HashMap;
use std::str::FromStr;

use kraken_types::{CloseTime, OrderFlag, OrderSide, OrderType, SystemState, TimeInForce};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::envelope::WithCursor;
use crate::params::Params;

// ============================================================================
// Market Data Types
// ============================================================================

/// Server time
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerTime {
    /// Unix timestamp
    pub unixtime: i64,
    /// RFC 1123 time string
    pub rfc1123: String,
}

/// System status
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    /// Current trading state
    pub status: SystemState,
    /// Timestamp of the status
    pub timestamp: String,
}

/// Asset information
#[derive(Debug, Clone, Deserialize)]
pub struct AssetInfo {
    /// Asset class
    pub aclass: String,
    /// Alternate name
    pub altname: String,
    /// Scaling decimal places for record keeping
    pub decimals: u32,
    /// Scaling decimal places for output display
    pub display_decimals: u32,
    /// Valuation as margin collateral
    pub collateral_value: Option<Decimal>,
    /// Funding and trading status
    pub status: Option<String>,
}

/// One step of a volume-based fee schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "FeeTierRow")]
pub struct FeeTier {
    /// 30-day volume at which this tier starts
    pub volume: Decimal,
    /// Fee in percent
    pub percent: Decimal,
}

#[derive(Deserialize)]
struct FeeTierRow(Decimal, Decimal);

impl From<FeeTierRow> for FeeTier {
    fn from(FeeTierRow(volume, percent): FeeTierRow) -> Self {
        Self { volume, percent }
    }
}

/// Asset pair information
#[derive(Debug, Clone, Deserialize)]
pub struct AssetPairInfo {
    /// Alternate pair name
    pub altname: String,
    /// WebSocket pair name
    pub wsname: Option<String>,
    /// Asset class of base
    pub aclass_base: String,
    /// Base asset
    pub base: String,
    /// Asset class of quote
    pub aclass_quote: String,
    /// Quote asset
    pub quote: String,
    /// Pair decimals
    pub pair_decimals: u32,
    /// Cost decimals
    pub cost_decimals: Option<u32>,
    /// Lot decimals
    pub lot_decimals: u32,
    /// Lot multiplier
    pub lot_multiplier: u32,
    /// Leverage amounts available when buying
    #[serde(default)]
    pub leverage_buy: Vec<u32>,
    /// Leverage amounts available when selling
    #[serde(default)]
    pub leverage_sell: Vec<u32>,
    /// Taker fee schedule
    #[serde(default)]
    pub fees: Vec<FeeTier>,
    /// Maker fee schedule
    #[serde(default)]
    pub fees_maker: Vec<FeeTier>,
    /// Volume discount currency
    pub fee_volume_currency: Option<String>,
    /// Margin call level
    pub margin_call: Option<u32>,
    /// Stop-out/liquidation margin level
    pub margin_stop: Option<u32>,
    /// Minimum order size
    pub ordermin: Option<Decimal>,
    /// Minimum order cost
    pub costmin: Option<Decimal>,
    /// Minimum price increment
    pub tick_size: Option<Decimal>,
    /// Trading status
    pub status: Option<String>,
}

/// Ticker information for a trading pair
#[derive(Debug, Clone, Deserialize)]
pub struct TickerInfo {
    /// Ask [price, whole lot volume, lot volume]
    pub a: Vec<Decimal>,
    /// Bid [price, whole lot volume, lot volume]
    pub b: Vec<Decimal>,
    /// Last trade closed [price, lot volume]
    pub c: Vec<Decimal>,
    /// Volume [today, last 24 hours]
    pub v: Vec<Decimal>,
    /// Volume weighted average price [today, last 24 hours]
    pub p: Vec<Decimal>,
    /// Number of trades [today, last 24 hours]
    pub t: Vec<u64>,
    /// Low [today, last 24 hours]
    pub l: Vec<Decimal>,
    /// High [today, last 24 hours]
    pub h: Vec<Decimal>,
    /// Today's opening price
    pub o: Decimal,
}

impl TickerInfo {
    /// Get the current ask price
    pub fn ask_price(&self) -> Option<Decimal> {
        self.a.first().copied()
    }

    /// Get the current bid price
    pub fn bid_price(&self) -> Option<Decimal> {
        self.b.first().copied()
    }

    /// Get the last trade price
    pub fn last_price(&self) -> Option<Decimal> {
        self.c.first().copied()
    }

    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.ask_price()? + self.bid_price()?) / Decimal::TWO)
    }

    /// Get spread in basis points
    pub fn spread_bps(&self) -> Option<Decimal> {
        let mid = self.mid_price()?;
        if mid.is_zero() {
            return None;
        }
        Some((self.ask_price()? - self.bid_price()?) / mid * Decimal::from(10000))
    }
}

/// Individual OHLC candle
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "OhlcRow")]
pub struct OhlcCandle {
    /// Unix timestamp
    pub time: i64,
    /// Open price
    pub open: Decimal,
    /// High price
    pub high: Decimal,
    /// Low price
    pub low: Decimal,
    /// Close price
    pub close: Decimal,
    /// Volume weighted average price
    pub vwap: Decimal,
    /// Volume
    pub volume: Decimal,
    /// Number of trades
    pub count: u64,
}

#[derive(Deserialize)]
struct OhlcRow(i64, Decimal, Decimal, Decimal, Decimal, Decimal, Decimal, u64);

impl From<OhlcRow> for OhlcCandle {
    fn from(row: OhlcRow) -> Self {
        let OhlcRow(time, open, high, low, close, vwap, volume, count) = row;
        Self {
            time,
            open,
            high,
            low,
            close,
            vwap,
            volume,
            count,
        }
    }
}

/// OHLC candles per pair, with the `since` cursor for the next page
pub type OhlcData = WithCursor<HashMap<String, Vec<OhlcCandle>>>;

/// One price level of an order book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "BookLevelRow")]
pub struct BookLevel {
    /// Price
    pub price: Decimal,
    /// Volume at this price
    pub volume: Decimal,
    /// Last update, Unix seconds
    pub timestamp: i64,
}

#[derive(Deserialize)]
struct BookLevelRow(Decimal, Decimal, i64);

impl From<BookLevelRow> for BookLevel {
    fn from(BookLevelRow(price, volume, timestamp): BookLevelRow) -> Self {
        Self {
            price,
            volume,
            timestamp,
        }
    }
}

/// Orderbook snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct OrderbookData {
    /// Ask levels, best first
    pub asks: Vec<BookLevel>,
    /// Bid levels, best first
    pub bids: Vec<BookLevel>,
}

impl OrderbookData {
    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|level| level.price)
    }

    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|level| level.price)
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// Trade from the public trade feed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Value>")]
pub struct TradeData {
    /// Price
    pub price: Decimal,
    /// Volume
    pub volume: Decimal,
    /// Time (Unix seconds with fraction)
    pub time: Decimal,
    /// Buy/sell indicator
    pub side: OrderSide,
    /// Market/limit indicator
    pub order_type: OrderType,
    /// Miscellaneous
    pub misc: String,
    /// Trade ID, present on newer responses
    pub trade_id: Option<u64>,
}

impl TryFrom<Vec<Value>> for TradeData {
    type Error = String;

    fn try_from(row: Vec<Value>) -> Result<Self, Self::Error> {
        if row.len() < 6 {
            return Err(format!("trade row has {} fields, expected at least 6", row.len()));
        }

        let side = match row[3].as_str() {
            Some("b") => OrderSide::Buy,
            Some("s") => OrderSide::Sell,
            _ => return Err(format!("unknown trade side {}", row[3])),
        };
        let order_type = match row[4].as_str() {
            Some("m") => OrderType::Market,
            Some("l") => OrderType::Limit,
            _ => return Err(format!("unknown trade order type {}", row[4])),
        };

        Ok(Self {
            price: decimal_from_value(&row[0])?,
            volume: decimal_from_value(&row[1])?,
            time: decimal_from_value(&row[2])?,
            side,
            order_type,
            misc: row[5].as_str().unwrap_or_default().to_string(),
            trade_id: row.get(6).and_then(Value::as_u64),
        })
    }
}

/// Recent trades per pair, with the `since` cursor for the next page
pub type RecentTrades = WithCursor<HashMap<String, Vec<TradeData>>>;

/// Best bid/ask snapshot from the spread feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "SpreadRow")]
pub struct SpreadData {
    /// Unix timestamp
    pub time: i64,
    /// Best bid
    pub bid: Decimal,
    /// Best ask
    pub ask: Decimal,
}

#[derive(Deserialize)]
struct SpreadRow(i64, Decimal, Decimal);

impl From<SpreadRow> for SpreadData {
    fn from(SpreadRow(time, bid, ask): SpreadRow) -> Self {
        Self { time, bid, ask }
    }
}

/// Recent spreads per pair, with the `since` cursor for the next page
pub type RecentSpreads = WithCursor<HashMap<String, Vec<SpreadData>>>;

// ============================================================================
// Account Types
// ============================================================================

/// Account balance information, keyed by asset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BalanceInfo(pub HashMap<String, Decimal>);

impl BalanceInfo {
    /// Get balance for a specific asset
    pub fn get(&self, asset: &str) -> Option<Decimal> {
        self.0.get(asset).copied()
    }

    /// Get all non-zero balances
    pub fn non_zero(&self) -> HashMap<String, Decimal> {
        self.0
            .iter()
            .filter(|(_, balance)| !balance.is_zero())
            .map(|(asset, balance)| (asset.clone(), *balance))
            .collect()
    }

    /// Iterate over all balances
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Decimal)> {
        self.0.iter()
    }
}

/// Margin account summary
#[derive(Debug, Clone, Deserialize)]
pub struct TradeBalance {
    /// Equivalent balance (combined balance of all currencies)
    pub eb: Decimal,
    /// Trade balance (combined balance of all equity currencies)
    pub tb: Decimal,
    /// Margin amount of open positions
    #[serde(default)]
    pub m: Decimal,
    /// Unrealized net profit/loss of open positions
    #[serde(default)]
    pub n: Decimal,
    /// Cost basis of open positions
    #[serde(default)]
    pub c: Decimal,
    /// Current floating valuation of open positions
    #[serde(default)]
    pub v: Decimal,
    /// Equity: trade balance + unrealized net profit/loss
    #[serde(default)]
    pub e: Decimal,
    /// Free margin: equity - initial margin
    #[serde(default)]
    pub mf: Decimal,
    /// Margin level, absent without open positions
    pub ml: Option<Decimal>,
}

/// Order lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Pending book entry
    Pending,
    /// Open order
    Open,
    /// Closed order
    Closed,
    /// Order canceled
    Canceled,
    /// Order expired
    Expired,
}

/// Order description
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDescription {
    /// Asset pair
    pub pair: String,
    /// Type (buy/sell)
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Order type
    pub ordertype: OrderType,
    /// Primary price
    pub price: Decimal,
    /// Secondary price
    pub price2: Decimal,
    /// Leverage
    pub leverage: String,
    /// Order description
    pub order: String,
    /// Close order description
    #[serde(default)]
    pub close: String,
}

/// Open or closed order information
#[derive(Debug, Clone, Deserialize)]
pub struct OrderInfo {
    /// Referral order transaction ID that created this order
    pub refid: Option<String>,
    /// User reference ID
    pub userref: Option<i64>,
    /// Order status
    pub status: OrderStatus,
    /// Open timestamp
    pub opentm: Decimal,
    /// Start timestamp
    pub starttm: Decimal,
    /// Expire timestamp
    pub expiretm: Decimal,
    /// Close timestamp, closed orders only
    pub closetm: Option<Decimal>,
    /// Order description
    pub descr: OrderDescription,
    /// Volume
    pub vol: Decimal,
    /// Executed volume
    pub vol_exec: Decimal,
    /// Cost
    pub cost: Decimal,
    /// Fee
    pub fee: Decimal,
    /// Average price
    pub price: Decimal,
    /// Stop price (if applicable)
    pub stopprice: Option<Decimal>,
    /// Limit price (if applicable)
    pub limitprice: Option<Decimal>,
    /// Miscellaneous
    pub misc: String,
    /// Order flags
    pub oflags: String,
    /// Why the order was closed, closed orders only
    pub reason: Option<String>,
    /// Trade IDs, when requested
    pub trades: Option<Vec<String>>,
}

/// Open orders keyed by transaction ID
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrders {
    /// Orders keyed by transaction ID
    pub open: HashMap<String, OrderInfo>,
}

/// A page of closed orders
#[derive(Debug, Clone, Deserialize)]
pub struct ClosedOrders {
    /// Orders keyed by transaction ID
    pub closed: HashMap<String, OrderInfo>,
    /// Total number of matching orders
    pub count: u64,
}

/// Trade history entry
#[derive(Debug, Clone, Deserialize)]
pub struct TradeHistoryEntry {
    /// Order transaction ID
    pub ordertxid: String,
    /// Position transaction ID
    pub postxid: Option<String>,
    /// Pair
    pub pair: String,
    /// Time of trade
    pub time: Decimal,
    /// Type (buy/sell)
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Order type
    pub ordertype: String,
    /// Price
    pub price: Decimal,
    /// Cost
    pub cost: Decimal,
    /// Fee
    pub fee: Decimal,
    /// Volume
    pub vol: Decimal,
    /// Margin
    #[serde(default)]
    pub margin: Decimal,
    /// Miscellaneous
    #[serde(default)]
    pub misc: String,
    /// Trade ID
    pub trade_id: Option<u64>,
    /// Whether this side was the maker
    pub maker: Option<bool>,
}

/// A page of trade history
#[derive(Debug, Clone, Deserialize)]
pub struct TradesHistory {
    /// Trades keyed by transaction ID
    pub trades: HashMap<String, TradeHistoryEntry>,
    /// Total number of matching trades
    pub count: u64,
}

/// Open margin position
#[derive(Debug, Clone, Deserialize)]
pub struct PositionInfo {
    /// Order ID responsible for the position
    pub ordertxid: String,
    /// Position status
    pub posstatus: String,
    /// Pair
    pub pair: String,
    /// Opening time
    pub time: Decimal,
    /// Direction
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Order type used to open
    pub ordertype: String,
    /// Opening cost
    pub cost: Decimal,
    /// Opening fee
    pub fee: Decimal,
    /// Position volume
    pub vol: Decimal,
    /// Closed volume
    pub vol_closed: Decimal,
    /// Initial margin
    pub margin: Decimal,
    /// Current value, with `docalcs`
    pub value: Option<Decimal>,
    /// Unrealized profit/loss, with `docalcs`
    pub net: Option<Decimal>,
    /// Funding cost and term
    pub terms: Option<String>,
    /// Next rollover time
    pub rollovertm: Option<String>,
    /// Miscellaneous
    #[serde(default)]
    pub misc: String,
    /// Order flags
    #[serde(default)]
    pub oflags: String,
}

/// Ledger entry
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerEntry {
    /// Reference ID
    pub refid: String,
    /// Time
    pub time: Decimal,
    /// Entry type (trade, deposit, withdrawal, ...)
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Entry subtype
    #[serde(default)]
    pub subtype: String,
    /// Asset class
    pub aclass: String,
    /// Asset
    pub asset: String,
    /// Amount
    pub amount: Decimal,
    /// Fee
    pub fee: Decimal,
    /// Resulting balance
    pub balance: Decimal,
}

/// A page of ledger entries
#[derive(Debug, Clone, Deserialize)]
pub struct Ledgers {
    /// Entries keyed by ledger ID
    pub ledger: HashMap<String, LedgerEntry>,
    /// Total number of matching entries
    pub count: u64,
}

/// Fee tier applied to one pair
#[derive(Debug, Clone, Deserialize)]
pub struct PairFee {
    /// Current fee in percent
    pub fee: Decimal,
    /// Minimum fee
    pub minfee: Option<Decimal>,
    /// Maximum fee
    pub maxfee: Option<Decimal>,
    /// Next tier's fee
    pub nextfee: Option<Decimal>,
    /// Volume needed for the next tier
    pub nextvolume: Option<Decimal>,
    /// Volume of the current tier
    pub tiervolume: Option<Decimal>,
}

/// 30-day trade volume and fees
#[derive(Debug, Clone, Deserialize)]
pub struct TradeVolume {
    /// Fee volume currency
    pub currency: String,
    /// Current discount volume
    pub volume: Decimal,
    /// Taker fees per requested pair
    pub fees: Option<HashMap<String, PairFee>>,
    /// Maker fees per requested pair
    pub fees_maker: Option<HashMap<String, PairFee>>,
}

/// Token for authenticating WebSocket connections
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketToken {
    /// The token
    pub token: String,
    /// Seconds until the token expires if unused
    pub expires: u64,
}

/// Time range and offset for paged history calls
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct HistoryQuery {
    /// Start timestamp, exclusive
    #[builder(default, setter(strip_option))]
    pub start: Option<i64>,
    /// End timestamp, inclusive
    #[builder(default, setter(strip_option))]
    pub end: Option<i64>,
    /// Result offset for pagination
    #[builder(default, setter(strip_option))]
    pub ofs: Option<u32>,
}

impl HistoryQuery {
    pub(crate) fn apply(&self, params: Params) -> Params {
        params
            .with_opt("start", self.start)
            .with_opt("end", self.end)
            .with_opt("ofs", self.ofs)
    }
}

/// Filters for `ClosedOrders`
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct ClosedOrdersQuery {
    /// Time range and offset
    #[builder(default)]
    pub range: HistoryQuery,
    /// Include trades
    #[builder(default)]
    pub trades: bool,
    /// Restrict to a user reference
    #[builder(default, setter(strip_option))]
    pub userref: Option<i64>,
    /// Which timestamp the range applies to
    #[builder(default, setter(strip_option))]
    pub closetime: Option<CloseTime>,
}

impl ClosedOrdersQuery {
    pub(crate) fn to_params(&self) -> Params {
        self.range
            .apply(Params::new().with_flag("trades", self.trades))
            .with_opt("userref", self.userref)
            .with_opt("closetime", self.closetime.map(|c| c.as_str()))
    }
}

// ============================================================================
// Trading Types
// ============================================================================

/// Request to place an order
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// Trading pair
    pub pair: String,
    /// Order side
    pub side: OrderSide,
    /// Order type
    pub order_type: OrderType,
    /// Order volume
    pub volume: Decimal,
    /// Price (for limit orders)
    pub price: Option<Decimal>,
    /// Secondary price (for stop-loss-limit, take-profit-limit)
    pub price2: Option<Decimal>,
    /// Time in force
    pub time_in_force: Option<TimeInForce>,
    /// Leverage (for margin)
    pub leverage: Option<String>,
    /// Order flags
    pub flags: Vec<OrderFlag>,
    /// Start time
    pub starttm: Option<String>,
    /// Expire time
    pub expiretm: Option<String>,
    /// User reference ID
    pub userref: Option<i32>,
    /// Validate only (don't submit)
    pub validate: bool,
    /// Close order type
    pub close_order_type: Option<OrderType>,
    /// Close order price
    pub close_price: Option<Decimal>,
    /// Close order price2
    pub close_price2: Option<Decimal>,
}

impl OrderRequest {
    fn new(pair: impl Into<String>, side: OrderSide, order_type: OrderType, volume: Decimal) -> Self {
        Self {
            pair: pair.into(),
            side,
            order_type,
            volume,
            price: None,
            price2: None,
            time_in_force: None,
            leverage: None,
            flags: Vec::new(),
            starttm: None,
            expiretm: None,
            userref: None,
            validate: false,
            close_order_type: None,
            close_price: None,
            close_price2: None,
        }
    }

    /// Create a market order
    pub fn market(pair: impl Into<String>, side: OrderSide, volume: Decimal) -> Self {
        Self::new(pair, side, OrderType::Market, volume)
    }

    /// Create a limit order
    pub fn limit(pair: impl Into<String>, side: OrderSide, volume: Decimal, price: Decimal) -> Self {
        Self {
            price: Some(price),
            ..Self::new(pair, side, OrderType::Limit, volume)
        }
    }

    /// Create a stop loss order
    pub fn stop_loss(
        pair: impl Into<String>,
        side: OrderSide,
        volume: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self {
            price: Some(stop_price),
            ..Self::new(pair, side, OrderType::StopLoss, volume)
        }
    }

    /// Create a stop loss limit order
    pub fn stop_loss_limit(
        pair: impl Into<String>,
        side: OrderSide,
        volume: Decimal,
        stop_price: Decimal,
        limit_price: Decimal,
    ) -> Self {
        Self {
            price: Some(stop_price),
            price2: Some(limit_price),
            ..Self::new(pair, side, OrderType::StopLossLimit, volume)
        }
    }

    /// Set time in force
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Add an order flag
    pub fn with_flag(mut self, flag: OrderFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    /// Set as post-only (maker only)
    pub fn post_only(self) -> Self {
        self.with_flag(OrderFlag::PostOnly)
    }

    /// Set leverage for margin trading
    pub fn with_leverage(mut self, leverage: impl Into<String>) -> Self {
        self.leverage = Some(leverage.into());
        self
    }

    /// Set user reference ID
    pub fn with_userref(mut self, userref: i32) -> Self {
        self.userref = Some(userref);
        self
    }

    /// Set start and expire times (Unix seconds or `+<n>` relative)
    pub fn with_schedule(mut self, starttm: Option<String>, expiretm: Option<String>) -> Self {
        self.starttm = starttm;
        self.expiretm = expiretm;
        self
    }

    /// Set as validate-only (don't actually submit)
    pub fn validate_only(mut self) -> Self {
        self.validate = true;
        self
    }

    /// Add a close order
    pub fn with_close(mut self, order_type: OrderType, price: Decimal) -> Self {
        self.close_order_type = Some(order_type);
        self.close_price = Some(price);
        self
    }

    /// Add a close order with a secondary price, e.g. stop-loss-limit
    pub fn with_close_limit(mut self, order_type: OrderType, price: Decimal, price2: Decimal) -> Self {
        self.close_order_type = Some(order_type);
        self.close_price = Some(price);
        self.close_price2 = Some(price2);
        self
    }

    /// Encode as `AddOrder` parameters
    pub fn to_params(&self) -> Params {
        let flags: Vec<&str> = self.flags.iter().map(|f| f.as_str()).collect();

        Params::new()
            .with("pair", &self.pair)
            .with("type", self.side)
            .with("ordertype", self.order_type)
            .with("volume", self.volume)
            .with_opt("price", self.price)
            .with_opt("price2", self.price2)
            .with_opt("timeinforce", self.time_in_force)
            .with_opt("leverage", self.leverage.as_deref())
            .with_list("oflags", &flags)
            .with_opt("starttm", self.starttm.as_deref())
            .with_opt("expiretm", self.expiretm.as_deref())
            .with_opt("userref", self.userref)
            .with_flag("validate", self.validate)
            .with_opt("close[ordertype]", self.close_order_type)
            .with_opt("close[price]", self.close_price)
            .with_opt("close[price2]", self.close_price2)
    }
}

/// Response from placing an order
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    /// Order description
    pub descr: OrderResponseDescription,
    /// Transaction IDs, absent for validate-only orders
    #[serde(default)]
    pub txid: Vec<String>,
}

/// Order response description
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponseDescription {
    /// Order description
    pub order: String,
    /// Close order description (if applicable)
    pub close: Option<String>,
}

/// Cancel order result
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResult {
    /// Number of orders cancelled
    pub count: u32,
    /// Whether cancel is pending
    pub pending: Option<bool>,
}

// ============================================================================
// Funding Types
// ============================================================================

/// Deposit method
#[derive(Debug, Clone, Deserialize)]
pub struct DepositMethod {
    /// Method name
    pub method: String,
    /// Deposit limit; `false` when unlimited
    #[serde(default)]
    pub limit: Value,
    /// Fee
    pub fee: Option<Decimal>,
    /// Minimum deposit
    pub minimum: Option<Decimal>,
    /// Address setup fee
    #[serde(rename = "address-setup-fee")]
    pub address_setup_fee: Option<Decimal>,
    /// Whether new addresses can be generated
    #[serde(rename = "gen-address")]
    pub gen_address: Option<bool>,
}

impl DepositMethod {
    /// Deposit limit, `None` when unlimited
    pub fn limit_amount(&self) -> Option<Decimal> {
        decimal_from_value(&self.limit).ok()
    }
}

/// Deposit address
#[derive(Debug, Clone, Deserialize)]
pub struct DepositAddress {
    /// Address
    pub address: String,
    /// Expiry time, 0 if the address does not expire
    pub expiretm: Decimal,
    /// New address generated
    pub new: Option<bool>,
    /// Destination tag, for assets that need one
    pub tag: Option<String>,
    /// Memo, for assets that need one
    pub memo: Option<String>,
}

/// Status of a deposit or withdrawal
#[derive(Debug, Clone, Deserialize)]
pub struct FundingStatus {
    /// Funding method
    pub method: String,
    /// Asset class
    pub aclass: Option<String>,
    /// Asset
    pub asset: String,
    /// Reference ID
    pub refid: String,
    /// Method transaction ID
    pub txid: Option<String>,
    /// Method transaction information
    pub info: Option<String>,
    /// Amount
    pub amount: Decimal,
    /// Fee
    pub fee: Option<Decimal>,
    /// Unix timestamp
    pub time: i64,
    /// Status (Initial, Pending, Settled, Success, Failure)
    pub status: String,
    /// Additional status (return, onhold, cancel-pending, ...)
    #[serde(rename = "status-prop")]
    pub status_prop: Option<String>,
}

/// Withdrawal info
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawInfo {
    /// Withdrawal method
    pub method: String,
    /// Maximum net amount that can be withdrawn now
    pub limit: Decimal,
    /// Net amount that will be sent, after fees
    pub amount: Decimal,
    /// Fee
    pub fee: Decimal,
}

/// Withdrawal reference
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawResult {
    /// Reference ID
    pub refid: String,
}

/// Parse a decimal from a JSON string or number
pub(crate) fn decimal_from_value(value: &Value) -> Result<Decimal, String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => return Err(format!("expected decimal, got {}", other)),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| format!("invalid decimal {:?}: {}", text, e))
}
