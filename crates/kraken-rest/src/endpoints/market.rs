//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use std::collections::HashMap;

use kraken_types::Interval;
use tracing::{debug, instrument};

use crate::dispatcher::Dispatcher;
use crate::error::{RestError, RestResult};
use crate::method::KrakenMethod;
use crate::params::Params;
use crate::types::{
    AssetInfo, AssetPairInfo, OhlcData, OrderbookData, RecentSpreads, RecentTrades, ServerTime,
    SystemStatus, TickerInfo,
};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get server time
    #[instrument(skip(self))]
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        debug!("Fetching server time");
        self.dispatcher
            .call(KrakenMethod::ServerTime, Params::new())
            .await
    }

    /// Get system status
    #[instrument(skip(self))]
    pub async fn get_system_status(&self) -> RestResult<SystemStatus> {
        debug!("Fetching system status");
        self.dispatcher
            .call(KrakenMethod::SystemStatus, Params::new())
            .await
    }

    /// Get asset info
    ///
    /// # Arguments
    /// * `assets` - Assets to get info for (e.g., ["XBT", "ETH"]); empty for all
    #[instrument(skip(self))]
    pub async fn get_assets(&self, assets: &[&str]) -> RestResult<HashMap<String, AssetInfo>> {
        let params = Params::new().with_list("asset", assets);
        self.dispatcher.call(KrakenMethod::Assets, params).await
    }

    /// Get tradable asset pairs
    ///
    /// # Arguments
    /// * `pairs` - Pairs to get info for (e.g., ["XBTUSD", "ETHUSD"]); empty for all
    #[instrument(skip(self))]
    pub async fn get_asset_pairs(
        &self,
        pairs: &[&str],
    ) -> RestResult<HashMap<String, AssetPairInfo>> {
        let params = Params::new().with_list("pair", pairs);
        self.dispatcher.call(KrakenMethod::AssetPairs, params).await
    }

    /// Get ticker information for one pair
    ///
    /// Kraken keys the result by its own pair name (`XXBTZUSD` for
    /// `XBTUSD`), so the single entry is returned whatever its key.
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, pair: &str) -> RestResult<TickerInfo> {
        let mut tickers = self.get_tickers(&[pair]).await?;
        let key = tickers.keys().next().cloned();
        key.and_then(|k| tickers.remove(&k)).ok_or_else(|| {
            RestError::Decode(format!("no ticker returned for {}", pair))
        })
    }

    /// Get ticker information for several pairs
    #[instrument(skip(self))]
    pub async fn get_tickers(&self, pairs: &[&str]) -> RestResult<HashMap<String, TickerInfo>> {
        let params = Params::new().with_list("pair", pairs);
        self.dispatcher.call(KrakenMethod::Ticker, params).await
    }

    /// Get OHLC candles
    ///
    /// # Arguments
    /// * `pair` - Trading pair
    /// * `interval` - Candle interval
    /// * `since` - Return candles after this cursor
    #[instrument(skip(self))]
    pub async fn get_ohlc(
        &self,
        pair: &str,
        interval: Interval,
        since: Option<i64>,
    ) -> RestResult<OhlcData> {
        let params = Params::new()
            .with("pair", pair)
            .with("interval", interval.minutes())
            .with_opt("since", since);
        self.dispatcher
            .call_with_cursor(KrakenMethod::Ohlc, params)
            .await
    }

    /// Get orderbook
    ///
    /// # Arguments
    /// * `pair` - Trading pair
    /// * `count` - Maximum number of levels per side (1-500)
    #[instrument(skip(self))]
    pub async fn get_orderbook(
        &self,
        pair: &str,
        count: Option<u32>,
    ) -> RestResult<HashMap<String, OrderbookData>> {
        let params = Params::new().with("pair", pair).with_opt("count", count);
        self.dispatcher.call(KrakenMethod::OrderBook, params).await
    }

    /// Get recent trades
    #[instrument(skip(self))]
    pub async fn get_recent_trades(
        &self,
        pair: &str,
        since: Option<i64>,
    ) -> RestResult<RecentTrades> {
        let params = Params::new().with("pair", pair).with_opt("since", since);
        self.dispatcher
            .call_with_cursor(KrakenMethod::RecentTrades, params)
            .await
    }

    /// Get recent spreads
    #[instrument(skip(self))]
    pub async fn get_recent_spreads(
        &self,
        pair: &str,
        since: Option<i64>,
    ) -> RestResult<RecentSpreads> {
        let params = Params::new().with("pair", pair).with_opt("since", since);
        self.dispatcher
            .call_with_cursor(KrakenMethod::RecentSpreads, params)
            .await
    }
}
