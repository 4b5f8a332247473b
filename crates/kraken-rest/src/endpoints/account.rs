//! Private account endpoints
//!
//! These endpoints require authentication.

use std::collections::HashMap;

use tracing::instrument;

use crate::dispatcher::Dispatcher;
use crate::error::RestResult;
use crate::method::KrakenMethod;
use crate::params::Params;
use crate::types::{
    BalanceInfo, ClosedOrders, ClosedOrdersQuery, HistoryQuery, LedgerEntry, Ledgers, OpenOrders,
    OrderInfo, PositionInfo, TradeBalance, TradeHistoryEntry, TradeVolume, TradesHistory,
    WebSocketToken,
};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get account balance
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> RestResult<BalanceInfo> {
        self.dispatcher
            .call(KrakenMethod::Balance, Params::new())
            .await
    }

    /// Get trade balance (margin info)
    ///
    /// # Arguments
    /// * `asset` - Base asset for calculations (default: "ZUSD")
    #[instrument(skip(self))]
    pub async fn get_trade_balance(&self, asset: Option<&str>) -> RestResult<TradeBalance> {
        let params = Params::new().with_opt("asset", asset);
        self.dispatcher.call(KrakenMethod::TradeBalance, params).await
    }

    /// Get open orders
    ///
    /// # Arguments
    /// * `trades` - Include trade IDs
    /// * `userref` - Filter by user reference
    #[instrument(skip(self))]
    pub async fn get_open_orders(
        &self,
        trades: bool,
        userref: Option<i64>,
    ) -> RestResult<OpenOrders> {
        let params = Params::new()
            .with_flag("trades", trades)
            .with_opt("userref", userref);
        self.dispatcher.call(KrakenMethod::OpenOrders, params).await
    }

    /// Get closed orders, 50 at a time
    #[instrument(skip(self))]
    pub async fn get_closed_orders(&self, query: &ClosedOrdersQuery) -> RestResult<ClosedOrders> {
        self.dispatcher
            .call(KrakenMethod::ClosedOrders, query.to_params())
            .await
    }

    /// Query orders by transaction ID
    ///
    /// # Arguments
    /// * `txids` - Up to 50 transaction IDs
    /// * `trades` - Include trade IDs
    #[instrument(skip(self))]
    pub async fn query_orders(
        &self,
        txids: &[&str],
        trades: bool,
    ) -> RestResult<HashMap<String, OrderInfo>> {
        let params = Params::new()
            .with_list("txid", txids)
            .with_flag("trades", trades);
        self.dispatcher.call(KrakenMethod::QueryOrders, params).await
    }

    /// Get trade history, 50 at a time
    #[instrument(skip(self))]
    pub async fn get_trades_history(&self, query: &HistoryQuery) -> RestResult<TradesHistory> {
        let params = query.apply(Params::new());
        self.dispatcher
            .call(KrakenMethod::TradesHistory, params)
            .await
    }

    /// Query specific trades
    #[instrument(skip(self))]
    pub async fn query_trades(
        &self,
        txids: &[&str],
    ) -> RestResult<HashMap<String, TradeHistoryEntry>> {
        let params = Params::new().with_list("txid", txids);
        self.dispatcher.call(KrakenMethod::QueryTrades, params).await
    }

    /// Get open positions
    ///
    /// # Arguments
    /// * `txids` - Position transaction IDs; empty for all
    /// * `docalcs` - Include profit/loss calculations
    #[instrument(skip(self))]
    pub async fn get_open_positions(
        &self,
        txids: &[&str],
        docalcs: bool,
    ) -> RestResult<HashMap<String, PositionInfo>> {
        let params = Params::new()
            .with_list("txid", txids)
            .with_flag("docalcs", docalcs);
        self.dispatcher
            .call(KrakenMethod::OpenPositions, params)
            .await
    }

    /// Get ledger entries, 50 at a time
    ///
    /// # Arguments
    /// * `assets` - Filter by asset; empty for all
    /// * `query` - Time range and offset
    #[instrument(skip(self))]
    pub async fn get_ledgers(&self, assets: &[&str], query: &HistoryQuery) -> RestResult<Ledgers> {
        let params = query.apply(Params::new().with_list("asset", assets));
        self.dispatcher.call(KrakenMethod::Ledgers, params).await
    }

    /// Query ledger entries by ID
    #[instrument(skip(self))]
    pub async fn query_ledgers(&self, ids: &[&str]) -> RestResult<HashMap<String, LedgerEntry>> {
        let params = Params::new().with_list("id", ids);
        self.dispatcher.call(KrakenMethod::QueryLedgers, params).await
    }

    /// Get 30-day trade volume and fee tiers
    ///
    /// # Arguments
    /// * `pairs` - Pairs to report fees for; empty for none
    #[instrument(skip(self))]
    pub async fn get_trade_volume(&self, pairs: &[&str]) -> RestResult<TradeVolume> {
        let params = Params::new().with_list("pair", pairs);
        self.dispatcher.call(KrakenMethod::TradeVolume, params).await
    }

    /// Get a token for private WebSocket feeds
    #[instrument(skip(self))]
    pub async fn get_websockets_token(&self) -> RestResult<WebSocketToken> {
        self.dispatcher
            .call(KrakenMethod::WebSocketsToken, Params::new())
            .await
    }
}
