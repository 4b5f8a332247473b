//! Trading endpoints
//!
//! These endpoints require authentication and may execute real trades.

use tracing::{debug, instrument};

use crate::dispatcher::Dispatcher;
use crate::error::{RestError, RestResult};
use crate::method::KrakenMethod;
use crate::params::Params;
use crate::types::{CancelOrderResult, OrderRequest, OrderResponse};

/// Trading endpoints
pub struct TradingEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Place a new order
    ///
    /// # Warning
    /// This executes real trades unless `validate` is set on the request.
    #[instrument(skip(self, order), fields(pair = %order.pair, side = %order.side))]
    pub async fn add_order(&self, order: &OrderRequest) -> RestResult<OrderResponse> {
        if order.volume.is_sign_negative() || order.volume.is_zero() {
            return Err(RestError::InvalidParameter(format!(
                "order volume must be positive, got {}",
                order.volume
            )));
        }

        debug!(
            "Placing {} {} order for {} {}",
            order.side, order.order_type, order.volume, order.pair
        );
        self.dispatcher
            .call(KrakenMethod::AddOrder, order.to_params())
            .await
    }

    /// Cancel an order
    ///
    /// # Arguments
    /// * `txid` - Transaction ID or user reference of the order to cancel
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, txid: &str) -> RestResult<CancelOrderResult> {
        debug!("Cancelling order {}", txid);
        let params = Params::new().with("txid", txid);
        self.dispatcher.call(KrakenMethod::CancelOrder, params).await
    }

    /// Cancel all open orders
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(&self) -> RestResult<CancelOrderResult> {
        debug!("Cancelling all open orders");
        self.dispatcher
            .call(KrakenMethod::CancelAll, Params::new())
            .await
    }
}
