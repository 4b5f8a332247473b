//! Funding endpoints (deposits and withdrawals)
//!
//! These endpoints require authentication.

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::dispatcher::Dispatcher;
use crate::error::RestResult;
use crate::method::KrakenMethod;
use crate::params::Params;
use crate::types::{DepositAddress, DepositMethod, FundingStatus, WithdrawInfo, WithdrawResult};

/// Funding endpoints
pub struct FundingEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> FundingEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get deposit methods for an asset
    #[instrument(skip(self))]
    pub async fn get_deposit_methods(&self, asset: &str) -> RestResult<Vec<DepositMethod>> {
        let params = Params::new().with("asset", asset);
        self.dispatcher
            .call(KrakenMethod::DepositMethods, params)
            .await
    }

    /// Get deposit addresses
    ///
    /// # Arguments
    /// * `asset` - Asset being deposited
    /// * `method` - Deposit method name from [`get_deposit_methods`](Self::get_deposit_methods)
    /// * `new` - Generate a new address
    #[instrument(skip(self))]
    pub async fn get_deposit_addresses(
        &self,
        asset: &str,
        method: &str,
        new: bool,
    ) -> RestResult<Vec<DepositAddress>> {
        let params = Params::new()
            .with("asset", asset)
            .with("method", method)
            .with_flag("new", new);
        self.dispatcher
            .call(KrakenMethod::DepositAddresses, params)
            .await
    }

    /// Get status of recent deposits
    #[instrument(skip(self))]
    pub async fn get_deposit_status(
        &self,
        asset: Option<&str>,
        method: Option<&str>,
    ) -> RestResult<Vec<FundingStatus>> {
        let params = Params::new()
            .with_opt("asset", asset)
            .with_opt("method", method);
        self.dispatcher
            .call(KrakenMethod::DepositStatus, params)
            .await
    }

    /// Get fee and limit for a prospective withdrawal
    ///
    /// # Arguments
    /// * `asset` - Asset being withdrawn
    /// * `key` - Withdrawal key name, as set up on the account
    /// * `amount` - Amount to withdraw
    #[instrument(skip(self))]
    pub async fn get_withdraw_info(
        &self,
        asset: &str,
        key: &str,
        amount: Decimal,
    ) -> RestResult<WithdrawInfo> {
        let params = Params::new()
            .with("asset", asset)
            .with("key", key)
            .with("amount", amount);
        self.dispatcher.call(KrakenMethod::WithdrawInfo, params).await
    }

    /// Withdraw funds to a configured withdrawal key
    ///
    /// # Warning
    /// This moves real funds.
    #[instrument(skip(self))]
    pub async fn withdraw(&self, asset: &str, key: &str, amount: Decimal) -> RestResult<WithdrawResult> {
        debug!("Withdrawing {} {} to {}", amount, asset, key);
        let params = Params::new()
            .with("asset", asset)
            .with("key", key)
            .with("amount", amount);
        self.dispatcher.call(KrakenMethod::Withdraw, params).await
    }

    /// Get status of recent withdrawals
    #[instrument(skip(self))]
    pub async fn get_withdraw_status(
        &self,
        asset: Option<&str>,
        method: Option<&str>,
    ) -> RestResult<Vec<FundingStatus>> {
        let params = Params::new()
            .with_opt("asset", asset)
            .with_opt("method", method);
        self.dispatcher
            .call(KrakenMethod::WithdrawStatus, params)
            .await
    }

    /// Cancel a pending withdrawal
    ///
    /// Returns `true` once the cancellation request was accepted.
    #[instrument(skip(self))]
    pub async fn cancel_withdrawal(&self, asset: &str, refid: &str) -> RestResult<bool> {
        let params = Params::new().with("asset", asset).with("refid", refid);
        self.dispatcher
            .call(KrakenMethod::WithdrawCancel, params)
            .await
    }
}
