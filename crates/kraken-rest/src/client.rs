//! Main REST client implementation

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use kraken_auth::{Credentials, API_KEY_ENV, PRIVATE_KEY_ENV};
use tracing::info;

use crate::dispatcher::Dispatcher;
use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::{
    BalanceInfo, CancelOrderResult, DepositMethod, OpenOrders, OrderRequest, OrderResponse,
    OrderbookData, ServerTime, TickerInfo,
};

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.kraken.com";
/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "KRAKEN_API_URL";

const DEFAULT_API_VERSION: &str = "0";
/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("kraken-rest/", env!("CARGO_PKG_VERSION"));

/// Kraken REST API client
///
/// Provides access to both public and private endpoints. Cloning is cheap
/// and clones share one nonce sequence, so a single credential pair can be
/// used from many tasks at once.
///
/// # Example
///
/// ```no_run
/// use kraken_rest::{KrakenRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = KrakenRestClient::new()?;
///     let ticker = client.get_ticker("XBTUSD").await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = KrakenRestClient::with_credentials(creds)?;
///     let balance = auth_client.get_balance().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct KrakenRestClient {
    dispatcher: Arc<Dispatcher>,
}

impl KrakenRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a client configured from the environment
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> RestResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with custom configuration
    ///
    /// Every client starts its own nonce sequence. Kraken rejects a nonce
    /// that is not above the last one seen for the key, so to share an API
    /// key across tasks clone one client rather than building several.
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::with_options(
            Duration::from_secs(config.timeout_secs),
            Some(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)),
        )?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client that sends requests through a custom transport
    ///
    /// The config's timeout and user agent are the transport's concern and
    /// are ignored here. Like [`with_config`](Self::with_config), this starts
    /// a fresh nonce sequence.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let dispatcher = Dispatcher::new(
            transport,
            config.base_url,
            config.api_version,
            config.credentials,
        );
        info!(
            base_url = dispatcher.base_url(),
            authenticated = dispatcher.has_credentials(),
            "Created Kraken REST client"
        );

        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.dispatcher.has_credentials()
    }

    /// The underlying dispatcher, for calling registry operations directly
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn require_credentials(&self) -> RestResult<&Dispatcher> {
        if self.has_credentials() {
            Ok(&self.dispatcher)
        } else {
            Err(RestError::AuthRequired)
        }
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.dispatcher)
    }

    /// Get server time
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        self.market().get_server_time().await
    }

    /// Get ticker information for a trading pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "XBTUSD", "ETHUSD")
    pub async fn get_ticker(&self, pair: &str) -> RestResult<TickerInfo> {
        self.market().get_ticker(pair).await
    }

    /// Get ticker information for multiple trading pairs
    pub async fn get_tickers(&self, pairs: &[&str]) -> RestResult<HashMap<String, TickerInfo>> {
        self.market().get_tickers(pairs).await
    }

    /// Get orderbook depth for a trading pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair
    /// * `count` - Number of price levels (1-500)
    pub async fn get_orderbook(
        &self,
        pair: &str,
        count: Option<u32>,
    ) -> RestResult<HashMap<String, OrderbookData>> {
        self.market().get_orderbook(pair, count).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        Ok(AccountEndpoints::new(self.require_credentials()?))
    }

    /// Get account balance
    pub async fn get_balance(&self) -> RestResult<BalanceInfo> {
        self.account()?.get_balance().await
    }

    /// Get open orders
    pub async fn get_open_orders(&self) -> RestResult<OpenOrders> {
        self.account()?.get_open_orders(false, None).await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        Ok(TradingEndpoints::new(self.require_credentials()?))
    }

    /// Place a new order
    pub async fn add_order(&self, order: &OrderRequest) -> RestResult<OrderResponse> {
        self.trading()?.add_order(order).await
    }

    /// Cancel an order by transaction ID
    pub async fn cancel_order(&self, txid: &str) -> RestResult<CancelOrderResult> {
        self.trading()?.cancel_order(txid).await
    }

    /// Cancel all open orders
    pub async fn cancel_all_orders(&self) -> RestResult<CancelOrderResult> {
        self.trading()?.cancel_all_orders().await
    }

    // ========================================================================
    // Private Funding Endpoints
    // ========================================================================

    /// Get funding endpoints (requires credentials)
    pub fn funding(&self) -> RestResult<FundingEndpoints<'_>> {
        Ok(FundingEndpoints::new(self.require_credentials()?))
    }

    /// Get deposit methods for an asset
    pub async fn get_deposit_methods(&self, asset: &str) -> RestResult<Vec<DepositMethod>> {
        self.funding()?.get_deposit_methods(asset).await
    }
}

impl std::fmt::Debug for KrakenRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenRestClient")
            .field("base_url", &self.dispatcher.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Scheme and host, without the version segment
    pub base_url: String,
    /// API version path segment
    pub api_version: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from environment variables
    ///
    /// `KRAKEN_API_KEY` and `KRAKEN_PRIVATE_KEY` are optional but must be
    /// set together. `KRAKEN_API_URL` overrides the base URL.
    pub fn from_env() -> RestResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RestResult<Self> {
        let mut config = Self::default();

        match (lookup(API_KEY_ENV), lookup(PRIVATE_KEY_ENV)) {
            (Some(key), Some(secret)) => {
                config.credentials = Some(Credentials::new(key, secret)?);
            }
            (None, None) => {}
            (Some(_), None) => {
                return Err(RestError::InvalidConfig(format!(
                    "{} is set but {} is not",
                    API_KEY_ENV, PRIVATE_KEY_ENV
                )))
            }
            (None, Some(_)) => {
                return Err(RestError::InvalidConfig(format!(
                    "{} is set but {} is not",
                    PRIVATE_KEY_ENV, API_KEY_ENV
                )))
            }
        }

        if let Some(url) = lookup(BASE_URL_ENV) {
            config.base_url = url;
        }

        Ok(config)
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set base URL (e.g. a local mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set API version path segment
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Check the configuration before building a client
    pub fn validate(&self) -> RestResult<()> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(RestError::InvalidConfig(format!(
                "base URL must be http(s), got {:?}",
                self.base_url
            )));
        }
        if self.api_version.is_empty() || self.api_version.contains('/') {
            return Err(RestError::InvalidConfig(format!(
                "invalid API version {:?}",
                self.api_version
            )));
        }
        if self.timeout_secs == 0 {
            return Err(RestError::InvalidConfig("timeout must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    const SECRET: &str = "dGVzdF9wcml2YXRlX2tleQ==";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_client_without_credentials() {
        let client = KrakenRestClient::new().unwrap();
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_base_url("http://localhost:8080");

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.api_version, "0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_auth_required_error() {
        let client = KrakenRestClient::new().unwrap();
        assert!(matches!(client.account(), Err(RestError::AuthRequired)));
        assert!(matches!(client.trading(), Err(RestError::AuthRequired)));
        assert!(matches!(client.funding(), Err(RestError::AuthRequired)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = KrakenRestClient::with_config(ClientConfig::new().with_base_url("api.kraken.com"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = ClientConfig::new().with_api_version("").validate().unwrap_err();
        assert!(matches!(err, RestError::InvalidConfig(_)));
    }

    #[test]
    fn test_env_without_credentials() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.credentials.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_env_with_credentials_and_url() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "key"),
            (PRIVATE_KEY_ENV, SECRET),
            (BASE_URL_ENV, "http://127.0.0.1:9000"),
        ]))
        .unwrap();
        assert_eq!(config.credentials.unwrap().api_key(), "key");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_env_half_credentials_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(API_KEY_ENV, "key")])).unwrap_err();
        assert!(matches!(err, RestError::InvalidConfig(_)));

        let err = ClientConfig::from_lookup(lookup(&[(PRIVATE_KEY_ENV, SECRET)])).unwrap_err();
        assert!(matches!(err, RestError::InvalidConfig(_)));
    }

    #[test]
    fn test_env_bad_secret_is_auth_error() {
        let err = ClientConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "key"),
            (PRIVATE_KEY_ENV, "%%%"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RestError::Auth(_)));
    }
}
