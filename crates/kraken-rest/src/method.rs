//! Registry of supported REST operations
//!
//! Each [`KrakenMethod`] maps to exactly one [`MethodDescriptor`] giving the
//! wire name, whether the call is signed, and whether its result carries a
//! pagination cursor. Adding an operation means adding one variant and one
//! table row, in the same position.

/// Whether an operation needs authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Unauthenticated market data, sent as GET
    Public,
    /// Signed account or trading call, sent as POST
    Private,
}

impl Visibility {
    /// Path segment for this visibility
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

/// Every REST operation this client can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KrakenMethod {
    // Public
    ServerTime,
    SystemStatus,
    Assets,
    AssetPairs,
    Ticker,
    Ohlc,
    OrderBook,
    RecentTrades,
    RecentSpreads,
    // Private: account
    Balance,
    TradeBalance,
    OpenOrders,
    ClosedOrders,
    QueryOrders,
    TradesHistory,
    QueryTrades,
    OpenPositions,
    Ledgers,
    QueryLedgers,
    TradeVolume,
    WebSocketsToken,
    // Private: trading
    AddOrder,
    CancelOrder,
    CancelAll,
    // Private: funding
    DepositMethods,
    DepositAddresses,
    DepositStatus,
    WithdrawInfo,
    Withdraw,
    WithdrawStatus,
    WithdrawCancel,
}

impl KrakenMethod {
    /// Number of operations
    pub const COUNT: usize = 31;

    /// Every operation, in table order
    pub const ALL: [KrakenMethod; Self::COUNT] = [
        Self::ServerTime,
        Self::SystemStatus,
        Self::Assets,
        Self::AssetPairs,
        Self::Ticker,
        Self::Ohlc,
        Self::OrderBook,
        Self::RecentTrades,
        Self::RecentSpreads,
        Self::Balance,
        Self::TradeBalance,
        Self::OpenOrders,
        Self::ClosedOrders,
        Self::QueryOrders,
        Self::TradesHistory,
        Self::QueryTrades,
        Self::OpenPositions,
        Self::Ledgers,
        Self::QueryLedgers,
        Self::TradeVolume,
        Self::WebSocketsToken,
        Self::AddOrder,
        Self::CancelOrder,
        Self::CancelAll,
        Self::DepositMethods,
        Self::DepositAddresses,
        Self::DepositStatus,
        Self::WithdrawInfo,
        Self::Withdraw,
        Self::WithdrawStatus,
        Self::WithdrawCancel,
    ];

    /// Static description of this operation
    pub fn descriptor(self) -> &'static MethodDescriptor {
        descriptor_for(self)
    }

    /// Name used in the URL path
    pub fn wire_name(self) -> &'static str {
        self.descriptor().name
    }

    /// Whether this operation is signed
    pub fn is_private(self) -> bool {
        self.descriptor().visibility == Visibility::Private
    }

    /// Whether the result carries a `last` cursor
    pub fn has_cursor(self) -> bool {
        self.descriptor().cursor
    }
}

impl std::fmt::Display for KrakenMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// How one operation is called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Operation this row describes
    pub method: KrakenMethod,
    /// Wire name, e.g. `"Balance"`
    pub name: &'static str,
    /// Public or private
    pub visibility: Visibility,
    /// Result is an object with one extra scalar cursor entry
    pub cursor: bool,
}

impl MethodDescriptor {
    const fn public(method: KrakenMethod, name: &'static str) -> Self {
        Self {
            method,
            name,
            visibility: Visibility::Public,
            cursor: false,
        }
    }

    const fn private(method: KrakenMethod, name: &'static str) -> Self {
        Self {
            method,
            name,
            visibility: Visibility::Private,
            cursor: false,
        }
    }

    const fn with_cursor(self) -> Self {
        Self {
            cursor: true,
            ..self
        }
    }

    /// URL path for this operation, e.g. `/0/private/Balance`
    pub fn path(&self, api_version: &str) -> String {
        format!("/{}/{}/{}", api_version, self.visibility.as_str(), self.name)
    }
}

use KrakenMethod as M;

static DESCRIPTORS: [MethodDescriptor; KrakenMethod::COUNT] = [
    MethodDescriptor::public(M::ServerTime, "Time"),
    MethodDescriptor::public(M::SystemStatus, "SystemStatus"),
    MethodDescriptor::public(M::Assets, "Assets"),
    MethodDescriptor::public(M::AssetPairs, "AssetPairs"),
    MethodDescriptor::public(M::Ticker, "Ticker"),
    MethodDescriptor::public(M::Ohlc, "OHLC").with_cursor(),
    MethodDescriptor::public(M::OrderBook, "Depth"),
    MethodDescriptor::public(M::RecentTrades, "Trades").with_cursor(),
    MethodDescriptor::public(M::RecentSpreads, "Spread").with_cursor(),
    MethodDescriptor::private(M::Balance, "Balance"),
    MethodDescriptor::private(M::TradeBalance, "TradeBalance"),
    MethodDescriptor::private(M::OpenOrders, "OpenOrders"),
    MethodDescriptor::private(M::ClosedOrders, "ClosedOrders"),
    MethodDescriptor::private(M::QueryOrders, "QueryOrders"),
    MethodDescriptor::private(M::TradesHistory, "TradesHistory"),
    MethodDescriptor::private(M::QueryTrades, "QueryTrades"),
    MethodDescriptor::private(M::OpenPositions, "OpenPositions"),
    MethodDescriptor::private(M::Ledgers, "Ledgers"),
    MethodDescriptor::private(M::QueryLedgers, "QueryLedgers"),
    MethodDescriptor::private(M::TradeVolume, "TradeVolume"),
    MethodDescriptor::private(M::WebSocketsToken, "GetWebSocketsToken"),
    MethodDescriptor::private(M::AddOrder, "AddOrder"),
    MethodDescriptor::private(M::CancelOrder, "CancelOrder"),
    MethodDescriptor::private(M::CancelAll, "CancelAll"),
    MethodDescriptor::private(M::DepositMethods, "DepositMethods"),
    MethodDescriptor::private(M::DepositAddresses, "DepositAddresses"),
    MethodDescriptor::private(M::DepositStatus, "DepositStatus"),
    MethodDescriptor::private(M::WithdrawInfo, "WithdrawInfo"),
    MethodDescriptor::private(M::Withdraw, "Withdraw"),
    MethodDescriptor::private(M::WithdrawStatus, "WithdrawStatus"),
    MethodDescriptor::private(M::WithdrawCancel, "WithdrawCancel"),
];

/// Look up the descriptor for an operation
pub fn descriptor_for(method: KrakenMethod) -> &'static MethodDescriptor {
    &DESCRIPTORS[method as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_rows_match_variant_order() {
        for (index, method) in KrakenMethod::ALL.iter().enumerate() {
            assert_eq!(*method as usize, index, "{:?} out of order in ALL", method);
            assert_eq!(
                DESCRIPTORS[index].method, *method,
                "row {} describes {:?}, expected {:?}",
                index, DESCRIPTORS[index].method, method
            );
        }
    }

    #[test]
    fn test_wire_names_are_unique() {
        let names: HashSet<_> = DESCRIPTORS.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), KrakenMethod::COUNT);
    }

    #[test]
    fn test_cursor_methods() {
        let cursor: Vec<_> = KrakenMethod::ALL
            .iter()
            .filter(|m| m.has_cursor())
            .map(|m| m.wire_name())
            .collect();
        assert_eq!(cursor, ["OHLC", "Trades", "Spread"]);
        assert!(!KrakenMethod::WithdrawInfo.has_cursor());
    }

    #[test]
    fn test_cursor_methods_are_public() {
        for method in KrakenMethod::ALL {
            if method.has_cursor() {
                assert!(!method.is_private(), "{} is private with cursor", method);
            }
        }
    }

    #[test]
    fn test_paths() {
        assert_eq!(descriptor_for(KrakenMethod::ServerTime).path("0"), "/0/public/Time");
        assert_eq!(
            descriptor_for(KrakenMethod::Balance).path("0"),
            "/0/private/Balance"
        );
        assert_eq!(
            KrakenMethod::WebSocketsToken.descriptor().path("0"),
            "/0/private/GetWebSocketsToken"
        );
    }

    #[test]
    fn test_visibility_split() {
        let public = KrakenMethod::ALL.iter().filter(|m| !m.is_private()).count();
        assert_eq!(public, 9);
        assert_eq!(KrakenMethod::COUNT - public, 22);
    }
}
