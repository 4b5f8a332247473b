//! Interval, side, order type and related request enums

use serde::{Deserialize, Serialize};

/// OHLC candle interval
///
/// Kraken expects the interval as a number of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    /// 1 minute
    #[serde(rename = "1")]
    #[default]
    OneMinute,
    /// 5 minutes
    #[serde(rename = "5")]
    FiveMinutes,
    /// 15 minutes
    #[serde(rename = "15")]
    FifteenMinutes,
    /// 30 minutes
    #[serde(rename = "30")]
    ThirtyMinutes,
    /// 1 hour
    #[serde(rename = "60")]
    OneHour,
    /// 4 hours
    #[serde(rename = "240")]
    FourHours,
    /// 1 day
    #[serde(rename = "1440")]
    OneDay,
    /// 1 week
    #[serde(rename = "10080")]
    OneWeek,
    /// 15 days
    #[serde(rename = "21600")]
    FifteenDays,
}

impl Interval {
    /// Every interval, shortest first
    pub const ALL: [Interval; 9] = [
        Self::OneMinute,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::FourHours,
        Self::OneDay,
        Self::OneWeek,
        Self::FifteenDays,
    ];

    /// Interval length in minutes, as sent on the wire
    pub fn minutes(&self) -> u32 {
        match self {
            Self::OneMinute => 1,
            Self::FiveMinutes => 5,
            Self::FifteenMinutes => 15,
            Self::ThirtyMinutes => 30,
            Self::OneHour => 60,
            Self::FourHours => 240,
            Self::OneDay => 1440,
            Self::OneWeek => 10080,
            Self::FifteenDays => 21600,
        }
    }

    /// Look up an interval by its minute count
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.minutes() == minutes)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order types accepted by `AddOrder`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Market order
    Market,
    /// Limit order
    Limit,
    /// Stop loss
    StopLoss,
    /// Take profit
    TakeProfit,
    /// Stop loss limit
    StopLossLimit,
    /// Take profit limit
    TakeProfitLimit,
    /// Trailing stop
    TrailingStop,
    /// Trailing stop limit
    TrailingStopLimit,
    /// Settle position
    SettlePosition,
}

impl OrderType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::StopLoss => "stop-loss",
            Self::TakeProfit => "take-profit",
            Self::StopLossLimit => "stop-loss-limit",
            Self::TakeProfitLimit => "take-profit-limit",
            Self::TrailingStop => "trailing-stop",
            Self::TrailingStopLimit => "trailing-stop-limit",
            Self::SettlePosition => "settle-position",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time in force for orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good till cancelled
    #[serde(rename = "GTC")]
    GoodTillCancelled,
    /// Immediate or cancel
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    /// Good till date
    #[serde(rename = "GTD")]
    GoodTillDate,
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoodTillCancelled => write!(f, "GTC"),
            Self::ImmediateOrCancel => write!(f, "IOC"),
            Self::GoodTillDate => write!(f, "GTD"),
        }
    }
}

/// Order flags (`oflags`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderFlag {
    /// Post-only order (maker only)
    PostOnly,
    /// Fee in base currency
    FeeInBase,
    /// Fee in quote currency
    FeeInQuote,
    /// Disable market price protection
    NoMarketPriceProtection,
    /// Order volume in quote currency
    VolumeInQuote,
}

impl OrderFlag {
    /// Get the API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostOnly => "post",
            Self::FeeInBase => "fcib",
            Self::FeeInQuote => "fciq",
            Self::NoMarketPriceProtection => "nompp",
            Self::VolumeInQuote => "viqc",
        }
    }
}

/// Which timestamp `ClosedOrders` filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CloseTime {
    /// Order open time
    Open,
    /// Order close time
    Close,
    /// Either
    #[default]
    Both,
}

impl CloseTime {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Both => "both",
        }
    }
}

/// Exchange-wide trading state reported by `SystemStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemState {
    /// Normal operation
    Online,
    /// Only cancellations accepted
    CancelOnly,
    /// Only post-only limit orders accepted
    PostOnly,
    /// Only limit orders accepted
    LimitOnly,
    /// Only reduce-only orders accepted
    ReduceOnly,
    /// Maintenance mode
    Maintenance,
}

impl std::fmt::Display for SystemState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::CancelOnly => write!(f, "cancel_only"),
            Self::PostOnly => write!(f, "post_only"),
            Self::LimitOnly => write!(f, "limit_only"),
            Self::ReduceOnly => write!(f, "reduce_only"),
            Self::Maintenance => write!(f, "maintenance"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_minutes() {
        assert_eq!(Interval::OneMinute.minutes(), 1);
        assert_eq!(Interval::OneDay.minutes(), 1440);
        assert_eq!(Interval::FifteenDays.to_string(), "21600");
    }

    #[test]
    fn test_interval_from_minutes() {
        for interval in Interval::ALL {
            assert_eq!(Interval::from_minutes(interval.minutes()), Some(interval));
        }
        assert_eq!(Interval::from_minutes(2), None);
    }

    #[test]
    fn test_order_type_serde_matches_wire_name() {
        let json = serde_json::to_string(&OrderType::StopLossLimit).unwrap();
        assert_eq!(json, "\"stop-loss-limit\"");
        assert_eq!(OrderType::StopLossLimit.as_str(), "stop-loss-limit");

        let parsed: OrderType = serde_json::from_str("\"take-profit\"").unwrap();
        assert_eq!(parsed, OrderType::TakeProfit);
    }

    #[test]
    fn test_system_state_serde() {
        let parsed: SystemState = serde_json::from_str("\"cancel_only\"").unwrap();
        assert_eq!(parsed, SystemState::CancelOnly);
        assert_eq!(parsed.to_string(), "cancel_only");
    }
}
