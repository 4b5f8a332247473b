//! API endpoint groups
//!
//! Each group borrows the client's [`Dispatcher`](crate::Dispatcher) and
//! turns typed arguments into a parameter list for one registry operation.

pub mod market;
pub mod account;
pub mod trading;
pub mod funding;

pub use market::MarketEndpoints;
pub use account::AccountEndpoints;
pub use trading::TradingEndpoints;
pub use funding::FundingEndpoints;
