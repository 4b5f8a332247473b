//! Shared types for the Kraken REST client
//!
//! This crate provides the request enums and error classification used by
//! `kraken-auth` and `kraken-rest`. It has minimal dependencies and can be
//! used independently.
//!
//! # Key Types
//!
//! - [`Interval`] - OHLC candle intervals and their minute codes
//! - [`OrderSide`], [`OrderType`], [`TimeInForce`], [`OrderFlag`] - Order parameters
//! - [`KrakenApiError`], [`KrakenErrorCode`], [`ErrorCategory`] - Kraken error string mapping

pub mod enums;
pub mod error_codes;

// Re-export commonly used types
pub use enums::*;
pub use error_codes::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
