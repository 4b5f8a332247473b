//! Classification of Kraken API error strings
//!
//! Kraken reports failures as strings of the form `"ECategory:Message"`, e.g.
//! `"EGeneral:Invalid arguments"`. This module maps those strings onto a
//! category and, when recognised, a specific code so callers can branch on
//! them without string matching.

/// Kraken API error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// EAPI:* errors - API-level issues
    Api,
    /// EGeneral:* errors - General errors
    General,
    /// EService:* errors - Service availability
    Service,
    /// EOrder:* errors - Trading/order errors
    Order,
    /// EFunding:* errors - Deposit/withdrawal errors
    Funding,
    /// EQuery:* errors - Query/search errors
    Query,
    /// ETrade:* errors - Trade execution errors
    Trade,
    /// Unknown error category
    Unknown,
}

impl ErrorCategory {
    fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "EAPI" => Self::Api,
            "EGeneral" => Self::General,
            "EService" => Self::Service,
            "EOrder" => Self::Order,
            "EFunding" => Self::Funding,
            "EQuery" => Self::Query,
            "ETrade" => Self::Trade,
            _ => Self::Unknown,
        }
    }
}

/// Parsed Kraken API error with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KrakenApiError {
    /// The original error string from Kraken
    pub raw: String,
    /// Parsed error code (if recognized)
    pub code: Option<KrakenErrorCode>,
    /// Error category
    pub category: ErrorCategory,
    /// Text after the category prefix
    pub message: String,
}

impl KrakenApiError {
    /// Parse a Kraken error string into a structured error
    pub fn parse(error: &str) -> Self {
        let (category, message) = match error.split_once(':') {
            Some((prefix, rest)) => (ErrorCategory::from_prefix(prefix), rest.trim().to_string()),
            None => (ErrorCategory::Unknown, error.to_string()),
        };

        Self {
            raw: error.to_string(),
            code: KrakenErrorCode::parse(error),
            category,
            message,
        }
    }

    /// Parse every error string of an envelope, keeping order
    pub fn parse_many(errors: &[String]) -> Vec<Self> {
        errors.iter().map(|e| Self::parse(e)).collect()
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(
            self.code,
            Some(KrakenErrorCode::RateLimitExceeded)
                | Some(KrakenErrorCode::TooManyRequests)
                | Some(KrakenErrorCode::OrderRateLimitExceeded)
        )
    }

    /// Check if the request was rejected because of its credentials or signature
    pub fn is_auth(&self) -> bool {
        matches!(
            self.code,
            Some(KrakenErrorCode::InvalidKey)
                | Some(KrakenErrorCode::InvalidSignature)
                | Some(KrakenErrorCode::InvalidNonce)
                | Some(KrakenErrorCode::PermissionDenied)
        )
    }
}

impl std::fmt::Display for KrakenApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Known Kraken REST error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KrakenErrorCode {
    // === EAPI ===
    /// EAPI:Rate limit exceeded
    RateLimitExceeded,
    /// EAPI:Invalid key
    InvalidKey,
    /// EAPI:Invalid signature
    InvalidSignature,
    /// EAPI:Invalid nonce
    InvalidNonce,
    /// EAPI:Bad request
    BadRequest,
    /// EAPI:Feature disabled
    FeatureDisabled,

    // === EGeneral ===
    /// EGeneral:Invalid arguments
    InvalidArguments,
    /// EGeneral:Permission denied
    PermissionDenied,
    /// EGeneral:Unknown asset pair
    UnknownAssetPair,
    /// EGeneral:Unknown asset
    UnknownAsset,
    /// EGeneral:Too many requests
    TooManyRequests,
    /// EGeneral:Temporary lockout
    TemporaryLockout,
    /// EGeneral:Unknown method
    UnknownMethod,
    /// EGeneral:Internal error
    InternalError,

    // === EService ===
    /// EService:Unavailable
    ServiceUnavailable,
    /// EService:Busy
    ServiceBusy,
    /// EService:Market in cancel_only mode
    MarketCancelOnly,
    /// EService:Market in post_only mode
    MarketPostOnly,
    /// EService:Deadline elapsed
    DeadlineElapsed,

    // === EOrder ===
    /// EOrder:Insufficient funds
    InsufficientFunds,
    /// EOrder:Insufficient margin
    InsufficientMargin,
    /// EOrder:Order minimum not met
    OrderMinimumNotMet,
    /// EOrder:Cost minimum not met
    CostMinimumNotMet,
    /// EOrder:Orders limit exceeded
    OrdersLimitExceeded,
    /// EOrder:Rate limit exceeded
    OrderRateLimitExceeded,
    /// EOrder:Unknown order
    UnknownOrder,
    /// EOrder:Invalid price
    InvalidPrice,

    // === EFunding ===
    /// EFunding:Unknown withdraw key
    UnknownWithdrawKey,
    /// EFunding:Invalid amount
    InvalidFundingAmount,
    /// EFunding:Too small
    FundingTooSmall,

    // === EQuery ===
    /// EQuery:Unknown asset pair
    QueryUnknownAssetPair,
}

impl KrakenErrorCode {
    /// Parse an error code from a Kraken error string
    ///
    /// Kraken sometimes appends detail after a second colon
    /// (`"EGeneral:Invalid arguments:volume"`), so only the first two
    /// segments are matched.
    pub fn parse(error: &str) -> Option<Self> {
        let head = match error.match_indices(':').nth(1) {
            Some((idx, _)) => &error[..idx],
            None => error,
        };

        Some(match head {
            "EAPI:Rate limit exceeded" => Self::RateLimitExceeded,
            "EAPI:Invalid key" => Self::InvalidKey,
            "EAPI:Invalid signature" => Self::InvalidSignature,
            "EAPI:Invalid nonce" => Self::InvalidNonce,
            "EAPI:Bad request" => Self::BadRequest,
            "EAPI:Feature disabled" => Self::FeatureDisabled,

            "EGeneral:Invalid arguments" => Self::InvalidArguments,
            "EGeneral:Permission denied" => Self::PermissionDenied,
            "EGeneral:Unknown asset pair" => Self::UnknownAssetPair,
            "EGeneral:Unknown asset" => Self::UnknownAsset,
            "EGeneral:Too many requests" => Self::TooManyRequests,
            "EGeneral:Temporary lockout" => Self::TemporaryLockout,
            "EGeneral:Unknown method" => Self::UnknownMethod,
            "EGeneral:Internal error" => Self::InternalError,

            "EService:Unavailable" => Self::ServiceUnavailable,
            "EService:Busy" => Self::ServiceBusy,
            "EService:Market in cancel_only mode" => Self::MarketCancelOnly,
            "EService:Market in post_only mode" => Self::MarketPostOnly,
            "EService:Deadline elapsed" => Self::DeadlineElapsed,

            "EOrder:Insufficient funds" => Self::InsufficientFunds,
            "EOrder:Insufficient margin" => Self::InsufficientMargin,
            "EOrder:Order minimum not met" => Self::OrderMinimumNotMet,
            "EOrder:Cost minimum not met" => Self::CostMinimumNotMet,
            "EOrder:Orders limit exceeded" => Self::OrdersLimitExceeded,
            "EOrder:Rate limit exceeded" => Self::OrderRateLimitExceeded,
            "EOrder:Unknown order" => Self::UnknownOrder,
            "EOrder:Invalid price" => Self::InvalidPrice,

            "EFunding:Unknown withdraw key" => Self::UnknownWithdrawKey,
            "EFunding:Invalid amount" => Self::InvalidFundingAmount,
            "EFunding:Too small" => Self::FundingTooSmall,

            "EQuery:Unknown asset pair" => Self::QueryUnknownAssetPair,

            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate_limit_error() {
        let err = KrakenApiError::parse("EAPI:Rate limit exceeded");
        assert_eq!(err.category, ErrorCategory::Api);
        assert_eq!(err.code, Some(KrakenErrorCode::RateLimitExceeded));
        assert!(err.is_rate_limit());
        assert!(!err.is_auth());
    }

    #[test]
    fn test_parse_nonce_error() {
        let err = KrakenApiError::parse("EAPI:Invalid nonce");
        assert_eq!(err.code, Some(KrakenErrorCode::InvalidNonce));
        assert!(err.is_auth());
    }

    #[test]
    fn test_parse_error_with_detail_suffix() {
        let err = KrakenApiError::parse("EGeneral:Invalid arguments:volume");
        assert_eq!(err.category, ErrorCategory::General);
        assert_eq!(err.code, Some(KrakenErrorCode::InvalidArguments));
        assert_eq!(err.message, "Invalid arguments:volume");
    }

    #[test]
    fn test_parse_unknown_error() {
        let err = KrakenApiError::parse("something odd");
        assert_eq!(err.category, ErrorCategory::Unknown);
        assert_eq!(err.code, None);
        assert_eq!(err.to_string(), "something odd");
    }

    #[test]
    fn test_parse_many_keeps_order() {
        let errors = vec![
            "EGeneral:Invalid arguments".to_string(),
            "EService:Unavailable".to_string(),
        ];
        let parsed = KrakenApiError::parse_many(&errors);
        assert_eq!(parsed[0].category, ErrorCategory::General);
        assert_eq!(parsed[1].code, Some(KrakenErrorCode::ServiceUnavailable));
    }
}
