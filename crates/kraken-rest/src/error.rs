//! Error types for REST API operations

use kraken_auth::AuthError;
use kraken_types::{KrakenApiError, KrakenErrorCode};

/// Every error string Kraken reported for one failed call, in order
///
/// Never empty. Kraken may return several errors at once; all of them are
/// kept, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrors {
    messages: Vec<String>,
}

impl ApiErrors {
    /// Create from a single error string
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Create from a list of error strings
    ///
    /// Returns `None` if the list is empty.
    pub fn from_messages<I, S>(messages: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            None
        } else {
            Some(Self { messages })
        }
    }

    /// All error strings in the order Kraken returned them
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The first reported error
    pub fn first(&self) -> &str {
        &self.messages[0]
    }

    /// Consume and return the error strings
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    /// Classify each error string
    pub fn parsed(&self) -> Vec<KrakenApiError> {
        KrakenApiError::parse_many(&self.messages)
    }

    /// Check if any reported error is a rate limit
    pub fn is_rate_limited(&self) -> bool {
        self.parsed().iter().any(KrakenApiError::is_rate_limit)
    }

    /// Check if any reported error concerns the key, signature or nonce
    pub fn is_auth_failure(&self) -> bool {
        self.parsed().iter().any(KrakenApiError::is_auth)
    }

    /// Check if Kraken rejected the nonce
    pub fn is_invalid_nonce(&self) -> bool {
        self.parsed()
            .iter()
            .any(|e| e.code == Some(KrakenErrorCode::InvalidNonce))
    }
}

impl std::fmt::Display for ApiErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.messages.join(", "))
    }
}

impl std::error::Error for ApiErrors {}

/// Broad classification of a [`RestError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network, timeout, or non-2xx response without a readable body
    Transport,
    /// Kraken reported one or more errors in the envelope
    Application,
    /// The response did not have the expected shape
    Decode,
    /// Missing or invalid credentials, bad parameters, bad client setup
    Configuration,
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure reported by a custom transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx response whose body is not a Kraken envelope
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Body text (truncated)
        body: String,
    },

    /// Kraken returned errors in the response envelope
    #[error("API error: {0}")]
    Api(ApiErrors),

    /// Response did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Invalid API credentials
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Client could not be configured
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl RestError {
    /// Create an API error from error strings returned by Kraken
    pub fn from_api_errors(errors: Vec<String>) -> Self {
        match ApiErrors::from_messages(errors) {
            Some(errors) => Self::Api(errors),
            None => Self::Decode("error list is empty".to_string()),
        }
    }

    /// Which part of the call failed
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) | Self::Transport(_) | Self::HttpStatus { .. } => ErrorKind::Transport,
            Self::Api(_) => ErrorKind::Application,
            Self::Decode(_) => ErrorKind::Decode,
            Self::AuthRequired
            | Self::Auth(_)
            | Self::InvalidParameter(_)
            | Self::InvalidConfig(_) => ErrorKind::Configuration,
        }
    }

    /// Kraken's error strings, if this is an application error
    pub fn api_errors(&self) -> Option<&ApiErrors> {
        match self {
            Self::Api(errors) => Some(errors),
            _ => None,
        }
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api(errors) if errors.is_rate_limited())
            || matches!(self, Self::HttpStatus { status: 429, .. })
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<ApiErrors> for RestError {
    fn from(errors: ApiErrors) -> Self {
        Self::Api(errors)
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
