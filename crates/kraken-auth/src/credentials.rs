//! API credentials for Kraken private endpoints
//!
//! # Security
//!
//! Private keys are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretBox};

use crate::error::{AuthError, AuthResult};
use crate::signer::{decode_secret, sign_with_key};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "KRAKEN_API_KEY";
/// Environment variable holding the base64 private key
pub const PRIVATE_KEY_ENV: &str = "KRAKEN_PRIVATE_KEY";

/// API credentials for authenticated requests
///
/// The private key is decoded once, at construction, so an invalid secret
/// is reported before any request is built. Credentials are immutable and
/// can be shared freely between threads.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// Private key (decoded from base64, zeroized on drop)
    private_key: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from API key and private key
    ///
    /// # Arguments
    /// * `api_key` - Your Kraken API key
    /// * `private_key` - Your private key (base64 encoded string)
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] if the API key is empty, or the
    /// private key is not valid base64 or decodes to nothing.
    pub fn new(api_key: impl Into<String>, private_key: impl AsRef<str>) -> AuthResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }

        let decoded = decode_secret(private_key.as_ref())?;

        Ok(Self {
            api_key,
            private_key: SecretBox::new(Box::new(decoded)),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `KRAKEN_API_KEY` and `KRAKEN_PRIVATE_KEY` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let private_key = std::env::var(PRIVATE_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(PRIVATE_KEY_ENV.to_string()))?;

        Self::new(api_key, private_key)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a request for Kraken's API
    ///
    /// # Arguments
    /// * `path` - API endpoint path (e.g., "/0/private/Balance")
    /// * `nonce` - Nonce for this request, also present in `post_data`
    /// * `post_data` - URL-encoded POST body
    ///
    /// # Returns
    /// Base64-encoded signature for the `API-Sign` header
    pub fn sign(&self, path: &str, nonce: u64, post_data: &str) -> AuthResult<String> {
        sign_with_key(self.private_key.expose_secret(), path, nonce, post_data)
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretBox with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            private_key: SecretBox::new(Box::new(self.private_key.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::sign;

    const SECRET: &str = "dGVzdF9wcml2YXRlX2tleQ==";

    #[test]
    fn test_credentials_debug_redacts_key() {
        let creds = Credentials::new("test_api_key", SECRET).unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("test_private_key"));
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_invalid_private_key_rejected() {
        let err = Credentials::new("key", "%%% not base64 %%%").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = Credentials::new("  ", SECRET).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[test]
    fn test_blank_private_key_rejected() {
        for secret in ["", "   ", "\n"] {
            let err = Credentials::new("key", secret).unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials(_)), "{:?}", secret);
        }
    }

    #[test]
    fn test_sign_matches_free_function() {
        let creds = Credentials::new("API_KEY", SECRET).unwrap();
        let via_creds = creds.sign("/0/private/Balance", 42, "nonce=42").unwrap();
        let direct = sign(SECRET, "/0/private/Balance", 42, "nonce=42").unwrap();
        assert_eq!(via_creds, direct);
    }

    #[test]
    fn test_clone_signs_identically() {
        let creds = Credentials::new("API_KEY", SECRET).unwrap();
        let cloned = creds.clone();
        assert_eq!(cloned.api_key(), "API_KEY");
        assert_eq!(
            creds.sign("/0/private/Balance", 7, "nonce=7").unwrap(),
            cloned.sign("/0/private/Balance", 7, "nonce=7").unwrap()
        );
    }
}
