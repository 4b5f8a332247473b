//! Kraken request signing
//!
//! Kraken signature algorithm:
//! 1. SHA256(nonce + POST data)
//! 2. HMAC-SHA512(base64-decoded secret, URI path + SHA256 result)
//! 3. Base64 encode the HMAC output
//!
//! The nonce is always supplied by the caller, see [`crate::NonceSource`].

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

use crate::error::{AuthError, AuthResult};

type HmacSha512 = Hmac<Sha512>;

/// Sign a request with a base64-encoded API secret
///
/// # Arguments
/// * `secret` - API private key exactly as issued by Kraken (base64)
/// * `path` - URI path (e.g., "/0/private/AddOrder")
/// * `nonce` - Nonce also present in `post_data`
/// * `post_data` - URL-encoded POST body
///
/// # Errors
/// Returns [`AuthError::InvalidCredentials`] if `secret` is not valid base64.
pub fn sign(secret: &str, path: &str, nonce: u64, post_data: &str) -> AuthResult<String> {
    let key = decode_secret(secret)?;
    sign_with_key(&key, path, nonce, post_data)
}

/// Sign a request with an already decoded secret
pub fn sign_with_key(key: &[u8], path: &str, nonce: u64, post_data: &str) -> AuthResult<String> {
    // Step 1: SHA256(nonce + post_data)
    let mut sha256 = Sha256::new();
    sha256.update(nonce.to_string().as_bytes());
    sha256.update(post_data.as_bytes());
    let digest = sha256.finalize();

    // Step 2: HMAC-SHA512(key, path + digest)
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| AuthError::InvalidCredentials(format!("Unusable HMAC key: {}", e)))?;
    mac.update(path.as_bytes());
    mac.update(&digest);

    // Step 3: Base64 encode
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Decode a base64 API secret into raw key bytes
pub(crate) fn decode_secret(secret: &str) -> AuthResult<Vec<u8>> {
    let key = BASE64
        .decode(secret.trim())
        .map_err(|e| AuthError::InvalidCredentials(format!("Invalid base64 private key: {}", e)))?;
    if key.is_empty() {
        return Err(AuthError::InvalidCredentials("private key is empty".to_string()));
    }
    Ok(key)
}
