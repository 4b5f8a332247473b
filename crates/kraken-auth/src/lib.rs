//! Authentication primitives for Kraken's private REST endpoints
//!
//! This crate owns everything needed to authenticate a request: the
//! credential pair, the nonce source that keeps nonces strictly increasing
//! for that pair, and the HMAC-SHA512 signer.
//!
//! # Example
//!
//! ```no_run
//! use kraken_auth::{Credentials, NonceSource};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::from_env()?;
//! let nonces = NonceSource::new();
//!
//! let nonce = nonces.next();
//! let body = format!("nonce={}", nonce);
//! let signature = creds.sign("/0/private/Balance", nonce, &body)?;
//! println!("API-Sign: {}", signature);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod nonce;
mod signer;

pub use credentials::{Credentials, API_KEY_ENV, PRIVATE_KEY_ENV};
pub use error::{AuthError, AuthResult};
pub use nonce::NonceSource;
pub use signer::{sign, sign_with_key};
