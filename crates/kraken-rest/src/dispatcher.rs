//! Request dispatch
//!
//! One call goes through BUILD, SIGN (private only), SEND and DECODE. Public
//! calls are `GET {base}/{version}/public/{name}?{params}`. Private calls are
//! `POST {base}/{version}/private/{name}` with a `nonce=..&params` form body
//! and `API-Key`/`API-Sign` headers.

use std::sync::Arc;

use kraken_auth::{Credentials, NonceSource};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::envelope::{decode, decode_with_cursor, ApiResponse, WithCursor};
use crate::error::{RestError, RestResult};
use crate::method::{descriptor_for, KrakenMethod, MethodDescriptor, Visibility};
use crate::params::Params;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const MAX_ERROR_BODY: usize = 512;

/// Signing state for one credential pair
struct Signing {
    credentials: Credentials,
    nonces: NonceSource,
    // Held from nonce acquisition until the transport returns, so nonces
    // reach the exchange in the order they were issued.
    gate: Mutex<()>,
}

/// Executes registry operations over a transport
pub struct Dispatcher {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    api_version: String,
    signing: Option<Signing>,
}

impl Dispatcher {
    /// Create a dispatcher
    ///
    /// Without credentials only public operations can be called.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
        api_version: impl Into<String>,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_version: api_version.into(),
            signing: credentials.map(|credentials| Signing {
                credentials,
                nonces: NonceSource::new(),
                gate: Mutex::new(()),
            }),
        }
    }

    /// Check if credentials are configured
    pub fn has_credentials(&self) -> bool {
        self.signing.is_some()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Last nonce sent, if any private call was made
    pub fn last_nonce(&self) -> Option<u64> {
        self.signing.as_ref().and_then(|s| s.nonces.last())
    }

    /// Call an operation whose result decodes directly into `T`
    #[instrument(skip(self, method, params), fields(method = %method))]
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: KrakenMethod,
        params: Params,
    ) -> RestResult<T> {
        let descriptor = descriptor_for(method);
        debug_assert!(
            !descriptor.cursor,
            "{} returns a cursor, use call_with_cursor",
            method
        );
        let response = self.execute(descriptor, &params).await?;
        decode(&response.body)
    }

    /// Call an operation whose result carries a pagination cursor
    #[instrument(skip(self, method, params), fields(method = %method))]
    pub async fn call_with_cursor<T: DeserializeOwned>(
        &self,
        method: KrakenMethod,
        params: Params,
    ) -> RestResult<WithCursor<T>> {
        let descriptor = descriptor_for(method);
        debug_assert!(
            descriptor.cursor,
            "{} has no cursor, use call",
            method
        );
        let response = self.execute(descriptor, &params).await?;
        decode_with_cursor(&response.body)
    }

    async fn execute(
        &self,
        descriptor: &MethodDescriptor,
        params: &Params,
    ) -> RestResult<HttpResponse> {
        let response = match descriptor.visibility {
            Visibility::Public => {
                let request = self.build_public(descriptor, params)?;
                debug!(url = %request.url, "Sending public request");
                self.transport.send(request).await?
            }
            Visibility::Private => {
                let signing = self.signing.as_ref().ok_or(RestError::AuthRequired)?;
                let _gate = signing.gate.lock().await;
                let request = self.build_private(signing, descriptor, params)?;
                debug!(path = %descriptor.path(&self.api_version), "Sending private request");
                self.transport.send(request).await?
            }
        };

        check_status(response)
    }

    fn build_public(&self, descriptor: &MethodDescriptor, params: &Params) -> RestResult<HttpRequest> {
        let mut url = format!("{}{}", self.base_url, descriptor.path(&self.api_version));
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.encode()?);
        }

        Ok(HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        })
    }

    fn build_private(
        &self,
        signing: &Signing,
        descriptor: &MethodDescriptor,
        params: &Params,
    ) -> RestResult<HttpRequest> {
        let path = descriptor.path(&self.api_version);
        let nonce = signing.nonces.next();
        let body = params.encode_with_nonce(nonce)?;
        let signature = signing.credentials.sign(&path, nonce, &body)?;

        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{}", self.base_url, path),
            headers: vec![
                ("API-Key", signing.credentials.api_key().to_string()),
                ("API-Sign", signature),
                ("Content-Type", FORM_CONTENT_TYPE.to_string()),
            ],
            body: Some(body),
        })
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

// A non-2xx response still goes to the decoder when its body is an
// envelope, so exchange errors are reported as such.
fn check_status(response: HttpResponse) -> RestResult<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }

    warn!(status = response.status, "Non-success HTTP status");
    match serde_json::from_slice::<ApiResponse<Value>>(&response.body) {
        Ok(envelope) if !envelope.error.is_empty() || envelope.result.is_some() => {
            return Ok(response)
        }
        _ => {}
    }

    let mut body = response.text();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    Err(RestError::HttpStatus {
        status: response.status,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_envelope_error_status() {
        let response = HttpResponse {
            status: 503,
            body: b"<html>Service Unavailable</html>".to_vec(),
        };
        match check_status(response) {
            Err(RestError::HttpStatus { status, body }) => {
                assert_eq!(status, 503);
                assert!(body.contains("Service Unavailable"));
            }
            other => panic!("unexpected {:?}", other.map(|r| r.status)),
        }
    }

    #[test]
    fn test_envelope_error_status_passes_through() {
        let response = HttpResponse {
            status: 400,
            body: br#"{"error":["EGeneral:Invalid arguments"]}"#.to_vec(),
        };
        assert_eq!(check_status(response).unwrap().status, 400);
    }

    #[test]
    fn test_long_error_body_truncated() {
        let response = HttpResponse {
            status: 500,
            body: "é".repeat(1000).into_bytes(),
        };
        match check_status(response) {
            Err(RestError::HttpStatus { body, .. }) => assert!(body.len() <= MAX_ERROR_BODY),
            other => panic!("unexpected {:?}", other.map(|r| r.status)),
        }
    }
}
