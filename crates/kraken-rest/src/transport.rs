//! HTTP transport abstraction
//!
//! The dispatcher builds fully formed requests and hands them to an
//! [`HttpTransport`]. [`ReqwestTransport`] is the default; tests plug in
//! their own implementation to observe outgoing requests.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{RestError, RestResult};

/// HTTP verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET (public calls)
    Get,
    /// POST (private calls)
    Post,
}

/// A request ready to be sent
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Verb
    pub method: HttpMethod,
    /// Absolute URL including any query string
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(&'static str, String)>,
    /// Form body, for POST
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossy
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one request and returns the raw response
///
/// Implementations must not retry. Any failure to obtain a response is a
/// transport error.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request
    async fn send(&self, request: HttpRequest) -> RestResult<HttpResponse>;
}

/// Transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wrap an existing `reqwest` client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client with the given timeout and user agent
    pub fn with_options(timeout: Duration, user_agent: Option<&str>) -> RestResult<Self> {
        let mut builder = reqwest::Client::builder().timeout(timeout);
        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent);
        }
        let client = builder
            .build()
            .map_err(|e| RestError::InvalidConfig(format!("HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> RestResult<HttpResponse> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: "https://api.kraken.com/0/private/Balance".into(),
            headers: vec![("API-Key", "abc".into())],
            body: None,
        };
        assert_eq!(request.header("api-key"), Some("abc"));
        assert_eq!(request.header("API-Sign"), None);
    }

    #[test]
    fn test_success_range() {
        let ok = HttpResponse { status: 204, body: Vec::new() };
        let bad = HttpResponse { status: 502, body: b"Bad Gateway".to_vec() };
        assert!(ok.is_success());
        assert!(!bad.is_success());
        assert_eq!(bad.text(), "Bad Gateway");
    }

    #[test]
    fn test_build_with_options() {
        let transport = ReqwestTransport::with_options(Duration::from_secs(5), Some("test/1.0"));
        assert!(transport.is_ok());
    }
}
