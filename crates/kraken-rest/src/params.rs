//! Request parameter lists
//!
//! Kraken takes parameters as a flat list of string pairs, sent as a query
//! string for public calls and as a form body for private ones. Order is
//! preserved, since the signature covers the exact body bytes.

use crate::error::{RestError, RestResult};

/// Ordered list of request parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(&'static str, String)>,
}

impl Params {
    /// Empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter
    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Add a parameter if a value is present
    pub fn with_opt<V: ToString>(mut self, key: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Add a comma-joined list, skipped when empty
    pub fn with_list(mut self, key: &'static str, values: &[&str]) -> Self {
        if !values.is_empty() {
            self.push(key, values.join(","));
        }
        self
    }

    /// Add a boolean flag only when set
    pub fn with_flag(mut self, key: &'static str, flag: bool) -> Self {
        if flag {
            self.push(key, "true");
        }
        self
    }

    /// Append a parameter in place
    pub fn push(&mut self, key: &'static str, value: impl ToString) {
        self.pairs.push((key, value.to_string()));
    }

    /// Value of the first parameter named `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// URL-encode as `k=v&k=v`
    pub fn encode(&self) -> RestResult<String> {
        serde_urlencoded::to_string(&self.pairs)
            .map_err(|e| RestError::InvalidParameter(e.to_string()))
    }

    /// URL-encode with `nonce` as the first field
    pub fn encode_with_nonce(&self, nonce: u64) -> RestResult<String> {
        let mut body: Vec<(&str, &str)> = Vec::with_capacity(self.pairs.len() + 1);
        let nonce = nonce.to_string();
        body.push(("nonce", &nonce));
        body.extend(self.pairs.iter().map(|(k, v)| (*k, v.as_str())));
        serde_urlencoded::to_string(&body).map_err(|e| RestError::InvalidParameter(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_keeps_order() {
        let params = Params::new().with("pair", "XBTUSD").with("interval", 1440);
        assert_eq!(params.encode().unwrap(), "pair=XBTUSD&interval=1440");
    }

    #[test]
    fn test_optional_and_list_params() {
        let params = Params::new()
            .with_opt("since", None::<i64>)
            .with_opt("count", Some(10))
            .with_list("pair", &[])
            .with_list("txid", &["A", "B"])
            .with_flag("trades", false)
            .with_flag("docalcs", true);
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("count"), Some("10"));
        assert_eq!(params.encode().unwrap(), "count=10&txid=A%2CB&docalcs=true");
    }

    #[test]
    fn test_nonce_comes_first() {
        let params = Params::new().with("asset", "XBT");
        assert_eq!(params.encode_with_nonce(42).unwrap(), "nonce=42&asset=XBT");
        assert_eq!(Params::new().encode_with_nonce(7).unwrap(), "nonce=7");
    }

    #[test]
    fn test_values_are_escaped() {
        let params = Params::new().with("key", "my wallet&co");
        assert_eq!(params.encode().unwrap(), "key=my+wallet%26co");
    }
}
