//! Kraken response envelope decoding
//!
//! Every REST response has the shape `{"error": [...], "result": ...}`.
//! A non-empty `error` list always wins over `result`. Some operations
//! (OHLC, Trades, Spread) return a `result` object with one extra scalar
//! entry, the pagination cursor, next to the actual payload.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ApiErrors, RestError, RestResult};

/// Key preferred when a cursor result has more than one scalar entry
const CURSOR_KEY: &str = "last";

/// Generic Kraken API response wrapper
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Error strings (empty on success)
    #[serde(default)]
    pub error: Vec<String>,
    /// Result data
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Convert to result, applying error precedence
    pub fn into_result(self) -> RestResult<T> {
        if let Some(errors) = ApiErrors::from_messages(self.error) {
            return Err(RestError::Api(errors));
        }
        self.result
            .ok_or_else(|| RestError::Decode("response has neither errors nor a result".into()))
    }
}

/// A result together with the pagination cursor Kraken returned with it
#[derive(Debug, Clone, PartialEq)]
pub struct WithCursor<T> {
    /// The payload, without the cursor entry
    pub data: T,
    /// Cursor to pass as `since` on the next call
    pub last: i64,
}

impl<T> WithCursor<T> {
    /// Split into payload and cursor
    pub fn into_parts(self) -> (T, i64) {
        (self.data, self.last)
    }

    /// Transform the payload, keeping the cursor
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WithCursor<U> {
        WithCursor {
            data: f(self.data),
            last: self.last,
        }
    }
}

/// Decode a response body into `T`
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> RestResult<T> {
    let result = decode_result(body)?;
    serde_json::from_value(result).map_err(|e| RestError::Decode(format!("result: {}", e)))
}

/// Decode a response body into `T` plus its trailing cursor
pub fn decode_with_cursor<T: DeserializeOwned>(body: &[u8]) -> RestResult<WithCursor<T>> {
    let result = decode_result(body)?;
    let (rest, last) = split_cursor(result)?;
    let data = serde_json::from_value(Value::Object(rest))
        .map_err(|e| RestError::Decode(format!("result: {}", e)))?;
    Ok(WithCursor { data, last })
}

// The result stays untyped until errors are ruled out, so a malformed
// payload never hides the exchange's error strings.
fn decode_result(body: &[u8]) -> RestResult<Value> {
    let envelope: ApiResponse<Value> = serde_json::from_slice(body)
        .map_err(|e| RestError::Decode(format!("envelope: {}", e)))?;
    match envelope.into_result()? {
        Value::Null => Err(RestError::Decode("result is null".into())),
        value => Ok(value),
    }
}

fn split_cursor(result: Value) -> RestResult<(Map<String, Value>, i64)> {
    let Value::Object(mut map) = result else {
        return Err(RestError::Decode(
            "cursor-bearing result is not an object".into(),
        ));
    };

    let scalars: Vec<&String> = map
        .iter()
        .filter(|(_, v)| v.is_string() || v.is_number())
        .map(|(k, _)| k)
        .collect();

    let key = match scalars.as_slice() {
        [] => return Err(RestError::Decode("result has no cursor entry".into())),
        [only] => (*only).clone(),
        many if many.iter().any(|k| k.as_str() == CURSOR_KEY) => CURSOR_KEY.to_string(),
        many => {
            return Err(RestError::Decode(format!(
                "ambiguous cursor, {} scalar entries in result",
                many.len()
            )))
        }
    };

    let raw = map
        .remove(&key)
        .ok_or_else(|| RestError::Decode("cursor entry vanished".into()))?;
    let last = parse_cursor(&raw)
        .ok_or_else(|| RestError::Decode(format!("cursor `{}` is not an integer: {}", key, raw)))?;

    Ok((map, last))
}

fn parse_cursor(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
