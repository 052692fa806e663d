//! Minimal JSON-RPC 2.0 envelope types.
//!
//! The relay speaks plain JSON-RPC 2.0 over HTTPS POST. Params are
//! always a one-element array holding a method-specific object.

use crate::RelayError;
use serde::{Deserialize, Serialize};

/// A JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Request<T> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: [T; 1],
}

impl<T: Serialize> Request<T> {
    /// Wrap a method call in a request envelope. The params object is
    /// placed in a one-element array.
    pub const fn new(id: u64, method: &'static str, params: T) -> Self {
        Self { jsonrpc: "2.0", id, method, params: [params] }
    }
}

/// A JSON-RPC 2.0 response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Response<T> {
    /// Echo of the request id.
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    error: Option<ErrorPayload>,
}

impl<T> Response<T> {
    /// Extract the result, surfacing a relay-reported error if present.
    ///
    /// A response with neither `result` nor `error` is malformed and
    /// reported as [`RelayError::MissingResult`].
    pub fn into_result(self) -> Result<T, RelayError> {
        self.into_opt_result()?.ok_or(RelayError::MissingResult)
    }

    /// Extract the result, surfacing a relay-reported error if present
    /// and mapping an absent or `null` result to `None`.
    ///
    /// Cancellation methods return nothing meaningful on success, so an
    /// empty result is a normal outcome for them.
    pub fn into_opt_result(self) -> Result<Option<T>, RelayError> {
        if let Some(error) = self.error {
            return Err(RelayError::Rpc(error));
        }
        Ok(self.result)
    }
}

/// A JSON-RPC 2.0 error object, as reported by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, thiserror::Error)]
#[error("relay returned error {code}: {message}")]
pub struct ErrorPayload {
    /// The error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured error data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::RelayError;

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Params {
        replacement_uuid: &'static str,
    }

    #[test]
    fn request_wire_shape() {
        let request = Request::new(7, "eth_cancelBundle", Params { replacement_uuid: "uuid" });
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"jsonrpc":"2.0","id":7,"method":"eth_cancelBundle","params":[{"replacementUuid":"uuid"}]}"#
        );
    }

    #[test]
    fn response_result_roundtrip() {
        let response: Response<u64> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":7,"result":42}"#).unwrap();
        assert_eq!(response.into_result().unwrap(), 42);
    }

    #[test]
    fn response_error_surfaces() {
        let response: Response<u64> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":7,"error":{"code":-32600,"message":"bad bundle"}}"#,
        )
        .unwrap();
        match response.into_result().unwrap_err() {
            RelayError::Rpc(payload) => {
                assert_eq!(payload.code, -32600);
                assert_eq!(payload.message, "bad bundle");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn null_result_is_none_for_opt() {
        let response: Response<Vec<u64>> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert_eq!(response.into_opt_result().unwrap(), None);
    }
}
