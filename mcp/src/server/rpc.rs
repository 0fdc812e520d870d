//! # JSON-RPC envelope
//!
//! Module dedicated to the JSON-RPC 2.0 envelope structures carried
//! over the stdio transport.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON-RPC protocol version.
pub const VERSION: &str = "2.0";

/// Error code for a request that is not valid JSON.
pub const PARSE_ERROR: i64 = -32700;

/// Error code for an unknown method.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Error code for invalid method parameters.
pub const INVALID_PARAMS: i64 = -32602;

/// An incoming JSON-RPC request.
///
/// Requests without an id are notifications and expect no response.
#[derive(Clone, Debug, Deserialize)]
pub struct Request {
    /// The request id, absent for notifications.
    #[serde(default)]
    pub id: Option<Value>,

    /// The method name.
    pub method: String,

    /// The method parameters.
    #[serde(default)]
    pub params: Value,
}

/// The parameters of a tool-invocation request.
#[derive(Clone, Debug, Deserialize)]
pub struct CallToolParams {
    /// The name of the tool to invoke.
    pub name: String,

    /// The tool arguments, as a loosely-typed payload.
    #[serde(default)]
    pub arguments: Value,
}

/// An outgoing JSON-RPC response.
#[derive(Clone, Debug, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

/// The error member of a JSON-RPC response.
#[derive(Clone, Debug, Serialize)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
}

impl Response {
    /// Creates a successful response.
    pub fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Creates an error response.
    pub fn error(id: Value, code: i64, message: impl ToString) -> Self {
        Self {
            jsonrpc: VERSION,
            id,
            result: None,
            error: Some(ResponseError {
                code,
                message: message.to_string(),
            }),
        }
    }
}
