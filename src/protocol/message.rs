//! JSON-RPC 2.0 envelope types
//!
//! Request, response and notification shapes as used by the MCP method surface.
//! Parameters are kept as raw JSON and decoded per method by the dispatcher, so
//! an unknown method never fails on its params. Positional (array) params are
//! accepted on the envelope and read as an empty object.

use {
    crate::error::{JsonRpcErrorCode, McpError, McpResult},
    serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize},
    serde_json::{Map, Number, Value},
    std::fmt,
};

pub const JSONRPC_VERSION: &str = "2.0";

/// Request identifier.
///
/// Numbers keep their original representation so fractional and unsigned ids
/// are echoed back unchanged. An explicit `null` id is still a request; only
/// an absent id marks a notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(Number),
    String(String),
    Null,
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// https://modelcontextprotocol.io/specification/draft/basic#requests
///
/// A request without an `id` is a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, deserialize_with = "present_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A present `id` member, `null` included, is always `Some`.
fn present_id<'de, D>(deserializer: D) -> Result<Option<RequestId>, D::Error>
where
    D: Deserializer<'de>,
{
    RequestId::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    pub fn new(id: i64, method: &str, params: Option<Value>) -> Self {
        Self::with_id(id.into(), method, params)
    }

    pub fn with_id(id: RequestId, method: &str, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            method: method.to_string(),
            params,
        }
    }

    pub fn notification(method: &str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: None,
            method: method.to_string(),
            params: None,
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Decode a request out of an arbitrary JSON body.
    ///
    /// Returns `InvalidRequest` unless the body has `jsonrpc: "2.0"` and a
    /// string `method`.
    pub fn from_value(body: Value) -> Result<Self, JsonRpcErrorCode> {
        if !is_json_rpc_request(&body) {
            return Err(JsonRpcErrorCode::InvalidRequest);
        }
        serde_json::from_value(body).map_err(|_| JsonRpcErrorCode::InvalidRequest)
    }

    /// Named params, if the request carries an object
    fn named_params(&self) -> Option<&Map<String, Value>> {
        self.params.as_ref().and_then(Value::as_object)
    }

    /// Look up a single parameter by key.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.named_params().and_then(|p| p.get(key))
    }

    /// Decode the whole params object into a typed parameter struct.
    ///
    /// Missing or positional params decode as an empty object.
    pub fn parse_params<T: DeserializeOwned>(&self) -> McpResult<T> {
        let params = Value::Object(self.named_params().cloned().unwrap_or_default());
        serde_json::from_value(params).map_err(|e| {
            McpError::InvalidParams(format!("Invalid {} params: {}", self.method, e))
        })
    }
}

/// Shallow shape check performed before dispatching a raw body.
pub fn is_json_rpc_request(body: &Value) -> bool {
    body.get("jsonrpc").and_then(Value::as_str) == Some(JSONRPC_VERSION)
        && body.get("method").map(Value::is_string).unwrap_or(false)
}

/// https://modelcontextprotocol.io/specification/draft/basic#error-responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePayload {
    Result(Value),
    Error(JsonRpcErrorObject),
}

/// https://modelcontextprotocol.io/specification/draft/basic#responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<RequestId>,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

impl JsonRpcResponse {
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            payload: ResponsePayload::Result(result),
        }
    }

    pub fn error(id: Option<RequestId>, error: JsonRpcErrorObject) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            payload: ResponsePayload::Error(error),
        }
    }

    /// Error response with the default message for `code`
    pub fn from_code(id: Option<RequestId>, code: JsonRpcErrorCode, data: Option<Value>) -> Self {
        Self::error(
            id,
            JsonRpcErrorObject {
                code: code.code(),
                message: code.message().to_string(),
                data,
            },
        )
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.payload {
            ResponsePayload::Result(result) => Some(result),
            ResponsePayload::Error(_) => None,
        }
    }

    pub fn error_object(&self) -> Option<&JsonRpcErrorObject> {
        match &self.payload {
            ResponsePayload::Error(error) => Some(error),
            ResponsePayload::Result(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.payload, ResponsePayload::Error(_))
    }
}

/// `initialize` params. Every field is optional; the server does not branch on them.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    #[serde(default)]
    pub protocol_version: Option<String>,
    #[serde(default)]
    pub capabilities: Option<Value>,
    #[serde(default)]
    pub client_info: Option<Value>,
}

/// Params shared by every `*/list` method
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PaginatedParams {
    #[serde(default)]
    pub cursor: Option<Value>,
}

/// `tools/call` params
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CallToolParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// `prompts/get` params
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GetPromptParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// `resources/read` params
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReadResourceParams {
    #[serde(default)]
    pub uri: Option<String>,
}
