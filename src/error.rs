use {
    crate::{
        protocol::{JsonRpcErrorObject, JsonRpcResponse, RequestId},
        validation::SchemaIssue,
    },
    serde_json::{json, Value},
    thiserror::Error,
};

/// JSON-RPC error codes.
///
/// See <https://json-rpc.dev/docs/reference/error-codes>. Only `MethodNotFound`,
/// `ParseError`, `InvalidRequest` and `ServerError` are emitted by the dispatcher;
/// the rest are reserved for transports built on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum JsonRpcErrorCode {
    // Standard
    ParseError = -32700,
    InvalidRequest = -32600,
    MethodNotFound = -32601,
    InvalidParams = -32602,
    InternalError = -32603,
    // Reserved server errors
    ServerError = -32000,
    ServerOverloaded = -32001,
    RateLimitExceeded = -32002,
    SessionExpired = -32003,
    MethodNotReady = -32004,
    // Implementation specific
    InvalidBatchRequest = -32040,
    ContentTypeError = -32050,
    TransportError = -32060,
    TimeoutError = -32070,
}

impl JsonRpcErrorCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Default human readable message for this code
    pub fn message(self) -> &'static str {
        match self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid Request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
            Self::ServerError => "Server error",
            Self::ServerOverloaded => "Server overloaded",
            Self::RateLimitExceeded => "Rate limit exceeded",
            Self::SessionExpired => "Session expired",
            Self::MethodNotReady => "Method not ready",
            Self::InvalidBatchRequest => "Invalid batch request",
            Self::ContentTypeError => "Content type error",
            Self::TransportError => "Transport error",
            Self::TimeoutError => "Timeout",
        }
    }
}

#[derive(Debug, Error)]
pub enum McpError {
    // Protocol Errors
    #[error("Method not found: {0}")]
    UnknownMethod(String),

    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    // Lookup Errors
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    #[error("Prompt not found: {0}")]
    UnknownPrompt(String),

    #[error("Resource not found: {0}")]
    UnknownResource(String),

    // Capability Errors
    #[error("Validation error: {} issue(s)", .0.len())]
    Validation(Vec<SchemaIssue>),

    #[error("Handler failed: {0:#}")]
    Handler(anyhow::Error),

    #[error("Handler panicked: {0}")]
    HandlerPanicked(String),

    // Configuration Errors
    #[error("Invalid URI template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    // JSON Errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Internal Errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl McpError {
    /// Convert to JSON-RPC error code.
    ///
    /// Everything except an unknown top-level method is reported as the generic
    /// server error. Lookup, validation and handler failures differ only in
    /// `error.data`.
    pub fn error_code(&self) -> JsonRpcErrorCode {
        match self {
            Self::UnknownMethod(_) => JsonRpcErrorCode::MethodNotFound,
            _ => JsonRpcErrorCode::ServerError,
        }
    }

    /// Short stable name of the failure category
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownMethod(_) => "UnknownMethod",
            Self::MissingParam(_) => "MissingParam",
            Self::InvalidParams(_) => "InvalidParams",
            Self::UnknownTool(_) => "UnknownTool",
            Self::UnknownPrompt(_) => "UnknownPrompt",
            Self::UnknownResource(_) => "UnknownResource",
            Self::Validation(_) => "ValidationError",
            Self::Handler(_) => "HandlerError",
            Self::HandlerPanicked(_) => "HandlerPanicked",
            Self::InvalidTemplate { .. } => "InvalidTemplate",
            Self::Json(_) => "JsonError",
            Self::Internal(_) => "InternalError",
        }
    }

    /// Serialized description of the failure, carried as `error.data`.
    pub fn error_data(&self) -> Value {
        let mut data = json!({
            "name": self.kind(),
            "message": self.to_string(),
        });

        let cause = match self {
            Self::Validation(issues) => Some(json!(issues)),
            Self::Handler(err) => {
                let chain: Vec<String> = err.chain().skip(1).map(|c| c.to_string()).collect();
                (!chain.is_empty()).then(|| json!(chain))
            }
            _ => None,
        };
        if let Some(cause) = cause {
            data["cause"] = cause;
        }

        data
    }

    /// Create JSON-RPC error response
    pub fn to_json_rpc_error(&self, id: Option<RequestId>) -> JsonRpcResponse {
        let code = self.error_code();
        JsonRpcResponse::error(
            id,
            JsonRpcErrorObject {
                code: code.code(),
                message: code.message().to_string(),
                data: Some(self.error_data()),
            },
        )
    }
}

impl From<anyhow::Error> for McpError {
    fn from(err: anyhow::Error) -> Self {
        McpError::Handler(err)
    }
}

// Result type alias for convenience
pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_codes() {
        assert_eq!(McpError::UnknownMethod("x".into()).error_code().code(), -32601);
        assert_eq!(McpError::UnknownTool("x".into()).error_code().code(), -32000);
        assert_eq!(McpError::Validation(vec![]).error_code().code(), -32000);
        assert_eq!(McpError::MissingParam("name").error_code().code(), -32000);
        assert_eq!(JsonRpcErrorCode::TimeoutError.code(), -32070);
    }

    #[test]
    fn test_validation_data_carries_issues() {
        let err = McpError::Validation(vec![SchemaIssue::new("missing field `query`")]);
        let data = err.error_data();

        assert_eq!(data["name"], "ValidationError");
        assert_eq!(data["cause"][0]["message"], "missing field `query`");
    }

    #[test]
    fn test_handler_data_carries_context_chain() {
        let inner: anyhow::Result<()> = Err(anyhow::anyhow!("disk full"));
        let err = McpError::from(inner.context("writing report").unwrap_err());
        let data = err.error_data();

        assert_eq!(data["name"], "HandlerError");
        assert_eq!(data["message"], "Handler failed: writing report: disk full");
        assert_eq!(data["cause"][0], "disk full");
    }

    #[test]
    fn test_to_json_rpc_error_preserves_id() {
        let response = McpError::UnknownPrompt("greet".into())
            .to_json_rpc_error(Some(RequestId::from(9)));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["id"], 9);
        assert_eq!(value["error"]["code"], -32000);
        assert_eq!(value["error"]["message"], "Server error");
        assert_eq!(value["error"]["data"]["name"], "UnknownPrompt");
    }
}
