//! MCP wire protocol
//!
//! JSON-RPC envelope types and the protocol version this server speaks.

pub mod message;

pub use message::{
    is_json_rpc_request, CallToolParams, GetPromptParams, InitializeParams, JsonRpcErrorObject,
    JsonRpcRequest, JsonRpcResponse, PaginatedParams, ReadResourceParams, RequestId,
    ResponsePayload, JSONRPC_VERSION,
};

/// Protocol versions this server can speak, most preferred first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-03-26"];

/// The version reported from `initialize`.
pub const PROTOCOL_VERSION: &str = SUPPORTED_PROTOCOL_VERSIONS[0];

/// Well-known MCP method names
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const PING: &str = "ping";
    pub const NOTIFICATION_INITIALIZED: &str = "notifications/initialized";
    pub const PROMPTS_LIST: &str = "prompts/list";
    pub const PROMPTS_GET: &str = "prompts/get";
    pub const RESOURCES_LIST: &str = "resources/list";
    pub const RESOURCES_READ: &str = "resources/read";
    pub const RESOURCES_TEMPLATES_LIST: &str = "resources/templates/list";
    pub const TOOLS_LIST: &str = "tools/list";
    pub const TOOLS_CALL: &str = "tools/call";
}
