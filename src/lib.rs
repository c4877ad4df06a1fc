//! MCP (Model Context Protocol) Server Library
//!
//! A transport-agnostic MCP server core: a registry of host-declared tools,
//! prompts, resources and resource templates, and a dispatcher that answers
//! JSON-RPC requests against it. Transports hand the dispatcher a request (or a
//! raw body) and write back whatever response it returns.

pub mod capabilities;
pub mod content_types;
pub mod dispatcher;
pub mod error;
pub mod framework;
pub mod handler;
pub mod limits;
pub mod logging;
pub mod pagination;
pub mod protocol;
pub mod uri_template;
pub mod validation;

// Test modules
#[cfg(test)]
mod tests;

// Re-export key types
pub use capabilities::{ServerCapabilities, ServerInfo};
pub use content_types::{McpContent, PromptMessage, PromptResult, ResourceData, ResourceResult, ToolResult};
pub use dispatcher::{dispatch, Dispatcher, ServerConfig};
pub use error::{McpError, McpResult};
pub use framework::{McpServerBuilder, Registry};
pub use handler::{
    PromptCtx, PromptDefinition, ResourceCtx, ResourceDefinition, ResourceTemplateCtx, ResourceTemplateDefinition,
    ToolCtx, ToolDefinition,
};
pub use protocol::{JsonRpcRequest, JsonRpcResponse, RequestId};
pub use validation::{CustomSchema, SchemaAdapter, SchemaIssue, TypedSchema};

// Re-export commonly used external types
pub use schemars::JsonSchema;
