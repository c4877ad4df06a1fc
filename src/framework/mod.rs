//! Declaration surface and capability registry.
//!
//! Hosts declare tools, prompts, resources and resource templates through
//! [`McpServerBuilder`]. `build()` turns the declarations into an immutable
//! [`Registry`] and wraps it in a [`Dispatcher`](crate::dispatcher::Dispatcher).
//!
//! # Quick Start
//!
//! ```rust
//! use mcpfetch::{
//!     content_types::{ResourceResult, ToolResult},
//!     framework::McpServerBuilder,
//!     handler::{ResourceTemplateCtx, ResourceTemplateDefinition, ToolDefinition},
//!     protocol::JsonRpcRequest,
//! };
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(JsonSchema, Deserialize)]
//! struct CalculateInput {
//!     a: f64,
//!     b: f64,
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let dispatcher = McpServerBuilder::new()
//!         .with_tool(
//!             "add",
//!             ToolDefinition::typed(|input: CalculateInput| async move {
//!                 Ok(ToolResult::text((input.a + input.b).to_string()))
//!             }),
//!         )
//!         .with_resource_template(
//!             "user",
//!             ResourceTemplateDefinition::new("users://{id}", |ctx: ResourceTemplateCtx| async move {
//!                 Ok(ResourceResult::text(ctx.uri, "text/plain", format!("user {}", ctx.params["id"])))
//!             }),
//!         )
//!         .build()?;
//!
//!     let response = dispatcher
//!         .dispatch(JsonRpcRequest::new(1, "tools/call", Some(json!({
//!             "name": "add",
//!             "arguments": {"a": 1.0, "b": 2.0}
//!         }))))
//!         .await;
//!     assert!(response.is_some());
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod registry;

pub use builder::McpServerBuilder;
pub use registry::{CapabilityDeclarations, Registry};
