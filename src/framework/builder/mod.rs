//! Server builder.
//!
//! `McpServerBuilder` collects capability declarations and server options, then
//! compiles them into a [`Dispatcher`]. Registration lives in `tool_methods` and
//! `resource_methods`; server-level options live here.

mod resource_methods;
mod tool_methods;


use {
    super::registry::{CapabilityDeclarations, Registry},
    crate::{
        capabilities::{ServerCapabilities, ServerInfo},
        dispatcher::{Dispatcher, ServerConfig},
        error::McpResult,
        limits::PageLimits,
    },
};

/// Fluent declaration surface for an MCP server.
///
/// # Examples
/// ```rust
/// use mcpfetch::{
///     capabilities::ServerInfo,
///     content_types::ToolResult,
///     framework::McpServerBuilder,
///     handler::{ToolCtx, ToolDefinition},
/// };
///
/// # fn main() -> mcpfetch::error::McpResult<()> {
/// let dispatcher = McpServerBuilder::new()
///     .with_server_info(ServerInfo::new("search-server", "1.0.0"))
///     .with_tool(
///         "status",
///         ToolDefinition::new(|_: ToolCtx| async move { Ok(ToolResult::text("ok")) }),
///     )
///     .build()?;
/// # let _ = dispatcher;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct McpServerBuilder {
    pub(super) declarations: CapabilityDeclarations,
    pub(super) config: ServerConfig,
}

impl McpServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity reported from `initialize`; unset fields fall back to defaults.
    pub fn with_server_info(mut self, server_info: ServerInfo) -> Self {
        self.config.server_info = server_info;
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.config.instructions = Some(instructions.into());
        self
    }

    /// Explicit capability flags.
    ///
    /// `tools`, `prompts` and `resources` left unset here are still derived from
    /// what is registered.
    pub fn with_capabilities(mut self, capabilities: ServerCapabilities) -> Self {
        self.config.capabilities = Some(capabilities);
        self
    }

    /// Page sizes for the listing methods. A size of zero is raised to one.
    pub fn with_page_limits(mut self, limits: PageLimits) -> Self {
        self.config.page_limits = PageLimits {
            tools: limits.tools.max(1),
            prompts: limits.prompts.max(1),
            resources: limits.resources.max(1),
            resource_templates: limits.resource_templates.max(1),
        };
        self
    }

    /// Compile the registry and return the dispatcher.
    ///
    /// Fails if a resource template is malformed.
    pub fn build(self) -> McpResult<Dispatcher> {
        let registry = Registry::build(&self.declarations)?;
        Ok(Dispatcher::new(registry, self.config))
    }
}
