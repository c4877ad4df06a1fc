//! Tool and prompt registration for McpServerBuilder.

use {
    super::McpServerBuilder,
    crate::handler::{PromptDefinition, ToolDefinition},
};

impl McpServerBuilder {
    /// Register a tool under `key`.
    ///
    /// The tool is called by its explicit `name` when it has one, otherwise by
    /// `key`. Registering the same key twice replaces the earlier tool but keeps
    /// its position in `tools/list`.
    ///
    /// # Examples
    /// ```rust
    /// use mcpfetch::{content_types::ToolResult, framework::McpServerBuilder, handler::ToolDefinition};
    /// use schemars::JsonSchema;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize, JsonSchema)]
    /// struct FetchInput {
    ///     url: String,
    /// }
    ///
    /// let builder = McpServerBuilder::new().with_tool(
    ///     "fetch",
    ///     ToolDefinition::typed(|input: FetchInput| async move {
    ///         Ok(ToolResult::text(format!("fetched {}", input.url)))
    ///     })
    ///     .with_description("Fetch a URL"),
    /// );
    /// ```
    pub fn with_tool(mut self, key: impl Into<String>, tool: ToolDefinition) -> Self {
        self.declarations.insert_tool(key, tool);
        self
    }

    /// Register several tools at once, in iteration order.
    pub fn with_tools<K, I>(mut self, tools: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ToolDefinition)>,
    {
        for (key, tool) in tools {
            self.declarations.insert_tool(key, tool);
        }
        self
    }

    /// Register a prompt under `key`, with the same naming rules as tools.
    pub fn with_prompt(mut self, key: impl Into<String>, prompt: PromptDefinition) -> Self {
        self.declarations.insert_prompt(key, prompt);
        self
    }
}
