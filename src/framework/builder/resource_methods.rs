//! Resource registration for McpServerBuilder.

use {
    super::McpServerBuilder,
    crate::handler::{ResourceDefinition, ResourceTemplateDefinition},
};

impl McpServerBuilder {
    /// Register a resource served at a fixed URI.
    ///
    /// Static resources and templates share one declaration order, which decides
    /// which entry serves a URI that more than one of them matches.
    pub fn with_resource(mut self, key: impl Into<String>, resource: ResourceDefinition) -> Self {
        self.declarations.insert_resource(key, resource);
        self
    }

    /// Register a resource template. The template is compiled by [`build`](Self::build).
    pub fn with_resource_template(mut self, key: impl Into<String>, template: ResourceTemplateDefinition) -> Self {
        self.declarations.insert_resource(key, template);
        self
    }
}
