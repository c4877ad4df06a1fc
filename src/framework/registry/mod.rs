//! Capability registry.
//!
//! The registry is built once from the declared capability maps and never mutated
//! afterwards. Every entry gets a resolved name (its explicit `name`, or the key it
//! was declared under). Tools and prompts are kept in declaration order alongside a
//! name index; resources and resource templates share one ordered list, which is
//! both the match precedence for `resources/read` and the pagination order.

mod listing;
mod resource_registration;
mod tool_registration;

pub use listing::{PromptArgument, PromptInfo, ResourceInfo, ResourceTemplateInfo, ToolInfo};
pub use resource_registration::{RegisteredResource, RegisteredTemplate, ResourceEntry, ResourceMatch};
pub use tool_registration::{RegisteredPrompt, RegisteredTool};

use crate::{
    error::McpResult,
    handler::{PromptDefinition, ResourceDeclaration, ToolDefinition},
    logging,
};
use std::collections::HashMap;

/// Declared capabilities, keyed by string, in declaration order.
///
/// Inserting a key that already exists replaces the earlier value in place, so the
/// key keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct CapabilityDeclarations {
    pub tools: Vec<(String, ToolDefinition)>,
    pub prompts: Vec<(String, PromptDefinition)>,
    pub resources: Vec<(String, ResourceDeclaration)>,
}

impl CapabilityDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_tool(&mut self, key: impl Into<String>, tool: ToolDefinition) {
        upsert(&mut self.tools, key.into(), tool);
    }

    pub fn insert_prompt(&mut self, key: impl Into<String>, prompt: PromptDefinition) {
        upsert(&mut self.prompts, key.into(), prompt);
    }

    pub fn insert_resource(&mut self, key: impl Into<String>, resource: impl Into<ResourceDeclaration>) {
        upsert(&mut self.resources, key.into(), resource.into());
    }
}

fn upsert<T>(entries: &mut Vec<(String, T)>, key: String, value: T) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some((_, slot)) => *slot = value,
        None => entries.push((key, value)),
    }
}

/// Name-resolved, lookup-ready view of every declared capability.
#[derive(Debug, Default)]
pub struct Registry {
    tools: Vec<RegisteredTool>,
    tool_index: HashMap<String, usize>,
    prompts: Vec<RegisteredPrompt>,
    prompt_index: HashMap<String, usize>,
    resources: Vec<ResourceEntry>,
}

impl Registry {
    /// Resolve names and compile resource templates.
    ///
    /// Fails only on a malformed URI template.
    pub fn build(declarations: &CapabilityDeclarations) -> McpResult<Self> {
        let mut registry = Self::default();

        for (key, tool) in &declarations.tools {
            registry.register_tool(key, tool.clone());
        }
        for (key, prompt) in &declarations.prompts {
            registry.register_prompt(key, prompt.clone());
        }
        for (key, resource) in &declarations.resources {
            registry.register_resource(key, resource.clone())?;
        }

        logging::log_registry_built(
            registry.tools.len(),
            registry.prompts.len(),
            registry.static_resources().count(),
            registry.resource_templates().count(),
        );
        Ok(registry)
    }

    /// Look up a tool by resolved name. The earliest declaration wins on collision.
    pub fn tool(&self, name: &str) -> Option<&RegisteredTool> {
        self.tool_index.get(name).map(|&idx| &self.tools[idx])
    }

    /// Look up a prompt by resolved name. The earliest declaration wins on collision.
    pub fn prompt(&self, name: &str) -> Option<&RegisteredPrompt> {
        self.prompt_index.get(name).map(|&idx| &self.prompts[idx])
    }

    /// Tools in declaration order
    pub fn tools(&self) -> &[RegisteredTool] {
        &self.tools
    }

    /// Prompts in declaration order
    pub fn prompts(&self) -> &[RegisteredPrompt] {
        &self.prompts
    }

    /// Static resources and templates, interleaved in declaration order
    pub fn resources(&self) -> &[ResourceEntry] {
        &self.resources
    }

    pub fn static_resources(&self) -> impl Iterator<Item = &RegisteredResource> {
        self.resources.iter().filter_map(|entry| match entry {
            ResourceEntry::Static(resource) => Some(resource),
            ResourceEntry::Template(_) => None,
        })
    }

    pub fn resource_templates(&self) -> impl Iterator<Item = &RegisteredTemplate> {
        self.resources.iter().filter_map(|entry| match entry {
            ResourceEntry::Template(template) => Some(template),
            ResourceEntry::Static(_) => None,
        })
    }

    pub fn has_tools(&self) -> bool {
        !self.tools.is_empty()
    }

    pub fn has_prompts(&self) -> bool {
        !self.prompts.is_empty()
    }

    pub fn has_resources(&self) -> bool {
        !self.resources.is_empty()
    }
}
