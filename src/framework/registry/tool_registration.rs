//! Tool and prompt registration.
//!
//! Both kinds are looked up by resolved name, so they share the same shape: an
//! ordered entry list plus a name index where the first declaration of a name wins.

use {
    super::{
        listing::{prompt_arguments, PromptInfo, ToolInfo},
        Registry,
    },
    crate::{
        handler::{PromptDefinition, ToolDefinition},
        validation::render_json_schema,
    },
    std::collections::hash_map::Entry,
    tracing::warn,
};

/// A tool with its resolved name
#[derive(Debug, Clone)]
pub struct RegisteredTool {
    /// Key the tool was declared under
    pub key: String,
    /// Explicit `name`, or `key` when none was given
    pub name: String,
    pub definition: ToolDefinition,
}

impl RegisteredTool {
    /// `tools/list` entry
    pub fn describe(&self) -> ToolInfo {
        ToolInfo {
            name: self.name.clone(),
            title: self.definition.title.clone(),
            description: self.definition.description.clone(),
            input_schema: render_json_schema(self.definition.input_schema.as_ref()),
        }
    }
}

/// A prompt with its resolved name
#[derive(Debug, Clone)]
pub struct RegisteredPrompt {
    pub key: String,
    pub name: String,
    pub definition: PromptDefinition,
}

impl RegisteredPrompt {
    /// `prompts/list` entry
    pub fn describe(&self) -> PromptInfo {
        let args_schema = render_json_schema(self.definition.args_schema.as_ref());
        PromptInfo {
            name: self.name.clone(),
            title: self.definition.title.clone(),
            description: self.definition.description.clone(),
            arguments: prompt_arguments(&args_schema),
            args_schema,
        }
    }
}

pub(super) fn resolve_name(key: &str, explicit: Option<&str>) -> String {
    match explicit {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => key.to_string(),
    }
}

impl Registry {
    pub(super) fn register_tool(&mut self, key: &str, definition: ToolDefinition) {
        let name = resolve_name(key, definition.name.as_deref());
        let idx = self.tools.len();

        match self.tool_index.entry(name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
            Entry::Occupied(existing) => {
                warn!(
                    tool = %name,
                    key = %key,
                    shadowed_by = %self.tools[*existing.get()].key,
                    event = "name_collision",
                    "Tool name already registered; earlier declaration wins"
                );
            }
        }

        self.tools.push(RegisteredTool {
            key: key.to_string(),
            name,
            definition,
        });
    }

    pub(super) fn register_prompt(&mut self, key: &str, definition: PromptDefinition) {
        let name = resolve_name(key, definition.name.as_deref());
        let idx = self.prompts.len();

        match self.prompt_index.entry(name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
            Entry::Occupied(existing) => {
                warn!(
                    prompt = %name,
                    key = %key,
                    shadowed_by = %self.prompts[*existing.get()].key,
                    event = "name_collision",
                    "Prompt name already registered; earlier declaration wins"
                );
            }
        }

        self.prompts.push(RegisteredPrompt {
            key: key.to_string(),
            name,
            definition,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        content_types::{PromptResult, ToolResult},
        handler::{PromptCtx, ToolCtx},
    };
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::json;

    #[allow(dead_code)]
    #[derive(Deserialize, JsonSchema)]
    struct GreetArgs {
        /// Who to greet
        name: String,
        formal: Option<bool>,
    }

    #[test]
    fn test_empty_explicit_name_falls_back_to_key() {
        assert_eq!(resolve_name("key", Some("")), "key");
        assert_eq!(resolve_name("key", None), "key");
        assert_eq!(resolve_name("key", Some("named")), "named");
    }

    #[test]
    fn test_tool_without_schema_lists_open_object() {
        let tool = RegisteredTool {
            key: "noop".into(),
            name: "noop".into(),
            definition: ToolDefinition::new(|_: ToolCtx| async move { Ok(ToolResult::text("")) })
                .with_title("No-op"),
        };

        let listed = serde_json::to_value(tool.describe()).unwrap();
        assert_eq!(
            listed,
            json!({
                "name": "noop",
                "title": "No-op",
                "inputSchema": {"type": "object", "properties": {}, "required": []}
            })
        );
    }

    #[test]
    fn test_typed_prompt_lists_arguments() {
        let prompt = RegisteredPrompt {
            key: "greet".into(),
            name: "greet".into(),
            definition: PromptDefinition::typed(|args: GreetArgs| async move {
                Ok(PromptResult::new("greeting", vec![crate::content_types::PromptMessage::user(args.name)]))
            })
            .with_description("Say hello"),
        };

        let info = prompt.describe();
        assert_eq!(info.description.as_deref(), Some("Say hello"));
        assert_eq!(info.arguments.len(), 2);

        let name_arg = info.arguments.iter().find(|a| a.name == "name").unwrap();
        assert!(name_arg.required);
        assert_eq!(name_arg.description.as_deref(), Some("Who to greet"));

        let formal_arg = info.arguments.iter().find(|a| a.name == "formal").unwrap();
        assert!(!formal_arg.required);
        assert_eq!(info.args_schema["type"], "object");
    }
}
