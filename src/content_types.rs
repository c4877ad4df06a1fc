//! Typed MCP result payloads
//!
//! Concrete result shapes for each capability kind, so handlers return data that
//! is already in MCP wire format instead of loosely typed JSON.
//!
//! ```rust
//! use mcpfetch::content_types::{McpContent, ToolResult};
//!
//! let result = ToolResult::new(vec![McpContent::text("Hello world")]);
//! assert!(!result.is_error);
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single piece of content in a tool result or prompt message.
///
/// @see https://modelcontextprotocol.io/specification/2025-03-26/server/tools#tool-result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum McpContent {
    /// Plain text content
    Text { text: String },

    /// Image content
    Image {
        /// Base64 encoded image data
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },

    /// Audio content
    Audio {
        /// Base64 encoded audio data
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },

    /// Embedded resource
    Resource { resource: ResourceData },
}

impl McpContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::Image {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn audio(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::Audio {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn resource(resource: ResourceData) -> Self {
        Self::Resource { resource }
    }
}

/// Contents of a resource, either textual or a base64 blob.
///
/// @see https://modelcontextprotocol.io/specification/2025-03-26/server/resources#resource-contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ResourceData {
    Text {
        uri: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
        text: String,
    },
    Blob {
        uri: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
        blob: String,
    },
}

impl ResourceData {
    pub fn text(uri: impl Into<String>, mime_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Text {
            uri: uri.into(),
            mime_type: mime_type.into(),
            text: text.into(),
        }
    }

    pub fn blob(uri: impl Into<String>, mime_type: impl Into<String>, blob: impl Into<String>) -> Self {
        Self::Blob {
            uri: uri.into(),
            mime_type: mime_type.into(),
            blob: blob.into(),
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            Self::Text { uri, .. } | Self::Blob { uri, .. } => uri,
        }
    }
}

/// Result of `tools/call`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub content: Vec<McpContent>,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    pub fn new(content: Vec<McpContent>) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create a simple text response
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![McpContent::text(text)])
    }

    /// A result the model should see as a failed call.
    ///
    /// This is not a protocol error: the response still carries `result`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![McpContent::text(message)],
            is_error: true,
        }
    }

    pub fn with_content(mut self, content: McpContent) -> Self {
        self.content.push(content);
        self
    }
}

/// Result of `resources/read`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceResult {
    pub contents: Vec<ResourceData>,
}

impl ResourceResult {
    pub fn new(contents: Vec<ResourceData>) -> Self {
        Self { contents }
    }

    pub fn text(uri: impl Into<String>, mime_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(vec![ResourceData::text(uri, mime_type, text)])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PromptMessage {
    pub role: Role,
    pub content: McpContent,
}

impl PromptMessage {
    pub fn new(role: Role, content: McpContent) -> Self {
        Self { role, content }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, McpContent::text(text))
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, McpContent::text(text))
    }
}

/// Result of `prompts/get`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PromptResult {
    pub description: String,
    pub messages: Vec<PromptMessage>,
}

impl PromptResult {
    pub fn new(description: impl Into<String>, messages: Vec<PromptMessage>) -> Self {
        Self {
            description: description.into(),
            messages,
        }
    }
}
