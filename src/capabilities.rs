//! Capability negotiation
//!
//! The advertised capability set is a pure function of what was registered plus
//! the host's explicit overrides. The client's capabilities are accepted but do not
//! change the outcome, and neither does its requested protocol version.

use {
    crate::{framework::Registry, protocol::PROTOCOL_VERSION},
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
    tracing::debug,
};

pub const DEFAULT_SERVER_NAME: &str = "mcp_server";
pub const DEFAULT_SERVER_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChangedCapability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesCapability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribe: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Capabilities advertised in the `initialize` result.
///
/// Every field is optional and omitted from the wire when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experimental: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completions: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<ListChangedCapability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourcesCapability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ListChangedCapability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
}

/// Server identity reported by `initialize`.
///
/// Unset `name` and `version` fall back to [`DEFAULT_SERVER_NAME`] and
/// [`DEFAULT_SERVER_VERSION`] when the result is produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

impl ServerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            version: Some(version.into()),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icons.push(icon);
        self
    }

    pub fn with_website_url(mut self, url: impl Into<String>) -> Self {
        self.website_url = Some(url.into());
        self
    }

    /// Fill unset identity fields with the defaults
    pub fn with_defaults(&self) -> Self {
        let mut merged = self.clone();
        merged.name.get_or_insert_with(|| DEFAULT_SERVER_NAME.to_string());
        merged.version.get_or_insert_with(|| DEFAULT_SERVER_VERSION.to_string());
        merged
    }
}

/// Body of a successful `initialize` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Always the single supported version, whatever the client asked for.
pub fn negotiate_version(requested: Option<&str>) -> &'static str {
    if let Some(requested) = requested {
        if requested != PROTOCOL_VERSION {
            debug!(
                requested = %requested,
                supported = PROTOCOL_VERSION,
                event = "version_mismatch",
                "Client requested a different protocol version"
            );
        }
    }
    PROTOCOL_VERSION
}

/// Derive the advertised capabilities.
///
/// Each of `tools`, `prompts` and `resources` takes the override when one is set,
/// otherwise an empty object if at least one entry of that kind is registered
/// (a resource template counts as a resource), otherwise it is absent. The
/// remaining fields come from the override only.
pub fn negotiate_capabilities(
    client: Option<&Value>,
    overrides: Option<&ServerCapabilities>,
    registry: &Registry,
) -> ServerCapabilities {
    debug!(
        client_capabilities = client.is_some(),
        overrides = overrides.is_some(),
        event = "capability_negotiation",
        "Negotiating capabilities"
    );

    let mut negotiated = overrides.cloned().unwrap_or_default();
    if negotiated.tools.is_none() && registry.has_tools() {
        negotiated.tools = Some(ListChangedCapability::default());
    }
    if negotiated.prompts.is_none() && registry.has_prompts() {
        negotiated.prompts = Some(ListChangedCapability::default());
    }
    if negotiated.resources.is_none() && registry.has_resources() {
        negotiated.resources = Some(ResourcesCapability::default());
    }
    negotiated
}
