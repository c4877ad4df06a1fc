//! Resource and resource template registration.
//!
//! Static resources and templates live in one list so that `resources/read` can
//! resolve a URI with a single scan in declaration order.

use {
    super::{
        listing::{ResourceInfo, ResourceTemplateInfo},
        tool_registration::resolve_name,
        Registry,
    },
    crate::{
        error::McpResult,
        handler::{ResourceDeclaration, ResourceDefinition, ResourceTemplateDefinition},
        uri_template::UriTemplate,
    },
    serde_json::{Map, Value},
};

/// A static resource with its resolved name
#[derive(Debug, Clone)]
pub struct RegisteredResource {
    pub key: String,
    pub name: String,
    pub definition: ResourceDefinition,
}

impl RegisteredResource {
    /// `resources/list` entry
    pub fn describe(&self) -> ResourceInfo {
        ResourceInfo {
            uri: self.definition.uri.clone(),
            name: self.name.clone(),
            title: self.definition.title.clone(),
            description: self.definition.description.clone(),
            mime_type: Some(self.definition.mime_type.clone()),
        }
    }
}

/// A resource template with its resolved name and compiled matcher
#[derive(Debug, Clone)]
pub struct RegisteredTemplate {
    pub key: String,
    pub name: String,
    pub template: UriTemplate,
    pub definition: ResourceTemplateDefinition,
}

impl RegisteredTemplate {
    /// `resources/templates/list` entry
    pub fn describe(&self) -> ResourceTemplateInfo {
        ResourceTemplateInfo {
            uri_template: self.template.as_str().to_string(),
            name: self.name.clone(),
            title: self.definition.title.clone(),
            description: self.definition.description.clone(),
            mime_type: self.definition.mime_type.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ResourceEntry {
    Static(RegisteredResource),
    Template(RegisteredTemplate),
}

impl ResourceEntry {
    pub fn key(&self) -> &str {
        match self {
            Self::Static(r) => &r.key,
            Self::Template(t) => &t.key,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Static(r) => &r.name,
            Self::Template(t) => &t.name,
        }
    }
}

/// Outcome of resolving a concrete URI
#[derive(Debug)]
pub enum ResourceMatch<'a> {
    Static(&'a RegisteredResource),
    /// The template and the variables it extracted
    Template(&'a RegisteredTemplate, Map<String, Value>),
}

impl Registry {
    pub(super) fn register_resource(&mut self, key: &str, declaration: ResourceDeclaration) -> McpResult<()> {
        let name = resolve_name(key, declaration.name());
        let entry = match declaration {
            ResourceDeclaration::Static(definition) => ResourceEntry::Static(RegisteredResource {
                key: key.to_string(),
                name,
                definition,
            }),
            ResourceDeclaration::Template(definition) => ResourceEntry::Template(RegisteredTemplate {
                key: key.to_string(),
                name,
                template: UriTemplate::parse(&definition.uri_template)?,
                definition,
            }),
        };
        self.resources.push(entry);
        Ok(())
    }

    /// Resolve `uri` against static resources and templates in declaration order.
    ///
    /// Static entries match on exact string equality; the first entry that matches wins.
    pub fn find_resource(&self, uri: &str) -> Option<ResourceMatch<'_>> {
        self.resources.iter().find_map(|entry| match entry {
            ResourceEntry::Static(resource) => {
                (resource.definition.uri == uri).then_some(ResourceMatch::Static(resource))
            }
            ResourceEntry::Template(template) => template
                .template
                .matches(uri)
                .map(|params| ResourceMatch::Template(template, params)),
        })
    }
}
