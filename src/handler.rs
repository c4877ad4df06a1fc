//! Capability definitions
//!
//! Plain data builders for the four capability kinds a host can declare: tools,
//! prompts, static resources and resource templates. Each definition carries its
//! metadata, an optional input schema and an async handler. Handlers always receive
//! a context with an explicit input field; it is `None` when no schema was declared.

use {
    crate::{
        content_types::{PromptResult, ResourceResult, ToolResult},
        validation::{SchemaRef, TypedSchema},
    },
    anyhow::{anyhow, Result},
    futures_util::{future::BoxFuture, FutureExt},
    schemars::JsonSchema,
    serde::de::DeserializeOwned,
    serde_json::Value,
    std::{fmt, future::Future, sync::Arc},
};

/// Context passed to a tool handler
#[derive(Debug, Clone)]
pub struct ToolCtx {
    /// Validated `arguments`, or `None` when the tool has no input schema
    pub input: Option<Value>,
}

/// Context passed to a prompt handler
#[derive(Debug, Clone)]
pub struct PromptCtx {
    /// Validated `arguments`, or `None` when the prompt has no argument schema
    pub args: Option<Value>,
}

/// Context passed to a static resource handler
#[derive(Debug, Clone)]
pub struct ResourceCtx {
    /// The URI the client is reading
    pub uri: String,
}

/// Context passed to a resource template handler
#[derive(Debug, Clone)]
pub struct ResourceTemplateCtx {
    /// The URI the client is reading
    pub uri: String,
    /// Variables extracted from the URI, validated against the template's
    /// schema when one is declared. Always an object.
    pub params: Value,
}

pub type ToolFunction = Arc<dyn Fn(ToolCtx) -> BoxFuture<'static, Result<ToolResult>> + Send + Sync>;
pub type PromptFunction = Arc<dyn Fn(PromptCtx) -> BoxFuture<'static, Result<PromptResult>> + Send + Sync>;
pub type ResourceFunction = Arc<dyn Fn(ResourceCtx) -> BoxFuture<'static, Result<ResourceResult>> + Send + Sync>;
pub type ResourceTemplateFunction =
    Arc<dyn Fn(ResourceTemplateCtx) -> BoxFuture<'static, Result<ResourceResult>> + Send + Sync>;

/// Decode validated input into the handler's parameter type
fn decode_input<I: DeserializeOwned>(input: Option<Value>) -> Result<I> {
    let input = input.ok_or_else(|| anyhow!("handler expected validated input"))?;
    Ok(serde_json::from_value(input)?)
}

async fn run_typed<I, O, F, Fut>(handler: Arc<F>, input: Option<Value>) -> Result<O>
where
    I: DeserializeOwned,
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<O>>,
{
    let input = decode_input(input)?;
    handler(input).await
}

async fn run_typed_template<P, F, Fut>(handler: Arc<F>, ctx: ResourceTemplateCtx) -> Result<ResourceResult>
where
    P: DeserializeOwned,
    F: Fn(String, P) -> Fut,
    Fut: Future<Output = Result<ResourceResult>>,
{
    let params = decode_input(Some(ctx.params))?;
    handler(ctx.uri, params).await
}

/// A callable tool.
///
/// # Examples
/// ```rust
/// use mcpfetch::{content_types::ToolResult, handler::ToolDefinition};
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct EchoInput {
///     message: String,
/// }
///
/// let echo = ToolDefinition::typed(|input: EchoInput| async move {
///     Ok(ToolResult::text(input.message))
/// })
/// .with_description("Echo the message back");
/// ```
#[derive(Clone)]
pub struct ToolDefinition {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub input_schema: Option<SchemaRef>,
    pub(crate) handler: ToolFunction,
}

impl ToolDefinition {
    /// A tool whose handler receives the raw [`ToolCtx`]
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(ToolCtx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolResult>> + Send + 'static,
    {
        Self {
            name: None,
            title: None,
            description: None,
            input_schema: None,
            handler: Arc::new(move |ctx| handler(ctx).boxed()),
        }
    }

    /// A tool whose input schema is derived from `I` and whose handler receives a decoded `I`
    pub fn typed<I, F, Fut>(handler: F) -> Self
    where
        I: JsonSchema + DeserializeOwned + Send + 'static,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolResult>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        Self::new(move |ctx: ToolCtx| run_typed(Arc::clone(&handler), ctx.input))
        .with_input_schema(TypedSchema::<I>::shared())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_input_schema(mut self, schema: SchemaRef) -> Self {
        self.input_schema = Some(schema);
        self
    }

    pub(crate) fn call(&self, ctx: ToolCtx) -> BoxFuture<'static, Result<ToolResult>> {
        (self.handler)(ctx)
    }
}

/// A prompt template.
#[derive(Clone)]
pub struct PromptDefinition {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub args_schema: Option<SchemaRef>,
    pub(crate) handler: PromptFunction,
}

impl PromptDefinition {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(PromptCtx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<PromptResult>> + Send + 'static,
    {
        Self {
            name: None,
            title: None,
            description: None,
            args_schema: None,
            handler: Arc::new(move |ctx| handler(ctx).boxed()),
        }
    }

    /// A prompt whose argument schema is derived from `A`
    pub fn typed<A, F, Fut>(handler: F) -> Self
    where
        A: JsonSchema + DeserializeOwned + Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<PromptResult>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        Self::new(move |ctx: PromptCtx| run_typed(Arc::clone(&handler), ctx.args))
        .with_args_schema(TypedSchema::<A>::shared())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_args_schema(mut self, schema: SchemaRef) -> Self {
        self.args_schema = Some(schema);
        self
    }

    pub(crate) fn call(&self, ctx: PromptCtx) -> BoxFuture<'static, Result<PromptResult>> {
        (self.handler)(ctx)
    }
}

/// A resource served at one fixed URI.
#[derive(Clone)]
pub struct ResourceDefinition {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub uri: String,
    pub mime_type: String,
    pub(crate) handler: ResourceFunction,
}

impl ResourceDefinition {
    pub fn new<F, Fut>(uri: impl Into<String>, mime_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ResourceCtx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ResourceResult>> + Send + 'static,
    {
        Self {
            name: None,
            title: None,
            description: None,
            uri: uri.into(),
            mime_type: mime_type.into(),
            handler: Arc::new(move |ctx| handler(ctx).boxed()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn call(&self, ctx: ResourceCtx) -> BoxFuture<'static, Result<ResourceResult>> {
        (self.handler)(ctx)
    }
}

/// A family of resources addressed by a URI template.
///
/// The template string is compiled when the registry is built, so a malformed
/// template is reported at startup.
#[derive(Clone)]
pub struct ResourceTemplateDefinition {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub uri_template: String,
    pub uri_schema: Option<SchemaRef>,
    pub mime_type: Option<String>,
    pub(crate) handler: ResourceTemplateFunction,
}

impl ResourceTemplateDefinition {
    pub fn new<F, Fut>(uri_template: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ResourceTemplateCtx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ResourceResult>> + Send + 'static,
    {
        Self {
            name: None,
            title: None,
            description: None,
            uri_template: uri_template.into(),
            uri_schema: None,
            mime_type: None,
            handler: Arc::new(move |ctx| handler(ctx).boxed()),
        }
    }

    /// A template whose variables are validated and decoded as `P`.
    ///
    /// Extracted variables are strings, so `P`'s fields should be too.
    pub fn typed<P, F, Fut>(uri_template: impl Into<String>, handler: F) -> Self
    where
        P: JsonSchema + DeserializeOwned + Send + 'static,
        F: Fn(String, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ResourceResult>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        Self::new(uri_template, move |ctx: ResourceTemplateCtx| {
            run_typed_template(Arc::clone(&handler), ctx)
        })
        .with_uri_schema(TypedSchema::<P>::shared())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_uri_schema(mut self, schema: SchemaRef) -> Self {
        self.uri_schema = Some(schema);
        self
    }

    pub(crate) fn call(&self, ctx: ResourceTemplateCtx) -> BoxFuture<'static, Result<ResourceResult>> {
        (self.handler)(ctx)
    }
}

/// Either kind of resource, as declared in the resources map
#[derive(Clone)]
pub enum ResourceDeclaration {
    Static(ResourceDefinition),
    Template(ResourceTemplateDefinition),
}

impl ResourceDeclaration {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Static(r) => r.name.as_deref(),
            Self::Template(t) => t.name.as_deref(),
        }
    }
}

impl From<ResourceDefinition> for ResourceDeclaration {
    fn from(resource: ResourceDefinition) -> Self {
        Self::Static(resource)
    }
}

impl From<ResourceTemplateDefinition> for ResourceDeclaration {
    fn from(template: ResourceTemplateDefinition) -> Self {
        Self::Template(template)
    }
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("has_input_schema", &self.input_schema.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for PromptDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptDefinition")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("has_args_schema", &self.args_schema.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ResourceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceDefinition")
            .field("name", &self.name)
            .field("uri", &self.uri)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ResourceTemplateDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceTemplateDefinition")
            .field("name", &self.name)
            .field("uri_template", &self.uri_template)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ResourceDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(r) => r.fmt(f),
            Self::Template(t) => t.fmt(f),
        }
    }
}
