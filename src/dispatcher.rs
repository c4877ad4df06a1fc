//! Request dispatcher
//!
//! Routes one JSON-RPC request against the [`Registry`] and produces one response,
//! or none for notifications. Every failure raised while handling a request,
//! including a panicking capability handler, is converted into a JSON-RPC error
//! response here; nothing propagates to the transport.

use {
    crate::{
        capabilities::{negotiate_capabilities, negotiate_version, InitializeResult, ServerCapabilities, ServerInfo},
        error::{JsonRpcErrorCode, McpError, McpResult},
        framework::registry::{Registry, ResourceMatch},
        handler::{PromptCtx, ResourceCtx, ResourceTemplateCtx, ToolCtx},
        limits::PageLimits,
        logging,
        pagination::paginate,
        protocol::{
            methods, CallToolParams, GetPromptParams, InitializeParams, JsonRpcRequest, JsonRpcResponse,
            PaginatedParams, ReadResourceParams, RequestId,
        },
        validation::validate_input,
    },
    futures_util::FutureExt,
    serde::Serialize,
    serde_json::{json, Map, Value},
    std::{any::Any, fmt, panic::AssertUnwindSafe, sync::Arc, time::Instant},
    tracing::Instrument,
};

/// Server-level options that shape responses but not routing
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub server_info: ServerInfo,
    /// Explicit capability flags; `None` derives them from the registry
    pub capabilities: Option<ServerCapabilities>,
    pub instructions: Option<String>,
    pub page_limits: PageLimits,
}

/// Cheaply cloneable entry point shared by every transport task.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    config: Arc<ServerConfig>,
}

impl Dispatcher {
    pub fn new(registry: Registry, config: ServerConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Handle a decoded request. Returns `None` for notifications.
    pub async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        dispatch(&self.config, &self.registry, request).await
    }

    /// Handle a JSON body that has not been checked for request shape yet.
    pub async fn handle_value(&self, body: Value) -> Option<JsonRpcResponse> {
        let id = body
            .get("id")
            .and_then(|id| serde_json::from_value::<RequestId>(id.clone()).ok());

        match JsonRpcRequest::from_value(body) {
            Ok(request) => self.dispatch(request).await,
            Err(code) => Some(JsonRpcResponse::from_code(id, code, None)),
        }
    }

    /// Handle raw bytes off the wire. Invalid JSON yields a `ParseError` with a null id.
    pub async fn handle_slice(&self, body: &[u8]) -> Option<JsonRpcResponse> {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => self.handle_value(value).await,
            Err(e) => {
                logging::log_parse_error(&e.to_string(), body.len());
                Some(JsonRpcResponse::from_code(None, JsonRpcErrorCode::ParseError, None))
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("tools", &self.registry.tools().len())
            .field("prompts", &self.registry.prompts().len())
            .field("resources", &self.registry.resources().len())
            .field("config", &self.config)
            .finish()
    }
}

/// Handle one request against `registry`.
///
/// Never fails: errors become JSON-RPC error responses, and notifications
/// (requests without an `id`) never produce a response of any kind.
pub async fn dispatch(config: &ServerConfig, registry: &Registry, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    let trace_id = logging::generate_trace_id();
    let request_id = request.id.as_ref().map(ToString::to_string);
    let span = logging::request_span(&request.method, request_id.as_deref(), &trace_id);

    respond(config, registry, request).instrument(span).await
}

async fn respond(config: &ServerConfig, registry: &Registry, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    let start = Instant::now();
    logging::log_dispatch_start(&request.method);

    let outcome = AssertUnwindSafe(handle_method(config, registry, &request))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(McpError::HandlerPanicked(panic_message(&*panic))));

    if request.is_notification() {
        if let Err(err) = &outcome {
            logging::log_dispatch_error(&request.method, err.kind(), &err.to_string(), start.elapsed());
        }
        logging::log_notification(&request.method, outcome.is_ok());
        return None;
    }

    match outcome {
        Ok(Some(result)) => {
            logging::log_dispatch_success(&request.method, start.elapsed());
            Some(JsonRpcResponse::success(request.id, result))
        }
        Ok(None) => {
            logging::log_notification(&request.method, true);
            None
        }
        Err(McpError::UnknownMethod(method)) => {
            logging::log_unknown_method(&method);
            let echoed = serde_json::to_value(&request).unwrap_or(Value::Null);
            Some(JsonRpcResponse::from_code(
                request.id,
                JsonRpcErrorCode::MethodNotFound,
                Some(echoed),
            ))
        }
        Err(err) => {
            logging::log_dispatch_error(&request.method, err.kind(), &err.to_string(), start.elapsed());
            Some(err.to_json_rpc_error(request.id))
        }
    }
}

/// Route by method name. `Ok(None)` means the method never answers.
async fn handle_method(
    config: &ServerConfig,
    registry: &Registry,
    request: &JsonRpcRequest,
) -> McpResult<Option<Value>> {
    let result = match request.method.as_str() {
        methods::INITIALIZE => initialize(config, registry, request)?,
        methods::PING => json!({}),
        methods::NOTIFICATION_INITIALIZED => return Ok(None),
        methods::PROMPTS_LIST => list_prompts(config, registry, request)?,
        methods::PROMPTS_GET => get_prompt(registry, request).await?,
        methods::RESOURCES_LIST => list_resources(config, registry, request)?,
        methods::RESOURCES_READ => read_resource(registry, request).await?,
        methods::RESOURCES_TEMPLATES_LIST => list_resource_templates(config, registry, request)?,
        methods::TOOLS_LIST => list_tools(config, registry, request)?,
        methods::TOOLS_CALL => call_tool(registry, request).await?,
        method => return Err(McpError::UnknownMethod(method.to_string())),
    };
    Ok(Some(result))
}

fn initialize(config: &ServerConfig, registry: &Registry, request: &JsonRpcRequest) -> McpResult<Value> {
    // Malformed initialize params are tolerated like absent ones
    let params: InitializeParams = request.parse_params().unwrap_or_default();

    let result = InitializeResult {
        protocol_version: negotiate_version(params.protocol_version.as_deref()).to_string(),
        capabilities: negotiate_capabilities(params.capabilities.as_ref(), config.capabilities.as_ref(), registry),
        server_info: config.server_info.with_defaults(),
        instructions: config.instructions.clone(),
    };
    Ok(serde_json::to_value(result)?)
}

/// `{ <key>: [...], nextCursor? }`
fn list_result<T: Serialize>(key: &str, items: Vec<T>, next_cursor: Option<String>) -> McpResult<Value> {
    let mut result = Map::new();
    result.insert(key.to_string(), serde_json::to_value(items)?);
    if let Some(cursor) = next_cursor {
        result.insert("nextCursor".to_string(), Value::String(cursor));
    }
    Ok(Value::Object(result))
}

fn list_tools(config: &ServerConfig, registry: &Registry, request: &JsonRpcRequest) -> McpResult<Value> {
    let params: PaginatedParams = request.parse_params()?;
    let tools: Vec<_> = registry.tools().iter().collect();
    let page = paginate(&tools, config.page_limits.tools, params.cursor.as_ref());

    let listed: Vec<_> = page.items.iter().map(|tool| tool.describe()).collect();
    list_result("tools", listed, page.next_cursor)
}

fn list_prompts(config: &ServerConfig, registry: &Registry, request: &JsonRpcRequest) -> McpResult<Value> {
    let params: PaginatedParams = request.parse_params()?;
    let prompts: Vec<_> = registry.prompts().iter().collect();
    let page = paginate(&prompts, config.page_limits.prompts, params.cursor.as_ref());

    let listed: Vec<_> = page.items.iter().map(|prompt| prompt.describe()).collect();
    list_result("prompts", listed, page.next_cursor)
}

fn list_resources(config: &ServerConfig, registry: &Registry, request: &JsonRpcRequest) -> McpResult<Value> {
    let params: PaginatedParams = request.parse_params()?;
    let resources: Vec<_> = registry.static_resources().collect();
    let page = paginate(&resources, config.page_limits.resources, params.cursor.as_ref());

    let listed: Vec<_> = page.items.iter().map(|resource| resource.describe()).collect();
    list_result("resources", listed, page.next_cursor)
}

fn list_resource_templates(
    config: &ServerConfig,
    registry: &Registry,
    request: &JsonRpcRequest,
) -> McpResult<Value> {
    let params: PaginatedParams = request.parse_params()?;
    let templates: Vec<_> = registry.resource_templates().collect();
    let page = paginate(&templates, config.page_limits.resource_templates, params.cursor.as_ref());

    let listed: Vec<_> = page.items.iter().map(|template| template.describe()).collect();
    list_result("resourceTemplates", listed, page.next_cursor)
}

async fn call_tool(registry: &Registry, request: &JsonRpcRequest) -> McpResult<Value> {
    let params: CallToolParams = request.parse_params()?;
    let name = params
        .name
        .filter(|name| !name.is_empty())
        .ok_or(McpError::MissingParam("name"))?;
    let tool = registry.tool(&name).ok_or(McpError::UnknownTool(name))?;

    let input = validate_input(tool.definition.input_schema.as_ref(), params.arguments).await?;
    let result = tool.definition.call(ToolCtx { input }).await?;
    Ok(serde_json::to_value(result)?)
}

async fn get_prompt(registry: &Registry, request: &JsonRpcRequest) -> McpResult<Value> {
    let params: GetPromptParams = request.parse_params()?;
    let name = params
        .name
        .filter(|name| !name.is_empty())
        .ok_or(McpError::MissingParam("name"))?;
    let prompt = registry.prompt(&name).ok_or(McpError::UnknownPrompt(name))?;

    let args = validate_input(prompt.definition.args_schema.as_ref(), params.arguments).await?;
    let result = prompt.definition.call(PromptCtx { args }).await?;
    Ok(serde_json::to_value(result)?)
}

async fn read_resource(registry: &Registry, request: &JsonRpcRequest) -> McpResult<Value> {
    let params: ReadResourceParams = request.parse_params()?;
    let uri = params.uri.ok_or(McpError::MissingParam("uri"))?;

    let result = match registry.find_resource(&uri) {
        Some(ResourceMatch::Static(resource)) => resource.definition.call(ResourceCtx { uri }).await?,
        Some(ResourceMatch::Template(template, bindings)) => {
            let extracted = Value::Object(bindings);
            let params = validate_input(template.definition.uri_schema.as_ref(), Some(extracted.clone()))
                .await?
                .unwrap_or(extracted);
            template
                .definition
                .call(ResourceTemplateCtx { uri, params })
                .await?
        }
        None => return Err(McpError::UnknownResource(uri)),
    };
    Ok(serde_json::to_value(result)?)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
