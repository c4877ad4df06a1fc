//! Structured logging for the dispatcher
//!
//! Every dispatch runs inside an `mcp_request` span carrying the method, the
//! JSON-RPC id and a per-dispatch trace id. Events carry an `event` field so they
//! can be filtered in JSON output.

use {
    std::time::Duration,
    tracing::{debug, error, info, span, warn, Level, Span},
    tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter},
    uuid::Uuid,
};

/// Initialize the tracing subscriber with appropriate configuration
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mcpfetch=info"));

    let json_format = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    // stdout may carry the protocol itself, so logs go to stderr
    if json_format {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }

    info!("Tracing initialized");
}

/// Fresh trace id for one dispatch
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span for tracking a request
pub fn request_span(method: &str, request_id: Option<&str>, trace_id: &str) -> Span {
    span!(
        Level::INFO,
        "mcp_request",
        method = %method,
        request_id = request_id,
        trace_id = %trace_id,
    )
}

pub fn log_dispatch_start(method: &str) {
    debug!(method = %method, event = "dispatch_start", "Dispatching request");
}

pub fn log_dispatch_success(method: &str, duration: Duration) {
    info!(
        method = %method,
        duration_ms = duration.as_millis(),
        event = "dispatch_success",
        "Request handled"
    );
}

pub fn log_dispatch_error(method: &str, kind: &str, error: &str, duration: Duration) {
    error!(
        method = %method,
        error_kind = %kind,
        error = %error,
        duration_ms = duration.as_millis(),
        event = "dispatch_error",
        "Request failed"
    );
}

pub fn log_unknown_method(method: &str) {
    warn!(method = %method, event = "unknown_method", "Unknown MCP method requested");
}

pub fn log_notification(method: &str, handled: bool) {
    debug!(
        method = %method,
        handled = handled,
        event = "notification",
        "Notification processed without response"
    );
}

pub fn log_parse_error(error: &str, body_size: usize) {
    warn!(
        error = %error,
        body_size = body_size,
        event = "parse_error",
        "Failed to parse request body"
    );
}

pub fn log_registry_built(tools: usize, prompts: usize, resources: usize, templates: usize) {
    info!(
        tools = tools,
        prompts = prompts,
        resources = resources,
        resource_templates = templates,
        event = "registry_built",
        "Capability registry built"
    );
}
