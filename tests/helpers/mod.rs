//! Test helpers for integration tests
//!
//! Builds a dispatcher with one capability of each kind and wraps it in a small
//! client that speaks raw JSON, the way a transport binding would.

#![allow(dead_code)]

use {
    mcpfetch::{
        content_types::{PromptMessage, PromptResult, ResourceResult, ToolResult},
        handler::{PromptDefinition, ResourceCtx, ResourceDefinition, ResourceTemplateDefinition, ToolDefinition},
        Dispatcher, McpServerBuilder,
    },
    schemars::JsonSchema,
    serde::Deserialize,
    serde_json::{json, Value},
    std::sync::{
        atomic::{AtomicI64, AtomicU32, Ordering},
        Arc,
    },
};

/// Input type for the test tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TestInput {
    pub input: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GreetingArgs {
    /// Name of the person to greet
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NoteParams {
    pub id: String,
}

/// Install a test-friendly subscriber once; later calls are no-ops
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("mcpfetch=debug")
        .with_test_writer()
        .try_init();
}

/// Builder with the standard fixture capabilities registered.
///
/// `calls` counts invocations of the `test_tool` tool.
pub fn fixture_builder(calls: Arc<AtomicU32>) -> McpServerBuilder {
    McpServerBuilder::new()
        .with_tool(
            "test_tool",
            ToolDefinition::typed(move |input: TestInput| {
                let calls = Arc::clone(&calls);
                async move {
                    let count = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    Ok(ToolResult::text(format!("{} #{count}", input.input)))
                }
            })
            .with_title("Test tool")
            .with_description("Echo input with a call counter"),
        )
        .with_prompt(
            "greeting",
            PromptDefinition::typed(|args: GreetingArgs| async move {
                Ok(PromptResult::new(
                    "Greeting",
                    vec![PromptMessage::user(format!("Say hello to {}", args.name))],
                ))
            }),
        )
        .with_resource(
            "settings",
            ResourceDefinition::new("config://settings", "application/json", |ctx: ResourceCtx| async move {
                Ok(ResourceResult::text(ctx.uri, "application/json", r#"{"theme":"dark"}"#))
            }),
        )
        .with_resource_template(
            "note",
            ResourceTemplateDefinition::typed("notes://{id}", |uri, params: NoteParams| async move {
                Ok(ResourceResult::text(uri, "text/plain", format!("note {}", params.id)))
            })
            .with_mime_type("text/plain"),
        )
}

/// Raw-JSON client around a dispatcher
#[derive(Clone)]
pub struct TestClient {
    pub dispatcher: Dispatcher,
    pub tool_calls: Arc<AtomicU32>,
    next_id: Arc<AtomicI64>,
}

impl TestClient {
    pub fn new() -> Self {
        init_test_tracing();
        let tool_calls = Arc::new(AtomicU32::new(0));
        let dispatcher = fixture_builder(Arc::clone(&tool_calls))
            .build()
            .expect("fixture server should build");
        Self::with_dispatcher(dispatcher, tool_calls)
    }

    pub fn with_dispatcher(dispatcher: Dispatcher, tool_calls: Arc<AtomicU32>) -> Self {
        Self {
            dispatcher,
            tool_calls,
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Send a request with a fresh numeric id and return the whole response
    pub async fn request(&self, method: &str, params: Value) -> Value {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let response = self
            .raw(json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))
            .await;
        assert_eq!(response["id"], id, "response id should match request id");
        response
    }

    /// Send a notification; returns whatever the dispatcher produced
    pub async fn notify(&self, method: &str, params: Value) -> Option<Value> {
        self.dispatcher
            .handle_value(json!({"jsonrpc": "2.0", "method": method, "params": params}))
            .await
            .map(|r| serde_json::to_value(r).expect("response serializes"))
    }

    pub async fn raw(&self, body: Value) -> Value {
        match self.dispatcher.handle_value(body).await {
            Some(response) => serde_json::to_value(response).expect("response serializes"),
            None => Value::Null,
        }
    }

    /// Walk every page of a listing method and collect `key` entries
    pub async fn list_all(&self, method: &str, key: &str) -> Vec<Value> {
        let mut items = Vec::new();
        let mut cursor: Option<Value> = None;
        loop {
            let params = cursor.as_ref().map_or_else(|| json!({}), |c| json!({"cursor": c}));
            let response = self.request(method, params).await;
            let result = &response["result"];
            items.extend(result[key].as_array().cloned().unwrap_or_default());
            match result.get("nextCursor") {
                Some(next) => cursor = Some(next.clone()),
                None => return items,
            }
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
