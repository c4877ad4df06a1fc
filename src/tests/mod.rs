//! MCP Server Tests
//!
//! Dispatcher-level tests driven through raw JSON bodies, the way a transport
//! would call in.

mod notifications_tests;
mod tools_tests;

use {
    crate::{
        content_types::{PromptMessage, PromptResult, ResourceResult, ToolResult},
        dispatcher::Dispatcher,
        framework::McpServerBuilder,
        handler::{PromptDefinition, ResourceCtx, ResourceDefinition, ResourceTemplateCtx, ResourceTemplateDefinition, ToolDefinition},
    },
    schemars::JsonSchema,
    serde::Deserialize,
    serde_json::{json, Value},
};

#[derive(Debug, Deserialize, JsonSchema)]
pub(crate) struct EchoInput {
    pub message: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub(crate) struct TopicArgs {
    pub topic: String,
}

/// One of each capability kind
pub(crate) fn fixture_builder() -> McpServerBuilder {
    McpServerBuilder::new()
        .with_tool(
            "echo",
            ToolDefinition::typed(|input: EchoInput| async move { Ok(ToolResult::text(input.message)) })
                .with_description("Echo the message back"),
        )
        .with_prompt(
            "summarize",
            PromptDefinition::typed(|args: TopicArgs| async move {
                Ok(PromptResult::new(
                    "Summary prompt",
                    vec![PromptMessage::user(format!("Summarize {}", args.topic))],
                ))
            }),
        )
        .with_resource(
            "config",
            ResourceDefinition::new("config://static", "text/plain", |ctx: ResourceCtx| async move {
                Ok(ResourceResult::text(ctx.uri, "text/plain", "static config"))
            }),
        )
        .with_resource_template(
            "user",
            ResourceTemplateDefinition::new("users://{id}", |ctx: ResourceTemplateCtx| async move {
                Ok(ResourceResult::text(ctx.uri, "application/json", ctx.params.to_string()))
            }),
        )
}

pub(crate) fn fixture_dispatcher() -> Dispatcher {
    fixture_builder().build().unwrap()
}

/// Send a raw body, returning the serialized response or `Value::Null` when there is none
pub(crate) async fn send(dispatcher: &Dispatcher, body: Value) -> Value {
    match dispatcher.handle_value(body).await {
        Some(response) => serde_json::to_value(response).unwrap(),
        None => Value::Null,
    }
}

pub(crate) fn request(id: i64, method: &str, params: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})
}

#[tokio::test]
async fn test_mcp_message_handling() {
    let dispatcher = fixture_dispatcher();
    let response = send(&dispatcher, request(1, "initialize", json!({}))).await;

    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert!(response["result"].is_object());
}
