//! Tool and prompt tests
//!
//! Listing shapes, pagination through the dispatcher, and the call paths.

use {
    super::{fixture_dispatcher, request, send, EchoInput},
    crate::{
        content_types::{McpContent, PromptResult, ToolResult},
        framework::McpServerBuilder,
        handler::{PromptCtx, PromptDefinition, ToolCtx, ToolDefinition},
        limits::PageLimits,
    },
    serde_json::{json, Value},
};

fn numbered_tools(count: usize) -> McpServerBuilder {
    (0..count).fold(McpServerBuilder::new(), |builder, i| {
        builder.with_tool(
            format!("tool_{i:03}"),
            ToolDefinition::new(|_: ToolCtx| async move { Ok(ToolResult::text("")) }),
        )
    })
}

async fn collect_tool_pages(dispatcher: &crate::dispatcher::Dispatcher) -> (Vec<String>, usize) {
    let mut names = Vec::new();
    let mut pages = 0;
    let mut cursor: Option<Value> = None;

    loop {
        let params = match &cursor {
            Some(cursor) => json!({"cursor": cursor}),
            None => json!({}),
        };
        let response = send(dispatcher, request(1, "tools/list", params)).await;
        let result = &response["result"];
        pages += 1;

        for tool in result["tools"].as_array().unwrap() {
            names.push(tool["name"].as_str().unwrap().to_string());
        }
        match result.get("nextCursor") {
            Some(next) => cursor = Some(next.clone()),
            None => break,
        }
    }
    (names, pages)
}

#[tokio::test]
async fn test_tools_list_pagination_reconstructs_order() {
    let dispatcher = numbered_tools(120).build().unwrap();
    let (names, pages) = collect_tool_pages(&dispatcher).await;

    let expected: Vec<String> = (0..120).map(|i| format!("tool_{i:03}")).collect();
    assert_eq!(names, expected);
    assert_eq!(pages, 3);
}

#[tokio::test]
async fn test_tools_list_exact_page_boundary() {
    let dispatcher = numbered_tools(50).build().unwrap();
    let response = send(&dispatcher, request(1, "tools/list", json!({}))).await;

    assert_eq!(response["result"]["tools"].as_array().unwrap().len(), 50);
    assert!(response["result"].get("nextCursor").is_none());
}

#[tokio::test]
async fn test_custom_page_limits_and_bad_cursor() {
    let dispatcher = numbered_tools(5)
        .with_page_limits(PageLimits::uniform(2))
        .build()
        .unwrap();

    let first = send(&dispatcher, request(1, "tools/list", json!({}))).await;
    assert_eq!(first["result"]["nextCursor"], "2");

    let garbage = send(&dispatcher, request(2, "tools/list", json!({"cursor": "not-a-number"}))).await;
    assert_eq!(garbage["result"]["tools"][0]["name"], "tool_000");

    let past_end = send(&dispatcher, request(3, "tools/list", json!({"cursor": "99"}))).await;
    assert_eq!(past_end["result"], json!({"tools": []}));
}

#[tokio::test]
async fn test_tools_list_shape() {
    let dispatcher = fixture_dispatcher();
    let response = send(&dispatcher, request(1, "tools/list", json!({}))).await;
    let tool = &response["result"]["tools"][0];

    assert_eq!(tool["name"], "echo");
    assert_eq!(tool["description"], "Echo the message back");
    assert_eq!(tool["inputSchema"]["type"], "object");
    assert_eq!(tool["inputSchema"]["required"], json!(["message"]));
}

#[tokio::test]
async fn test_explicit_name_differs_from_key() {
    let dispatcher = McpServerBuilder::new()
        .with_tool(
            "internal_key",
            ToolDefinition::new(|_: ToolCtx| async move { Ok(ToolResult::text("named")) }).with_name("public_name"),
        )
        .build()
        .unwrap();

    let by_name = send(&dispatcher, request(1, "tools/call", json!({"name": "public_name"}))).await;
    assert_eq!(by_name["result"]["content"][0]["text"], "named");

    let by_key = send(&dispatcher, request(2, "tools/call", json!({"name": "internal_key"}))).await;
    assert_eq!(by_key["error"]["code"], -32000);
}

#[tokio::test]
async fn test_tool_input_passes_through_verbatim() {
    let dispatcher = McpServerBuilder::new()
        .with_tool(
            "inspect",
            ToolDefinition::new(|ctx: ToolCtx| async move {
                Ok(ToolResult::text(ctx.input.unwrap_or(Value::Null).to_string()))
            })
            .with_input_schema(crate::validation::TypedSchema::<EchoInput>::shared()),
        )
        .build()
        .unwrap();

    let arguments = json!({"message": "hi", "extra": [1, 2]});
    let response = send(
        &dispatcher,
        request(1, "tools/call", json!({"name": "inspect", "arguments": arguments})),
    )
    .await;

    let echoed: Value = serde_json::from_str(response["result"]["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(echoed, arguments);
}

#[tokio::test]
async fn test_untyped_tool_ignores_arguments() {
    let dispatcher = McpServerBuilder::new()
        .with_tool(
            "raw",
            ToolDefinition::new(|ctx: ToolCtx| async move { Ok(ToolResult::text(format!("{:?}", ctx.input))) }),
        )
        .build()
        .unwrap();

    let response = send(
        &dispatcher,
        request(1, "tools/call", json!({"name": "raw", "arguments": {"anything": true}})),
    )
    .await;
    assert_eq!(response["result"]["content"][0]["text"], "None");
}

#[tokio::test]
async fn test_tool_result_is_returned_unchanged() {
    let expected = ToolResult::new(vec![
        McpContent::text("summary"),
        McpContent::image("aGVsbG8=", "image/png"),
    ]);
    let returned = expected.clone();

    let dispatcher = McpServerBuilder::new()
        .with_tool(
            "mixed",
            ToolDefinition::new(move |_: ToolCtx| {
                let returned = returned.clone();
                async move { Ok(returned) }
            }),
        )
        .build()
        .unwrap();

    let response = send(&dispatcher, request(1, "tools/call", json!({"name": "mixed"}))).await;
    assert_eq!(response["result"], serde_json::to_value(expected).unwrap());
}

#[tokio::test]
async fn test_prompts_list_and_get() {
    let dispatcher = fixture_dispatcher();

    let listed = send(&dispatcher, request(1, "prompts/list", json!({}))).await;
    let prompt = &listed["result"]["prompts"][0];
    assert_eq!(prompt["name"], "summarize");
    assert_eq!(
        prompt["arguments"],
        json!([{"name": "topic", "required": true}])
    );
    assert_eq!(prompt["argsSchema"]["type"], "object");

    let got = send(
        &dispatcher,
        request(2, "prompts/get", json!({"name": "summarize", "arguments": {"topic": "rust"}})),
    )
    .await;
    assert_eq!(
        got["result"],
        json!({
            "description": "Summary prompt",
            "messages": [{"role": "user", "content": {"type": "text", "text": "Summarize rust"}}]
        })
    );

    let invalid = send(&dispatcher, request(3, "prompts/get", json!({"name": "summarize"}))).await;
    assert_eq!(invalid["error"]["code"], -32000);
    assert_eq!(invalid["error"]["data"]["name"], "ValidationError");
}

#[tokio::test]
async fn test_prompt_without_schema() {
    let dispatcher = McpServerBuilder::new()
        .with_prompt(
            "plain",
            PromptDefinition::new(|ctx: PromptCtx| async move {
                assert!(ctx.args.is_none());
                Ok(PromptResult::new("plain", vec![]))
            }),
        )
        .build()
        .unwrap();

    let listed = send(&dispatcher, request(1, "prompts/list", json!({}))).await;
    assert_eq!(
        listed["result"]["prompts"][0],
        json!({
            "name": "plain",
            "arguments": [],
            "argsSchema": {"type": "object", "properties": {}, "required": []}
        })
    );

    let got = send(&dispatcher, request(2, "prompts/get", json!({"name": "plain", "arguments": {"x": 1}}))).await;
    assert_eq!(got["result"]["description"], "plain");
}
