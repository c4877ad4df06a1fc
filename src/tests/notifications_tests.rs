//! MCP Notifications Tests
//!
//! Notifications are processed but never answered, whatever happens.

use {
    super::{fixture_builder, fixture_dispatcher, request, send},
    crate::{
        content_types::ToolResult,
        handler::{ToolCtx, ToolDefinition},
    },
    serde_json::{json, Value},
    std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

#[tokio::test]
async fn test_initialized_notification_has_no_response() {
    let dispatcher = fixture_dispatcher();
    let note = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});

    assert_eq!(send(&dispatcher, note).await, Value::Null);
}

#[tokio::test]
async fn test_initialized_with_id_still_has_no_response() {
    let dispatcher = fixture_dispatcher();
    let response = send(&dispatcher, request(1, "notifications/initialized", json!({}))).await;

    assert_eq!(response, Value::Null);
}

#[tokio::test]
async fn test_unknown_notifications_are_ignored() {
    let dispatcher = fixture_dispatcher();
    let cancel = json!({
        "jsonrpc": "2.0",
        "method": "notifications/cancelled",
        "params": {"requestId": "test-request"}
    });

    assert_eq!(send(&dispatcher, cancel).await, Value::Null);
}

#[tokio::test]
async fn test_unknown_notification_method_with_id_is_not_found() {
    let dispatcher = fixture_dispatcher();
    let body = json!({"jsonrpc": "2.0", "id": 5, "method": "notifications/bogus"});
    let response = send(&dispatcher, body.clone()).await;

    assert_eq!(response["id"], 5);
    assert_eq!(response["error"]["code"], -32601);
    assert_eq!(response["error"]["data"], body);
}

#[tokio::test]
async fn test_failing_notification_is_silent() {
    let dispatcher = fixture_dispatcher();

    let unknown_method = json!({"jsonrpc": "2.0", "method": "does/not/exist"});
    assert_eq!(send(&dispatcher, unknown_method).await, Value::Null);

    let unknown_tool = json!({"jsonrpc": "2.0", "method": "tools/call", "params": {"name": "missing"}});
    assert_eq!(send(&dispatcher, unknown_tool).await, Value::Null);
}

#[tokio::test]
async fn test_notification_still_runs_handler() {
    let called = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&called);

    let dispatcher = fixture_builder()
        .with_tool(
            "touch",
            ToolDefinition::new(move |_: ToolCtx| {
                let flag = Arc::clone(&flag);
                async move {
                    flag.store(true, Ordering::SeqCst);
                    Ok(ToolResult::text("touched"))
                }
            }),
        )
        .build()
        .unwrap();

    let note = json!({"jsonrpc": "2.0", "method": "tools/call", "params": {"name": "touch"}});
    assert_eq!(send(&dispatcher, note).await, Value::Null);
    assert!(called.load(Ordering::SeqCst));
}
