//! MCP Server Example
//!
//! Serves an example prompt, static resource, resource template and tool over
//! line-delimited JSON on stdin/stdout. Logs go to stderr.

use {
    anyhow::Result,
    mcpfetch::{
        capabilities::ServerInfo,
        content_types::{PromptMessage, PromptResult, ResourceResult, ToolResult},
        framework::McpServerBuilder,
        handler::{PromptCtx, PromptDefinition, ResourceCtx, ResourceDefinition, ResourceTemplateDefinition, ToolDefinition},
        logging, Dispatcher, JsonSchema,
    },
    serde::Deserialize,
    tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader},
    tracing::{error, info},
};

#[derive(Deserialize, JsonSchema)]
struct ExampleToolInput {
    arg: String,
}

#[derive(Deserialize, JsonSchema)]
struct ExampleUriParams {
    id: String,
}

fn example_server() -> Result<Dispatcher> {
    let dispatcher = McpServerBuilder::new()
        .with_server_info(ServerInfo::new("mcpfetch-example", env!("CARGO_PKG_VERSION")))
        .with_prompt(
            "examplePrompt",
            PromptDefinition::new(|_: PromptCtx| async move {
                Ok(PromptResult::new("Example prompt", vec![PromptMessage::user("Hello world")]))
            }),
        )
        .with_resource(
            "exampleResource",
            ResourceDefinition::new("config://static", "text/plain", |ctx: ResourceCtx| async move {
                Ok(ResourceResult::text(ctx.uri, "text/plain", "example static config"))
            }),
        )
        .with_resource_template(
            "exampleResourceTemplate",
            ResourceTemplateDefinition::typed("config://{id}", |uri, params: ExampleUriParams| async move {
                Ok(ResourceResult::text(
                    uri,
                    "text/plain",
                    format!("Example resource template {{\"id\":\"{}\"}}", params.id),
                ))
            })
            .with_mime_type("text/plain"),
        )
        .with_tool(
            "exampleTool",
            ToolDefinition::typed(|input: ExampleToolInput| async move {
                Ok(ToolResult::text(format!("Example text response: {}", input.arg)))
            }),
        )
        .build()?;
    Ok(dispatcher)
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();

    let dispatcher = example_server()?;
    info!(event = "server_ready", "Reading JSON-RPC requests from stdin");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(response) = dispatcher.handle_slice(line.as_bytes()).await else {
            continue;
        };
        match serde_json::to_string(&response) {
            Ok(body) => {
                stdout.write_all(body.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
            Err(e) => error!(error = %e, event = "response_error", "Failed to serialize response"),
        }
    }

    info!(event = "server_shutdown", "stdin closed, shutting down");
    Ok(())
}
