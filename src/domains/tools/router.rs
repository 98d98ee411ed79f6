//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Each registered handler becomes one route. Calls arriving over MCP are
//! dispatched through the same registry as HTTP calls, so both transports
//! share validation and error handling.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::{CallToolResult, Content},
};
use serde_json::Value;

use super::envelope::Envelope;
use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = ToolRouter::new();

    for handler in registry.handlers() {
        let name = handler.name();
        let registry = registry.clone();

        router = router.with_route(ToolRoute::new_dyn(
            handler.to_tool(),
            move |ctx: ToolCallContext<'_, S>| {
                let payload = ctx
                    .arguments
                    .clone()
                    .map(Value::Object)
                    .unwrap_or(Value::Null);
                let registry = registry.clone();
                async move {
                    let envelope = registry.dispatch(name, &payload);
                    Ok::<_, McpError>(call_tool_result(envelope))
                }
                .boxed()
            },
        ));
    }

    router
}

/// Convert an envelope into an MCP tool result.
///
/// The body is the same JSON an HTTP client would receive; failures set
/// `isError`.
pub fn call_tool_result(envelope: Envelope) -> CallToolResult {
    let success = envelope.is_success();
    let content = vec![Content::text(envelope.into_body().to_string())];

    if success {
        CallToolResult::success(content)
    } else {
        CallToolResult::error(content)
    }
}
