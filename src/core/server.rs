//! Tool hub server and lifecycle management.
//!
//! The server owns the configuration and the tool registry. Transports hold a
//! clone of it: HTTP calls [`ToolHubServer::dispatch`] directly, while MCP
//! transports go through the rmcp `ServerHandler` implementation, whose tool
//! router is built from the same registry.
//!
//! **Adding a new tool does NOT require modifying this file!** Register it in
//! the tool registry instead.

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::error::Result as ServerResult;
use crate::domains::tools::{Envelope, ToolRegistry, build_tool_router};

/// The main server handler.
#[derive(Clone)]
pub struct ToolHubServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools, shared with the tool router.
    registry: Arc<ToolRegistry>,

    /// Tool router for MCP tool calls.
    tool_router: ToolRouter<Self>,
}

impl ToolHubServer {
    /// Create a new server with the given configuration.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: Config) -> ServerResult<Self> {
        config.validate()?;
        let registry = ToolRegistry::with_default_tools(&config.tools);
        Ok(Self::with_registry(config, registry))
    }

    /// Create a server around a custom registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        let registry = Arc::new(registry);
        info!("Registered tools: {}", registry.tool_names().join(", "));

        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Run a tool by identifier.
    pub fn dispatch(&self, tool_id: &str, payload: &Value) -> Envelope {
        self.registry.dispatch(tool_id, payload)
    }

    /// List all available tools as JSON metadata.
    pub fn list_tools(&self) -> Vec<Value> {
        self.registry
            .tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for ToolHubServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tool hub calculations: gpa-calculator, pomodoro-timer and unit-converter. \
                 Each tool returns a JSON object; failures carry an error message and code."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
