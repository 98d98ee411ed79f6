//! Tool handler abstraction.
//!
//! Every tool bound to an identifier implements [`ToolHandler`]. Handlers are
//! pure: they read the payload and process-wide constants, and return either
//! output fields or a [`ToolError`]. The registry owns the handlers and is the
//! only place that turns their results into envelopes.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ToolError;

/// A tool invocation as received from a transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRequest {
    /// The identifier of the tool to execute.
    pub tool_id: String,

    /// The payload to pass to the tool.
    #[serde(default)]
    pub payload: Value,
}

impl ToolRequest {
    /// Create a new request.
    pub fn new(tool_id: impl Into<String>, payload: Value) -> Self {
        Self {
            tool_id: tool_id.into(),
            payload,
        }
    }
}

/// Trait implemented by every tool bound in the registry.
pub trait ToolHandler: Send + Sync {
    /// Identifier the tool is registered under.
    fn name(&self) -> &'static str;

    /// Human-readable description shown to clients.
    fn description(&self) -> &'static str;

    /// JSON schema of the accepted payload.
    fn input_schema(&self) -> Arc<JsonObject>;

    /// Run the computation.
    fn handle(&self, payload: &Value) -> Result<Map<String, Value>, ToolError>;

    /// Tool metadata in MCP form.
    fn to_tool(&self) -> Tool {
        Tool {
            name: self.name().into(),
            description: Some(self.description().into()),
            input_schema: self.input_schema(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
