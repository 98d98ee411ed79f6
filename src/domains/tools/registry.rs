//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry mapping tool identifiers to handlers
//! - Dispatch of a payload to the bound handler, producing an [`Envelope`]
//! - Tool metadata for listing

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rmcp::model::Tool;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use super::definitions::{GpaCalculatorTool, PomodoroTimerTool, UnitConverterTool};
use super::envelope::Envelope;
use super::error::{ErrorCode, ToolError};
use super::handlers::{ToolHandler, ToolRequest};
use crate::core::config::ToolsConfig;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    handlers: BTreeMap<&'static str, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in tool.
    pub fn with_default_tools(config: &ToolsConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(GpaCalculatorTool));
        registry.register(Arc::new(PomodoroTimerTool::new(
            config.pomodoro_default_minutes,
        )));
        registry.register(Arc::new(UnitConverterTool));
        registry
    }

    /// Bind a handler to its name, returning any handler it replaced.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) -> Option<Arc<dyn ToolHandler>> {
        let name = handler.name();
        let previous = self.handlers.insert(name, handler);
        if previous.is_some() {
            warn!("Tool '{}' registered twice; keeping the latest handler", name);
        }
        previous
    }

    /// Get a handler by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.handlers.get(name)
    }

    /// Whether a tool is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// All registered handlers, ordered by name.
    pub fn handlers(&self) -> impl Iterator<Item = &Arc<dyn ToolHandler>> {
        self.handlers.values()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.handlers.keys().copied().collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.handlers.values().map(|h| h.to_tool()).collect()
    }

    /// Dispatch a request to its handler.
    pub fn dispatch_request(&self, request: &ToolRequest) -> Envelope {
        self.dispatch(&request.tool_id, &request.payload)
    }

    /// Dispatch a payload to the handler bound to `tool_id`.
    ///
    /// Never fails: unknown tools, handler errors and handler panics all come
    /// back as failure envelopes.
    #[instrument(skip(self, payload), fields(tool = %tool_id))]
    pub fn dispatch(&self, tool_id: &str, payload: &Value) -> Envelope {
        let Some(handler) = self.get(tool_id) else {
            warn!("Unknown tool requested: {}", tool_id);
            return ToolError::unknown_tool(tool_id).into();
        };

        match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(payload))) {
            Ok(Ok(fields)) => {
                debug!("Tool {} succeeded", tool_id);
                Envelope::success(fields)
            }
            Ok(Err(e)) => {
                warn!("Tool {} rejected request ({}): {}", tool_id, e.code(), e);
                e.into()
            }
            Err(cause) => {
                let detail = panic_message(cause.as_ref());
                error!("Tool {} panicked: {}", tool_id, detail);
                Envelope::failure(
                    ErrorCode::BadRequest,
                    format!("Tool {} failed: {}", tool_id, detail),
                )
            }
        }
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    if let Some(msg) = cause.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = cause.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
