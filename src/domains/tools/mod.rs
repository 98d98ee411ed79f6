//! Tools domain module.
//!
//! This module is the computation core of the hub: it maps a tool identifier
//! to a pure handler, runs it against a JSON payload and wraps the outcome in
//! an [`Envelope`].
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - The `ToolHandler` trait every tool implements
//! - `registry.rs` - Tool registration and dispatch
//! - `router.rs` - rmcp ToolRouter built from the registry (MCP transports)
//! - `envelope.rs` - Success/failure response wrapper
//! - `error.rs` - Tool error types and codes
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a params struct and a type
//!    implementing `ToolHandler`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::with_default_tools()`
//!
//! Transports pick it up from the registry; nothing else changes.

pub mod definitions;
mod envelope;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use envelope::Envelope;
pub use error::{ErrorCode, ToolError};
pub use handlers::{ToolHandler, ToolRequest};
pub use registry::ToolRegistry;
pub use router::{build_tool_router, call_tool_result};
