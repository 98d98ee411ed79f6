//! Tool Hub Server Library
//!
//! Stateless computation backend for the tool hub's client-side pages. A tool
//! identifier and a JSON payload go in; a JSON result or a typed error comes
//! out.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool handlers, registration and dispatch
//!   - **conversions**: unit tables behind the unit converter
//!   - **catalog**: the tool pages the hub advertises
//!
//! # Example
//!
//! ```rust
//! use toolhub_server::domains::tools::ToolRegistry;
//! use toolhub_server::core::config::ToolsConfig;
//!
//! let registry = ToolRegistry::with_default_tools(&ToolsConfig::default());
//! let envelope = registry.dispatch(
//!     "unit-converter",
//!     &serde_json::json!({"category": "length", "from_unit": "m", "to_unit": "cm", "value": 2}),
//! );
//! assert_eq!(envelope.fields().unwrap()["result"], serde_json::json!(200.0));
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, Result, ToolHubServer};
pub use domains::tools::{Envelope, ErrorCode, ToolRegistry};
