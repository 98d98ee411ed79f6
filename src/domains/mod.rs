//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: tool handlers, registration and dispatch
//! - **conversions**: unit tables used by the converter tool
//! - **catalog**: the tool pages the hub advertises

pub mod catalog;
pub mod conversions;
pub mod tools;
