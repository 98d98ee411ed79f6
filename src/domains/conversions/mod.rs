//! Conversion tables domain.
//!
//! Holds the static unit tables used by the unit converter tool. Each
//! category maps unit symbols to a scale factor relative to a single base
//! unit, so converting between any two units is a pivot through the base:
//! `value * factor(from) / factor(to)`.
//!
//! ## Adding a Category or Unit
//!
//! Edit the tables in `registry.rs`. No dispatch code needs to change.

mod error;
mod registry;

pub use error::ConversionError;
pub use registry::{ConversionCategory, categories, lookup};
