//! Conversion-specific error types.

use thiserror::Error;

/// Errors that can occur while resolving a conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The category is not present in the registry.
    #[error("Unknown conversion category: {0}")]
    UnknownCategory(String),

    /// The unit symbol does not belong to the category.
    #[error("Unit '{unit}' is not supported for category '{category}'")]
    UnknownUnit { category: String, unit: String },
}

impl ConversionError {
    /// Create a new "unknown category" error.
    pub fn unknown_category(name: impl Into<String>) -> Self {
        Self::UnknownCategory(name.into())
    }

    /// Create a new "unknown unit" error.
    pub fn unknown_unit(category: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::UnknownUnit {
            category: category.into(),
            unit: unit.into(),
        }
    }
}
