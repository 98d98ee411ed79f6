//! Tool-specific error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domains::conversions::ConversionError;

/// Machine-readable failure classification carried by error envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// A payload field is malformed or cannot be coerced.
    BadRequest,
    /// The tool identifier is not registered.
    UnknownTool,
    /// The tool is known but the requested sub-action is not.
    UnknownAction,
    /// Unknown conversion category or unit symbol.
    UnsupportedConversion,
}

impl ErrorCode {
    /// Name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BadRequest",
            Self::UnknownTool => "UnknownTool",
            Self::UnknownAction => "UnknownAction",
            Self::UnsupportedConversion => "UnsupportedConversion",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during tool operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    /// The payload could not be validated.
    #[error("{0}")]
    BadRequest(String),

    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    /// The requested action is not supported by the tool.
    #[error("Invalid action: {0}")]
    UnknownAction(String),

    /// The conversion is not supported.
    #[error("Conversion not supported: {0}")]
    UnsupportedConversion(String),
}

impl ToolError {
    /// Create a new "bad request" error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "unknown action" error.
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction(action.into())
    }

    /// Create a new "unsupported conversion" error.
    pub fn unsupported_conversion(msg: impl Into<String>) -> Self {
        Self::UnsupportedConversion(msg.into())
    }

    /// The code reported to clients for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::BadRequest(_) => ErrorCode::BadRequest,
            Self::UnknownTool(_) => ErrorCode::UnknownTool,
            Self::UnknownAction(_) => ErrorCode::UnknownAction,
            Self::UnsupportedConversion(_) => ErrorCode::UnsupportedConversion,
        }
    }
}

impl From<ConversionError> for ToolError {
    fn from(err: ConversionError) -> Self {
        Self::UnsupportedConversion(err.to_string())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ToolError::bad_request("x").code(), ErrorCode::BadRequest);
        assert_eq!(ToolError::unknown_tool("x").code(), ErrorCode::UnknownTool);
        assert_eq!(ToolError::unknown_action("x").code(), ErrorCode::UnknownAction);
        assert_eq!(
            ToolError::unsupported_conversion("x").code(),
            ErrorCode::UnsupportedConversion
        );
    }

    #[test]
    fn test_conversion_error_maps_to_unsupported() {
        let err: ToolError = ConversionError::unknown_category("volume").into();
        assert_eq!(err.code(), ErrorCode::UnsupportedConversion);
        assert!(err.to_string().contains("volume"));
    }

    #[test]
    fn test_error_code_wire_name() {
        let json = serde_json::to_value(ErrorCode::UnsupportedConversion).unwrap();
        assert_eq!(json, serde_json::json!("UnsupportedConversion"));
        assert_eq!(ErrorCode::UnknownTool.to_string(), "UnknownTool");
    }
}
