//! Response envelope returned by every dispatch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{ErrorCode, ToolError};

/// Uniform success/failure wrapper.
///
/// Serialized with a `status` tag: `{"status":"success","fields":{..}}` or
/// `{"status":"failure","message":"..","code":"BadRequest"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    /// The tool ran and produced output fields.
    Success { fields: Map<String, Value> },

    /// The request was rejected or the tool failed.
    Failure { message: String, code: ErrorCode },
}

impl Envelope {
    /// Create a success envelope.
    pub fn success(fields: Map<String, Value>) -> Self {
        Self::Success { fields }
    }

    /// Create a failure envelope.
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            code,
        }
    }

    /// Whether this is a success envelope.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Error code, if this is a failure.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { code, .. } => Some(*code),
        }
    }

    /// Output fields, if this is a success.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Success { fields } => Some(fields),
            Self::Failure { .. } => None,
        }
    }

    /// Client-facing body: the fields on success, `{error, code}` on failure.
    pub fn into_body(self) -> Value {
        match self {
            Self::Success { fields } => Value::Object(fields),
            Self::Failure { message, code } => serde_json::json!({
                "error": message,
                "code": code,
            }),
        }
    }
}

impl From<ToolError> for Envelope {
    fn from(err: ToolError) -> Self {
        Self::failure(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serialization() {
        let mut fields = Map::new();
        fields.insert("gpa".to_string(), json!(3.6));
        let value = serde_json::to_value(Envelope::success(fields)).unwrap();
        assert_eq!(value, json!({"status": "success", "fields": {"gpa": 3.6}}));
    }

    #[test]
    fn test_failure_serialization() {
        let envelope = Envelope::from(ToolError::unknown_tool("not-a-tool"));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "failure");
        assert_eq!(value["code"], "UnknownTool");
        assert_eq!(value["message"], "Tool not found: not-a-tool");
    }

    #[test]
    fn test_bodies_do_not_mix() {
        let ok = Envelope::success(Map::new()).into_body();
        assert!(ok.get("error").is_none());

        let err = Envelope::failure(ErrorCode::BadRequest, "bad").into_body();
        assert_eq!(err, json!({"error": "bad", "code": "BadRequest"}));
    }
}
