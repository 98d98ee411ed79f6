//! Unit converter tool definition.
//!
//! Converts a value between two units of the same category using the
//! conversion registry.

use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::common::{finite_output, into_fields, lenient_f64, parse_params, round_to};
use crate::domains::conversions;
use crate::domains::tools::{ToolError, ToolHandler};

/// Decimal places kept in the converted result.
const RESULT_PRECISION: i32 = 6;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the unit converter.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UnitConvertParams {
    /// Measurement category ("length" or "weight").
    #[serde(default)]
    pub category: Option<String>,

    /// Source unit symbol (e.g. "m").
    #[serde(default)]
    pub from_unit: Option<String>,

    /// Target unit symbol (e.g. "cm").
    #[serde(default)]
    pub to_unit: Option<String>,

    /// Value expressed in the source unit. Numeric strings are accepted.
    #[serde(default, deserialize_with = "lenient_f64")]
    #[schemars(with = "f64")]
    pub value: f64,
}

/// Converter output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub result: f64,
    pub from_unit: String,
    pub to_unit: String,
    pub original_value: f64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Unit converter tool.
pub struct UnitConverterTool;

impl UnitConverterTool {
    /// Tool identifier.
    pub const NAME: &'static str = "unit-converter";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Convert a value between units of the same category (length: mm, cm, m, km, in, ft, yd, mi; weight: mg, g, kg, oz, lb).";

    /// Execute the tool logic.
    pub fn execute(params: &UnitConvertParams) -> Result<Conversion, ToolError> {
        let category = params
            .category
            .as_deref()
            .ok_or_else(|| ToolError::unsupported_conversion("missing category"))?;
        let from_unit = params
            .from_unit
            .as_deref()
            .ok_or_else(|| ToolError::unsupported_conversion("missing from_unit"))?;
        let to_unit = params
            .to_unit
            .as_deref()
            .ok_or_else(|| ToolError::unsupported_conversion("missing to_unit"))?;

        let table = conversions::lookup(category)?;
        let converted = finite_output("result", table.convert(params.value, from_unit, to_unit)?)?;
        debug!("{} {} -> {} {} ({})", params.value, from_unit, converted, to_unit, category);

        Ok(Conversion {
            result: round_to(converted, RESULT_PRECISION),
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
            original_value: params.value,
        })
    }
}

impl ToolHandler for UnitConverterTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        cached_schema_for_type::<UnitConvertParams>()
    }

    #[instrument(skip_all, name = "unit_converter")]
    fn handle(&self, payload: &Value) -> Result<Map<String, Value>, ToolError> {
        let params: UnitConvertParams = parse_params(payload)?;
        into_fields(&Self::execute(&params)?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(payload: Value) -> Result<Map<String, Value>, ToolError> {
        UnitConverterTool.handle(&payload)
    }

    #[test]
    fn test_meters_to_centimeters() {
        let fields = run(json!({
            "category": "length",
            "from_unit": "m",
            "to_unit": "cm",
            "value": 2
        }))
        .unwrap();

        assert_eq!(
            Value::Object(fields),
            json!({
                "result": 200.0,
                "from_unit": "m",
                "to_unit": "cm",
                "original_value": 2.0
            })
        );
    }

    #[test]
    fn test_result_rounded_to_six_places() {
        let fields = run(json!({
            "category": "length",
            "from_unit": "in",
            "to_unit": "mi",
            "value": "1000"
        }))
        .unwrap();

        // 25400 mm / 1609344 mm = 0.0157828...
        assert_eq!(fields["result"], json!(0.015783));
        assert_eq!(fields["original_value"], json!(1000.0));
    }

    #[test]
    fn test_huge_value_is_not_nulled() {
        let fields = run(json!({
            "category": "length",
            "from_unit": "mm",
            "to_unit": "mm",
            "value": 1e303
        }))
        .unwrap();
        assert_eq!(fields["result"], json!(1e303));
        assert_eq!(fields["original_value"], json!(1e303));
    }

    #[test]
    fn test_overflowing_conversion_rejected() {
        let err = run(json!({
            "category": "length",
            "from_unit": "mi",
            "to_unit": "mm",
            "value": 1e305
        }))
        .unwrap_err();
        assert!(matches!(err, ToolError::BadRequest(_)));
    }

    #[test]
    fn test_weight_conversion() {
        let conversion = UnitConverterTool::execute(&UnitConvertParams {
            category: Some("weight".into()),
            from_unit: Some("kg".into()),
            to_unit: Some("g".into()),
            value: 1.5,
        })
        .unwrap();
        assert_eq!(conversion.result, 1500.0);
    }

    #[test]
    fn test_cross_category_unsupported() {
        let err = run(json!({
            "category": "length",
            "from_unit": "m",
            "to_unit": "kg",
            "value": 1
        }))
        .unwrap_err();
        assert!(matches!(err, ToolError::UnsupportedConversion(_)));
    }

    #[test]
    fn test_unknown_category_unsupported() {
        let err = run(json!({
            "category": "volume",
            "from_unit": "l",
            "to_unit": "ml",
            "value": 1
        }))
        .unwrap_err();
        assert!(matches!(err, ToolError::UnsupportedConversion(_)));

        let err = run(json!({"from_unit": "m", "to_unit": "cm"})).unwrap_err();
        assert!(matches!(err, ToolError::UnsupportedConversion(_)));
    }

    #[test]
    fn test_non_numeric_value_is_bad_request() {
        let err = run(json!({
            "category": "length",
            "from_unit": "m",
            "to_unit": "cm",
            "value": "two"
        }))
        .unwrap_err();
        assert!(matches!(err, ToolError::BadRequest(_)));
    }

    #[test]
    fn test_missing_value_defaults_to_zero() {
        let fields = run(json!({"category": "weight", "from_unit": "lb", "to_unit": "oz"})).unwrap();
        assert_eq!(fields["result"], json!(0.0));
    }
}
