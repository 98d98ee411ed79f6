//! Shared payload helpers for tool definitions.
//!
//! Payloads arrive as untyped JSON. Each tool deserializes them into its own
//! params struct through [`parse_params`]; numeric fields accept JSON numbers
//! or numeric strings through the `lenient_*` deserializers.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::domains::tools::ToolError;

/// Deserialize a payload into a params struct.
///
/// A `null` payload counts as an empty object. Anything else that is not an
/// object is rejected.
pub fn parse_params<T: DeserializeOwned>(payload: &Value) -> Result<T, ToolError> {
    match payload {
        Value::Null => Ok(serde_json::from_value(Value::Object(Map::new()))?),
        Value::Object(_) => Ok(serde_json::from_value(payload.clone())?),
        other => Err(ToolError::bad_request(format!(
            "payload must be a JSON object, found {}",
            json_kind(other)
        ))),
    }
}

/// Serialize a tool's output struct into envelope fields.
pub fn into_fields<T: Serialize>(output: &T) -> Result<Map<String, Value>, ToolError> {
    match serde_json::to_value(output)? {
        Value::Object(fields) => Ok(fields),
        other => Err(ToolError::bad_request(format!(
            "tool output must be an object, found {}",
            json_kind(&other)
        ))),
    }
}

/// Magnitude from which every `f64` is already an integer.
const INTEGRAL_MAGNITUDE: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round to `places` decimal places, ties to even.
///
/// Values too large to scale are returned unchanged; they have no fractional
/// digits left to round.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    let scaled = value * scale;
    if !scaled.is_finite() || value.abs() >= INTEGRAL_MAGNITUDE {
        return value;
    }
    scaled.round_ties_even() / scale
}

/// Reject a computed value that cannot be represented in JSON.
pub fn finite_output(label: &str, value: f64) -> Result<f64, ToolError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ToolError::bad_request(format!("{} is out of range", label)))
    }
}

/// Accept a JSON number or a numeric string; reject non-finite results.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    coerce_f64(&raw).map_err(D::Error::custom)
}

/// Like [`lenient_f64`], with `null` read as absent and the number kept as
/// written. Integers stay integers, so `10` is echoed back as `10` rather than `10.0`.
pub fn lenient_opt_number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    match raw {
        Value::Null => Ok(None),
        Value::Number(n) => {
            coerce_f64(&Value::Number(n.clone())).map_err(D::Error::custom)?;
            Ok(Some(n))
        }
        Value::String(ref s) => {
            if let Ok(i) = s.trim().parse::<i64>() {
                return Ok(Some(Number::from(i)));
            }
            let value = coerce_f64(&raw).map_err(D::Error::custom)?;
            number_from_f64(value)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("expected a finite number, found {}", value)))
        }
        other => Err(D::Error::custom(format!(
            "expected a number, found {}",
            json_kind(&other)
        ))),
    }
}

/// Convert to a JSON number, preferring an integer when nothing is lost.
pub fn number_from_f64(value: f64) -> Option<Number> {
    if value.fract() == 0.0 && value.abs() < INTEGRAL_MAGNITUDE {
        return Some(Number::from(value as i64));
    }
    Number::from_f64(value)
}

fn coerce_f64(raw: &Value) -> Result<f64, String> {
    let value = match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| format!("number {} is out of range", n))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("could not convert string to number: '{}'", s))?,
        other => return Err(format!("expected a number, found {}", json_kind(other))),
    };

    if !value.is_finite() {
        return Err(format!("expected a finite number, found {}", value));
    }
    Ok(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient_f64")]
        amount: f64,
        #[serde(default, deserialize_with = "lenient_opt_number")]
        limit: Option<Number>,
    }

    #[test]
    fn test_lenient_accepts_numbers_and_strings() {
        let s: Sample = parse_params(&json!({"amount": 3, "limit": " 2.5 "})).unwrap();
        assert_eq!(s.amount, 3.0);
        assert_eq!(s.limit.and_then(|n| n.as_f64()), Some(2.5));
    }

    #[test]
    fn test_lenient_defaults() {
        let s: Sample = parse_params(&json!({"limit": null})).unwrap();
        assert_eq!(s.amount, 0.0);
        assert_eq!(s.limit, None);

        let s: Sample = parse_params(&Value::Null).unwrap();
        assert_eq!(s.amount, 0.0);
    }

    #[test]
    fn test_lenient_rejects_garbage() {
        for bad in [json!("abc"), json!(true), json!([1]), json!(null), json!("NaN"), json!("inf")] {
            let err = parse_params::<Sample>(&json!({ "amount": bad })).unwrap_err();
            assert!(matches!(err, ToolError::BadRequest(_)), "{bad}");
        }
    }

    #[derive(Debug, Deserialize)]
    struct Echo {
        #[serde(default, deserialize_with = "lenient_opt_number")]
        minutes: Option<Number>,
    }

    #[test]
    fn test_lenient_number_keeps_form() {
        let e: Echo = parse_params(&json!({"minutes": 10})).unwrap();
        assert_eq!(json!(e.minutes), json!(10));

        let e: Echo = parse_params(&json!({"minutes": 12.5})).unwrap();
        assert_eq!(json!(e.minutes), json!(12.5));

        let e: Echo = parse_params(&json!({"minutes": " 15 "})).unwrap();
        assert_eq!(json!(e.minutes), json!(15));

        let e: Echo = parse_params(&json!({"minutes": "7.5"})).unwrap();
        assert_eq!(json!(e.minutes), json!(7.5));

        let e: Echo = parse_params(&json!({})).unwrap();
        assert!(e.minutes.is_none());

        for bad in [json!("soon"), json!(false), json!("inf")] {
            assert!(parse_params::<Echo>(&json!({ "minutes": bad })).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_number_from_f64() {
        assert_eq!(number_from_f64(25.0), Some(Number::from(25)));
        assert_eq!(json!(number_from_f64(0.5)), json!(0.5));
        assert_eq!(number_from_f64(f64::NAN), None);
    }

    #[test]
    fn test_parse_params_rejects_non_object() {
        let err = parse_params::<Sample>(&json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            ToolError::bad_request("payload must be a JSON object, found an array")
        );
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.514_285_7, 2), 3.51);
        assert_eq!(round_to(0.000_000_4, 6), 0.0);
        assert_eq!(round_to(1.234_567_89, 6), 1.234_568);
    }

    #[test]
    fn test_round_to_ties_to_even() {
        assert_eq!(round_to(2.125, 2), 2.12);
        assert_eq!(round_to(2.375, 2), 2.38);
        assert_eq!(round_to(-0.5, 0), -0.0);
    }

    #[test]
    fn test_round_to_keeps_huge_values() {
        assert_eq!(round_to(1e303, 6), 1e303);
        assert_eq!(round_to(-1.5e300, 6), -1.5e300);
        assert_eq!(round_to(9_007_199_254_740_993.0, 2), 9_007_199_254_740_993.0);
    }

    #[test]
    fn test_finite_output() {
        assert_eq!(finite_output("gpa", 3.5), Ok(3.5));
        assert!(matches!(
            finite_output("gpa", f64::INFINITY),
            Err(ToolError::BadRequest(_))
        ));
        assert!(finite_output("result", f64::NAN).is_err());
    }
}
