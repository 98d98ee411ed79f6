//! GPA calculator tool definition.
//!
//! Computes a credit-weighted grade point average from a list of courses.

use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::common::{finite_output, into_fields, lenient_f64, parse_params, round_to};
use crate::domains::tools::{ToolError, ToolHandler};

// ============================================================================
// Grade Scale
// ============================================================================

/// Letter grade to quality points.
const GRADE_SCALE: &[(&str, f64)] = &[
    ("A+", 4.0),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("F", 0.0),
];

/// Quality points for a letter grade, case-insensitive.
pub fn grade_points(grade: &str) -> Option<f64> {
    let grade = grade.to_uppercase();
    GRADE_SCALE
        .iter()
        .find(|(symbol, _)| *symbol == grade)
        .map(|(_, points)| *points)
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// One course in a GPA request.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CourseEntry {
    /// Letter grade (A+ through F). Unrecognized grades are ignored.
    #[serde(default)]
    pub grade: String,

    /// Credit hours for the course. Numeric strings are accepted.
    #[serde(default, deserialize_with = "lenient_f64")]
    #[schemars(with = "f64")]
    pub credits: f64,
}

/// Parameters for the GPA calculator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GpaParams {
    /// Courses to aggregate.
    #[serde(default)]
    pub courses: Vec<CourseEntry>,
}

/// GPA calculator output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpaSummary {
    pub gpa: f64,
    pub total_credits: f64,
    pub total_points: f64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// GPA calculator tool.
pub struct GpaCalculatorTool;

impl GpaCalculatorTool {
    /// Tool identifier.
    pub const NAME: &'static str = "gpa-calculator";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Calculate a credit-weighted GPA on a 4.0 scale from a list of courses with letter grades and credit hours.";

    /// Execute the tool logic.
    ///
    /// Courses with an unrecognized grade contribute to neither total. With
    /// no recognized credits the GPA is 0.
    pub fn execute(params: &GpaParams) -> Result<GpaSummary, ToolError> {
        let mut total_points = 0.0;
        let mut total_credits = 0.0;

        for (index, course) in params.courses.iter().enumerate() {
            if course.credits < 0.0 {
                return Err(ToolError::bad_request(format!(
                    "courses[{}].credits must not be negative",
                    index
                )));
            }

            match grade_points(&course.grade) {
                Some(points) => {
                    total_points += points * course.credits;
                    total_credits += course.credits;
                }
                None => debug!("Skipping course {} with unrecognized grade '{}'", index, course.grade),
            }
        }

        let total_points = finite_output("total_points", total_points)?;
        let total_credits = finite_output("total_credits", total_credits)?;
        let gpa = if total_credits > 0.0 {
            total_points / total_credits
        } else {
            0.0
        };

        Ok(GpaSummary {
            gpa: round_to(finite_output("gpa", gpa)?, 2),
            total_credits,
            total_points: round_to(total_points, 2),
        })
    }
}

impl ToolHandler for GpaCalculatorTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        cached_schema_for_type::<GpaParams>()
    }

    #[instrument(skip_all, name = "gpa_calculator")]
    fn handle(&self, payload: &Value) -> Result<Map<String, Value>, ToolError> {
        let params: GpaParams = parse_params(payload)?;
        debug!("Calculating GPA for {} courses", params.courses.len());
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
        GpaCalculatorTool.handle(&payload)
    }

    #[test]
    fn test_grade_points_case_insensitive() {
        assert_eq!(grade_points("a-"), Some(3.7));
        assert_eq!(grade_points("B+"), Some(3.3));
        assert_eq!(grade_points("f"), Some(0.0));
        assert_eq!(grade_points("Z"), None);
        assert_eq!(grade_points(""), None);
        assert_eq!(GRADE_SCALE.len(), 12);
    }

    #[test]
    fn test_weighted_average() {
        let fields = run(json!({
            "courses": [
                {"grade": "A", "credits": 3},
                {"grade": "B+", "credits": 4}
            ]
        }))
        .unwrap();

        assert_eq!(fields["total_points"], json!(25.2));
        assert_eq!(fields["total_credits"], json!(7.0));
        assert_eq!(fields["gpa"], json!(3.6));
    }

    #[test]
    fn test_rounding_to_two_places() {
        let summary = GpaCalculatorTool::execute(&GpaParams {
            courses: vec![
                CourseEntry { grade: "A".into(), credits: 3.0 },
                CourseEntry { grade: "B-".into(), credits: 4.0 },
            ],
        })
        .unwrap();

        // (12.0 + 10.8) / 7 = 3.2571...
        assert_eq!(summary.gpa, 3.26);
        assert_eq!(summary.total_points, 22.8);
    }

    #[test]
    fn test_exact_tie_rounds_to_even() {
        // 68 / 32 = 2.125 exactly
        let fields = run(json!({
            "courses": [
                {"grade": "A", "credits": 17},
                {"grade": "F", "credits": 15}
            ]
        }))
        .unwrap();
        assert_eq!(fields["gpa"], json!(2.12));
    }

    #[test]
    fn test_overflowing_totals_rejected() {
        let err = run(json!({
            "courses": [
                {"grade": "A", "credits": 1e308},
                {"grade": "A", "credits": 1e308}
            ]
        }))
        .unwrap_err();
        assert!(matches!(err, ToolError::BadRequest(_)));
    }

    #[test]
    fn test_large_finite_totals_survive() {
        let fields = run(json!({"courses": [{"grade": "B", "credits": 1e300}]})).unwrap();
        assert_eq!(fields["gpa"], json!(3.0));
        let total_points = fields["total_points"].as_f64().unwrap();
        assert!((total_points / 3e300 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unrecognized_grade_is_skipped() {
        let fields = run(json!({"courses": [{"grade": "Z", "credits": 5}]})).unwrap();
        assert_eq!(fields["gpa"], json!(0.0));
        assert_eq!(fields["total_credits"], json!(0.0));
        assert_eq!(fields["total_points"], json!(0.0));
    }

    #[test]
    fn test_empty_and_missing_courses() {
        for payload in [json!({"courses": []}), json!({}), Value::Null] {
            let fields = run(payload).unwrap();
            assert_eq!(fields["gpa"], json!(0.0));
            assert_eq!(fields["total_credits"], json!(0.0));
        }
    }

    #[test]
    fn test_missing_fields_default() {
        let fields = run(json!({"courses": [{"grade": "a"}, {"credits": 3}]})).unwrap();
        assert_eq!(fields["total_credits"], json!(0.0));
    }

    #[test]
    fn test_string_credits_are_coerced() {
        let fields = run(json!({"courses": [{"grade": "b", "credits": "2"}]})).unwrap();
        assert_eq!(fields["gpa"], json!(3.0));
        assert_eq!(fields["total_credits"], json!(2.0));
    }

    #[test]
    fn test_non_numeric_credits_rejected() {
        let err = run(json!({"courses": [{"grade": "A", "credits": "three"}]})).unwrap_err();
        assert!(matches!(err, ToolError::BadRequest(_)));
    }

    #[test]
    fn test_negative_credits_rejected() {
        let err = run(json!({"courses": [{"grade": "A", "credits": -1}]})).unwrap_err();
        assert_eq!(
            err,
            ToolError::bad_request("courses[0].credits must not be negative")
        );
    }

    #[test]
    fn test_malformed_shapes_rejected() {
        assert!(run(json!({"courses": "A"})).is_err());
        assert!(run(json!({"courses": ["A"]})).is_err());
        assert!(run(json!({"courses": [{"grade": 4, "credits": 3}]})).is_err());
    }

    #[test]
    fn test_credits_only_count_recognized_grades() {
        let courses = vec![
            CourseEntry { grade: "A".into(), credits: 3.0 },
            CourseEntry { grade: "X".into(), credits: 10.0 },
            CourseEntry { grade: "c+".into(), credits: 2.5 },
            CourseEntry { grade: "F".into(), credits: 1.0 },
        ];
        let expected: f64 = courses
            .iter()
            .filter(|c| grade_points(&c.grade).is_some())
            .map(|c| c.credits)
            .sum();

        let summary = GpaCalculatorTool::execute(&GpaParams { courses }).unwrap();
        assert_eq!(summary.total_credits, expected);
        assert!((0.0..=4.0).contains(&summary.gpa));
    }
}
