//! Pomodoro timer tool definition.
//!
//! The server does not run a clock. Each call returns the state label the
//! client should display; elapsed time is tracked client-side.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::{info, instrument};

use super::common::{into_fields, lenient_opt_number, number_from_f64, parse_params};
use crate::domains::tools::{ToolError, ToolHandler};

/// Session length used when neither the request nor the config sets one.
pub const DEFAULT_DURATION_MINUTES: f64 = 25.0;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Timer transitions a client can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Start,
    Pause,
    Reset,
}

impl FromStr for TimerAction {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "pause" => Ok(Self::Pause),
            "reset" => Ok(Self::Reset),
            other => Err(ToolError::unknown_action(other)),
        }
    }
}

/// Parameters for the pomodoro timer.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PomodoroParams {
    /// One of "start", "pause" or "reset".
    #[serde(default)]
    pub action: Option<String>,

    /// Session length in minutes, used by "start".
    #[serde(default, deserialize_with = "lenient_opt_number")]
    #[schemars(with = "Option<f64>")]
    pub duration: Option<Number>,
}

/// Timer output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TimerState {
    Started { duration: Number, start_time: String },
    Paused,
    Reset,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Pomodoro timer tool.
pub struct PomodoroTimerTool {
    default_minutes: f64,
}

impl PomodoroTimerTool {
    /// Tool identifier.
    pub const NAME: &'static str = "pomodoro-timer";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Pomodoro timer transitions. Returns the state a client should display for start, pause or reset; the client tracks elapsed time.";

    /// Create the tool with the session length used when a start omits it.
    pub fn new(default_minutes: f64) -> Self {
        Self { default_minutes }
    }

    /// Execute the tool logic.
    pub fn execute(&self, params: &PomodoroParams) -> Result<TimerState, ToolError> {
        let action = params
            .action
            .as_deref()
            .ok_or_else(|| ToolError::unknown_action("missing action"))?
            .parse::<TimerAction>()?;

        match action {
            TimerAction::Start => {
                let duration = match &params.duration {
                    Some(duration) => duration.clone(),
                    None => number_from_f64(self.default_minutes)
                        .ok_or_else(|| ToolError::bad_request("default duration is not a number"))?,
                };
                if !duration.as_f64().is_some_and(|minutes| minutes > 0.0) {
                    return Err(ToolError::bad_request("duration must be a positive number of minutes"));
                }

                let start_time = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
                info!("Pomodoro started for {} minutes at {}", duration, start_time);
                Ok(TimerState::Started { duration, start_time })
            }
            TimerAction::Pause => Ok(TimerState::Paused),
            TimerAction::Reset => Ok(TimerState::Reset),
        }
    }
}

impl Default for PomodoroTimerTool {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MINUTES)
    }
}

impl ToolHandler for PomodoroTimerTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        cached_schema_for_type::<PomodoroParams>()
    }

    #[instrument(skip_all, name = "pomodoro_timer")]
    fn handle(&self, payload: &Value) -> Result<Map<String, Value>, ToolError> {
        let params: PomodoroParams = parse_params(payload)?;
        into_fields(&self.execute(&params)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
