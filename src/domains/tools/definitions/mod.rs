//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod gpa;
pub mod pomodoro;
pub mod unit_converter;

pub use gpa::{CourseEntry, GpaCalculatorTool, GpaParams, GpaSummary};
pub use pomodoro::{PomodoroParams, PomodoroTimerTool, TimerAction, TimerState};
pub use unit_converter::{Conversion, UnitConvertParams, UnitConverterTool};
