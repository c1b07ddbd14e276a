use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::risk::RiskLevel;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AttendanceResult {
    pub current_percent: f64,
    /// Classes that must have been attended by the end of the period.
    pub required_total: u32,
    pub required_future: u32,
    /// Buffer banked by past attendance; independent of remaining classes.
    pub skippable: u32,
    pub reachable: bool,
    pub final_percent_if_attend_all: f64,
    /// 0-100, higher means more risk.
    pub risk_score: u8,
}

impl AttendanceResult {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SkipCheck {
    pub safe: bool,
    pub result_after_skip: AttendanceResult,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WeeklyPlan {
    pub weeks_remaining: u32,
    pub classes_per_week: u32,
    pub min_per_week: u32,
    pub skippable_per_week: u32,
    /// Minimum classes to attend, one entry per week.
    pub distribution: Vec<u32>,
}

impl WeeklyPlan {
    pub fn planned_total(&self) -> u32 {
        self.distribution.iter().sum()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Attended,
    Total,
    Remaining,
    Target,
    Weeks,
    ClassesPerWeek,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Attended => "attended",
            Field::Total => "total",
            Field::Remaining => "remaining",
            Field::Target => "target",
            Field::Weeks => "weeks",
            Field::ClassesPerWeek => "classes_per_week",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
