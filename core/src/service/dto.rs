use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use crate::model::record::AttendanceRecord;
use crate::model::result::AttendanceResult;
use crate::model::risk::RiskLevel;

/// One decimal place, e.g. `75.0%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SummaryDto {
    pub attended: u32,
    pub total: u32,
    pub remaining: u32,
    pub target: f64,
    pub last_updated: DateTime<Utc>,

    pub current_percent: f64,
    pub required_total: u32,
    pub required_future: u32,
    pub skippable: u32,
    pub reachable: bool,
    pub final_percent_if_attend_all: f64,

    // Flattened risk fields for display
    pub risk_score: u8,
    pub risk_label: String,
    pub risk_color: String,
}

impl SummaryDto {
    pub fn from_result(record: &AttendanceRecord, result: &AttendanceResult) -> Self {
        let level = result.risk_level();
        Self {
            attended: record.attended,
            total: record.total,
            remaining: record.remaining,
            target: record.target,
            last_updated: record.last_updated,
            current_percent: result.current_percent,
            required_total: result.required_total,
            required_future: result.required_future,
            skippable: result.skippable,
            reachable: result.reachable,
            final_percent_if_attend_all: result.final_percent_if_attend_all,
            risk_score: result.risk_score,
            risk_label: level.label().to_string(),
            risk_color: level.color().to_string(),
        }
    }
}

/// A single what-if outcome after missing or attending `classes` more.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationRow {
    pub classes: u32,
    pub current_percent: f64,
    pub skippable: u32,
    pub reachable: bool,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
}

impl SimulationRow {
    pub fn from_result(classes: u32, result: &AttendanceResult) -> Self {
        Self {
            classes,
            current_percent: result.current_percent,
            skippable: result.skippable,
            reachable: result.reachable,
            risk_score: result.risk_score,
            risk_level: result.risk_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(75.0), "75.0%");
        assert_eq!(format_percent(68.75), "68.8%");
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(100.0 * 2.0 / 3.0), "66.7%");
    }

    #[test]
    fn test_summary_carries_risk_label() {
        let mut record = AttendanceRecord::default();
        record.attended = 55;
        record.total = 80;
        record.remaining = 20;
        let result = record.input().calc();
        let summary = SummaryDto::from_result(&record, &result);
        assert_eq!(summary.required_future, 20);
        assert_eq!(summary.risk_label, result.risk_level().label());
        assert_eq!(summary.risk_color, result.risk_level().color());
    }
}
