use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, Utc};

use crate::calc::AttendanceInput;

pub const DEFAULT_TARGET: f64 = 75.0;

/// The four attendance inputs as they are kept on disk.
///
/// Every field falls back to its default when it is missing or malformed,
/// so a hand-edited or truncated file still loads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    #[serde(default, deserialize_with = "lenient_count")]
    pub attended: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub remaining: u32,
    #[serde(default = "default_target", deserialize_with = "lenient_target")]
    pub target: f64,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl Default for AttendanceRecord {
    fn default() -> Self {
        Self::with_target(DEFAULT_TARGET)
    }
}

impl AttendanceRecord {
    pub fn with_target(target: f64) -> Self {
        Self {
            attended: 0,
            total: 0,
            remaining: 0,
            target,
            last_updated: Utc::now(),
        }
    }

    pub fn input(&self) -> AttendanceInput {
        AttendanceInput {
            attended: self.attended,
            total: self.total,
            remaining: self.remaining,
            target: self.target,
        }
    }

    pub fn mark_present(&mut self) {
        self.attended = self.attended.saturating_add(1);
        self.total = self.total.saturating_add(1);
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn mark_absent(&mut self) {
        self.total = self.total.saturating_add(1);
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn reset(&mut self, target: f64) {
        *self = Self::with_target(target);
    }

    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

fn default_target() -> f64 {
    DEFAULT_TARGET
}

// Counts written by older builds or by hand may be floats, strings or null.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}

fn lenient_target<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite() && *n != 0.0).unwrap_or(DEFAULT_TARGET))
}
