use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Safe,
    LowRisk,
    Moderate,
    HighRisk,
    Critical,
}

impl RiskLevel {
    /// Safe ≤20, Low Risk ≤40, Moderate ≤60, High Risk ≤80, Critical above.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=20 => RiskLevel::Safe,
            21..=40 => RiskLevel::LowRisk,
            41..=60 => RiskLevel::Moderate,
            61..=80 => RiskLevel::HighRisk,
            _ => RiskLevel::Critical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "Safe",
            RiskLevel::LowRisk => "Low Risk",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::HighRisk => "High Risk",
            RiskLevel::Critical => "Critical",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "emerald",
            RiskLevel::LowRisk => "green",
            RiskLevel::Moderate => "yellow",
            RiskLevel::HighRisk => "orange",
            RiskLevel::Critical => "red",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
