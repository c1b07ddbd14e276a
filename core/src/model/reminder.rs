use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub time: String, // HH:MM
    pub daily_reminder: bool,
    pub risk_alert: bool,
    pub weekly_summary: bool,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            time: "08:00".to_string(),
            daily_reminder: true,
            risk_alert: true,
            weekly_summary: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    DailyReminder,
    RiskAlert,
    WeeklySummary,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_merge_over_defaults() {
        let settings: ReminderSettings =
            serde_json::from_str(r#"{"enabled": true, "time": "07:30"}"#).unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.time, "07:30");
        assert!(settings.daily_reminder);
        assert!(settings.risk_alert);
        assert!(settings.weekly_summary);
    }
}
