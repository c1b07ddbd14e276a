use crate::input::ReminderUpdate;
use crate::model::reminder::ReminderSettings;
use crate::repository::ReminderRepository;
use crate::time::parse_reminder_time;
use anyhow::Result;
use tracing::info;

pub struct ReminderService<R: ReminderRepository> {
    repo: R,
}

impl<R: ReminderRepository> ReminderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_settings(&self) -> Result<ReminderSettings> {
        self.repo.load()
    }

    /// Applies the given changes; an invalid time rejects the whole update.
    pub fn update(&self, update: ReminderUpdate) -> Result<ReminderSettings> {
        let mut settings = self.repo.load()?;

        if let Some(time) = update.time {
            let parsed = parse_reminder_time(&time)?;
            settings.time = parsed.format("%H:%M").to_string();
        }
        if let Some(enabled) = update.enabled {
            settings.enabled = enabled;
        }
        if let Some(daily) = update.daily_reminder {
            settings.daily_reminder = daily;
        }
        if let Some(risk) = update.risk_alert {
            settings.risk_alert = risk;
        }
        if let Some(weekly) = update.weekly_summary {
            settings.weekly_summary = weekly;
        }

        self.repo.save(&settings)?;
        info!(enabled = settings.enabled, time = %settings.time, "reminder settings updated");
        Ok(settings)
    }
}
