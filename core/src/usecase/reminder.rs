use crate::model::reminder::{Notification, NotificationKind, ReminderSettings};
use crate::model::risk::RiskLevel;
use crate::repository::{AttendanceRepository, ReminderRepository};
use crate::service::attendance_service::{AttendanceService, Evaluation};
use crate::service::dto::format_percent;
use crate::service::reminder_service::ReminderService;
use crate::time::is_week_start;
use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

const TITLE: &str = "Attendance Planner";

pub struct ReminderUseCase<'a, R: AttendanceRepository, S: ReminderRepository> {
    attendance_service: &'a AttendanceService<R>,
    reminder_service: &'a ReminderService<S>,
}

impl<'a, R: AttendanceRepository, S: ReminderRepository> ReminderUseCase<'a, R, S> {
    pub fn new(attendance_service: &'a AttendanceService<R>, reminder_service: &'a ReminderService<S>) -> Self {
        Self {
            attendance_service,
            reminder_service,
        }
    }

    /// Notifications that would fire at the configured time on `today`.
    pub fn notifications_for(&self, today: NaiveDate) -> Result<Vec<Notification>> {
        let settings = self.reminder_service.get_settings()?;
        let evaluation = self.attendance_service.evaluate()?;
        let notifications = compose_notifications(&settings, &evaluation, today);
        debug!(count = notifications.len(), %today, "composed reminders");
        Ok(notifications)
    }
}

pub fn compose_notifications(settings: &ReminderSettings, evaluation: &Evaluation, today: NaiveDate) -> Vec<Notification> {
    if !settings.enabled {
        return Vec::new();
    }

    let mut notifications = Vec::new();
    let result = evaluation.result.as_ref();

    if settings.daily_reminder {
        let body = match result {
            Some(result) => format!(
                "Time to check your attendance. You're at {}.",
                format_percent(result.current_percent)
            ),
            None => "Time to check your attendance".to_string(),
        };
        notifications.push(Notification {
            kind: NotificationKind::DailyReminder,
            title: TITLE.to_string(),
            body,
        });
    }

    if let Some(result) = result {
        if settings.risk_alert && result.risk_level() >= RiskLevel::HighRisk {
            let body = if result.reachable {
                format!(
                    "{} ({}). Attend the next {} class(es) to reach {}%.",
                    result.risk_level(),
                    format_percent(result.current_percent),
                    result.required_future,
                    evaluation.record.target
                )
            } else {
                format!(
                    "{} ({}). {}% is no longer reachable this term.",
                    result.risk_level(),
                    format_percent(result.current_percent),
                    evaluation.record.target
                )
            };
            notifications.push(Notification {
                kind: NotificationKind::RiskAlert,
                title: format!("{} - Risk Alert", TITLE),
                body,
            });
        }

        if settings.weekly_summary && is_week_start(today) {
            notifications.push(Notification {
                kind: NotificationKind::WeeklySummary,
                title: format!("{} - Weekly Summary", TITLE),
                body: format!(
                    "{} attendance, {} skip(s) available, {} class(es) remaining.",
                    format_percent(result.current_percent),
                    result.skippable,
                    evaluation.record.remaining
                ),
            });
        }
    }

    notifications
}
