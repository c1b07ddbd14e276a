pub mod calc;
pub mod config;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;
pub mod validate;

pub use calc::{
    calc_attendance, can_skip_today, current_percent, final_percent_if_attend_all, reachable, required_future,
    risk_score, simulate_attend_n, simulate_miss_n, skippable, weekly_distribution_plan, AttendanceInput,
};
pub use config::{Config, ConfigError};
pub use input::{expand_key, parse_args, ParsedInput};
pub use model::record::AttendanceRecord;
pub use model::result::{AttendanceResult, SkipCheck, WeeklyPlan};
pub use model::risk::RiskLevel;
pub use repository::{AttendanceRepository, FileAttendanceRepository, FileReminderRepository, ReminderRepository};
pub use service::attendance_service::{AttendanceService, Evaluation, UpdateOutcome};
pub use service::dto::{format_percent, SimulationRow, SummaryDto};
pub use service::reminder_service::ReminderService;
pub use validate::{validate, Field, ValidationError};
