use crate::calc::AttendanceInput;
use crate::config::PlannerConfig;
use crate::model::result::{SkipCheck, WeeklyPlan};
use crate::repository::AttendanceRepository;
use crate::service::attendance_service::AttendanceService;
use crate::service::dto::{format_percent, SimulationRow};
use crate::validate::{validate_plan_window, ValidationError};
use anyhow::Result;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Miss,
    Attend,
}

/// Whether the stored record supports planning at all.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerOutcome<T> {
    Invalid(Vec<ValidationError>),
    /// Nothing entered yet (no classes held or remaining).
    NoData,
    NoRemaining,
    Ready(T),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanReport {
    pub plan: WeeklyPlan,
    pub remaining: u32,
    /// weeks × classes per week, before capping by remaining.
    pub planned_classes: u32,
    pub mismatch: bool,
}

pub struct PlannerUseCase<'a, R: AttendanceRepository> {
    service: &'a AttendanceService<R>,
    config: PlannerConfig,
}

impl<'a, R: AttendanceRepository> PlannerUseCase<'a, R> {
    pub fn new(service: &'a AttendanceService<R>, config: PlannerConfig) -> Self {
        Self { service, config }
    }

    pub fn weekly_plan(&self, weeks: u32, classes_per_week: u32) -> Result<PlannerOutcome<PlanReport>> {
        let window_errors = validate_plan_window(weeks, classes_per_week);
        if !window_errors.is_empty() {
            return Ok(PlannerOutcome::Invalid(window_errors));
        }

        let input = match self.ready_input(false)? {
            Ok(input) => input,
            Err(outcome) => return Ok(outcome),
        };

        let plan = input.weekly_plan(weeks, classes_per_week);
        let planned_classes = weeks.saturating_mul(classes_per_week);
        let mismatch = window_mismatch(weeks, classes_per_week, input.remaining);
        debug!(weeks, classes_per_week, mismatch, "built weekly plan");

        Ok(PlannerOutcome::Ready(PlanReport {
            plan,
            remaining: input.remaining,
            planned_classes,
            mismatch,
        }))
    }

    /// Plan over the configured default window.
    pub fn default_weekly_plan(&self) -> Result<PlannerOutcome<PlanReport>> {
        self.weekly_plan(self.config.weeks, self.config.classes_per_week)
    }

    pub fn what_if(&self, scenario: Scenario, classes: u32) -> Result<PlannerOutcome<SimulationRow>> {
        let input = match self.ready_input(false)? {
            Ok(input) => input,
            Err(outcome) => return Ok(outcome),
        };
        Ok(PlannerOutcome::Ready(simulate(&input, scenario, classes)))
    }

    /// What-if rows for 0..=min(remaining, max_simulation) classes.
    pub fn what_if_table(&self, scenario: Scenario) -> Result<PlannerOutcome<Vec<SimulationRow>>> {
        let input = match self.ready_input(false)? {
            Ok(input) => input,
            Err(outcome) => return Ok(outcome),
        };
        let limit = self.simulation_limit(input.remaining);
        let rows = (0..=limit).map(|n| simulate(&input, scenario, n)).collect();
        Ok(PlannerOutcome::Ready(rows))
    }

    pub fn simulation_limit(&self, remaining: u32) -> u32 {
        remaining.min(self.config.max_simulation)
    }

    /// Only answered once classes have been held and some remain.
    pub fn skip_today(&self) -> Result<PlannerOutcome<SkipCheck>> {
        let input = match self.ready_input(true)? {
            Ok(input) => input,
            Err(outcome) => return Ok(outcome),
        };
        Ok(PlannerOutcome::Ready(input.can_skip_today()))
    }

    fn ready_input<T>(&self, needs_history: bool) -> Result<std::result::Result<AttendanceInput, PlannerOutcome<T>>> {
        let evaluation = self.service.evaluate()?;
        if !evaluation.is_valid() {
            return Ok(Err(PlannerOutcome::Invalid(evaluation.errors)));
        }
        let input = evaluation.record.input();
        if input.total == 0 && (needs_history || input.remaining == 0) {
            return Ok(Err(PlannerOutcome::NoData));
        }
        if input.remaining == 0 {
            return Ok(Err(PlannerOutcome::NoRemaining));
        }
        Ok(Ok(input))
    }
}

fn simulate(input: &AttendanceInput, scenario: Scenario, classes: u32) -> SimulationRow {
    let result = match scenario {
        Scenario::Miss => input.simulate_miss(classes),
        Scenario::Attend => input.simulate_attend(classes),
    };
    SimulationRow::from_result(classes, &result)
}

/// True when weeks × classes per week is off from the real remaining count
/// by more than half of the larger of the two.
pub fn window_mismatch(weeks: u32, classes_per_week: u32, remaining: u32) -> bool {
    let planned = u64::from(weeks) * u64::from(classes_per_week);
    if planned == 0 {
        return false;
    }
    let remaining = u64::from(remaining);
    let gap = planned.abs_diff(remaining) as f64;
    gap / planned.max(remaining) as f64 > 0.5
}

pub fn skip_message(check: &SkipCheck, target: f64) -> String {
    let after = &check.result_after_skip;
    if check.safe {
        format!(
            "Yes, you can skip! After skipping, you'd still have {} skip(s) left and {} attendance.",
            after.skippable,
            format_percent(after.current_percent)
        )
    } else {
        format!(
            "No, don't skip! Skipping would drop you to {}. You need every class to reach {}%.",
            format_percent(after.current_percent),
            target
        )
    }
}
