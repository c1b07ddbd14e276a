//! Attendance arithmetic.
//!
//! Every function here is pure: plain values in, plain values out, no I/O and
//! no retained state. Inputs are assumed to have passed [`crate::validate`];
//! the zero cases (no classes held, nothing remaining) return documented
//! zeros instead of failing.

use crate::model::result::{AttendanceResult, SkipCheck, WeeklyPlan};
use crate::validate::{validate, ValidationError};

// Risk weights
const WEIGHT_PERCENT: f64 = 0.4;
const WEIGHT_SKIP: f64 = 0.4;
const WEIGHT_BUFFER: f64 = 0.2;

/// Snapshot of the four inputs the engine works from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendanceInput {
    pub attended: u32,
    pub total: u32,
    pub remaining: u32,
    pub target: f64,
}

impl AttendanceInput {
    pub fn new(attended: u32, total: u32, remaining: u32, target: f64) -> Self {
        Self {
            attended,
            total,
            remaining,
            target,
        }
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validate(
            f64::from(self.attended),
            f64::from(self.total),
            f64::from(self.remaining),
            self.target,
        )
    }

    pub fn calc(&self) -> AttendanceResult {
        calc_attendance(self.attended, self.total, self.remaining, self.target)
    }

    pub fn simulate_miss(&self, n: u32) -> AttendanceResult {
        simulate_miss_n(self.attended, self.total, self.remaining, self.target, n)
    }

    pub fn simulate_attend(&self, n: u32) -> AttendanceResult {
        simulate_attend_n(self.attended, self.total, self.remaining, self.target, n)
    }

    pub fn can_skip_today(&self) -> SkipCheck {
        can_skip_today(self.attended, self.total, self.remaining, self.target)
    }

    pub fn weekly_plan(&self, weeks_remaining: u32, classes_per_week: u32) -> WeeklyPlan {
        weekly_distribution_plan(
            self.attended,
            self.total,
            self.remaining,
            self.target,
            weeks_remaining,
            classes_per_week,
        )
    }
}

pub fn current_percent(attended: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(attended) / f64::from(total) * 100.0
}

/// Total classes that must be attended by the end of the period.
///
/// Rounded up so the target is a floor guarantee.
pub fn required_total(total: u32, remaining: u32, target: f64) -> u32 {
    let target_frac = target / 100.0;
    let classes = f64::from(total) + f64::from(remaining);
    to_count((target_frac * classes).ceil())
}

pub fn required_future(attended: u32, total: u32, remaining: u32, target: f64) -> u32 {
    required_total(total, remaining, target).saturating_sub(attended)
}

/// Classes beyond those already held that could be missed while the current
/// attended count still meets the target. Does not look at remaining classes.
pub fn skippable(attended: u32, total: u32, target: f64) -> u32 {
    if total == 0 {
        return 0;
    }
    let target_frac = target / 100.0;
    let max_total_allowed = (f64::from(attended) / target_frac).floor();
    to_count(max_total_allowed - f64::from(total))
}

pub fn reachable(attended: u32, total: u32, remaining: u32, target: f64) -> bool {
    required_future(attended, total, remaining, target) <= remaining
}

pub fn final_percent_if_attend_all(attended: u32, total: u32, remaining: u32) -> f64 {
    let denominator = f64::from(total) + f64::from(remaining);
    if denominator == 0.0 {
        return 0.0;
    }
    (f64::from(attended) + f64::from(remaining)) / denominator * 100.0
}

/// Composite 0-100 risk heuristic.
///
/// With nothing remaining the outcome is already decided, so the score is
/// either 0 or 100. Otherwise it blends three step functions: margin to
/// target (40%), skip budget relative to remaining classes (40%) and the
/// absolute skip budget (20%).
pub fn risk_score(current_percent: f64, target: f64, skippable: u32, remaining: u32) -> u8 {
    if remaining == 0 {
        return if current_percent >= target { 0 } else { 100 };
    }

    let percent_diff = current_percent - target;
    let percent_risk = if percent_diff >= 10.0 {
        0.0
    } else if percent_diff >= 5.0 {
        20.0
    } else if percent_diff >= 0.0 {
        40.0
    } else {
        (60.0 + percent_diff.abs() * 2.0).min(100.0)
    };

    let skip_ratio = f64::from(skippable) / f64::from(remaining);
    let skip_risk = if skip_ratio >= 0.5 {
        0.0
    } else if skip_ratio >= 0.25 {
        30.0
    } else if skip_ratio >= 0.1 {
        60.0
    } else if skip_ratio > 0.0 {
        80.0
    } else {
        100.0
    };

    let buffer_risk = match skippable {
        10.. => 0.0,
        5..=9 => 20.0,
        2..=4 => 50.0,
        1 => 70.0,
        0 => 100.0,
    };

    let score = percent_risk * WEIGHT_PERCENT + skip_risk * WEIGHT_SKIP + buffer_risk * WEIGHT_BUFFER;
    score.round().clamp(0.0, 100.0) as u8
}

pub fn calc_attendance(attended: u32, total: u32, remaining: u32, target: f64) -> AttendanceResult {
    let current_percent = current_percent(attended, total);
    let required_future = required_future(attended, total, remaining, target);
    let skippable = skippable(attended, total, target);

    AttendanceResult {
        current_percent,
        required_total: required_total(total, remaining, target),
        required_future,
        skippable,
        reachable: required_future <= remaining,
        final_percent_if_attend_all: final_percent_if_attend_all(attended, total, remaining),
        risk_score: risk_score(current_percent, target, skippable, remaining),
    }
}

/// Skip the next `n` scheduled classes.
pub fn simulate_miss_n(attended: u32, total: u32, remaining: u32, target: f64, n: u32) -> AttendanceResult {
    let new_total = total.saturating_add(n);
    let new_remaining = remaining.saturating_sub(n);
    calc_attendance(attended, new_total, new_remaining, target)
}

/// Attend the next `n` scheduled classes, capped at what remains.
pub fn simulate_attend_n(attended: u32, total: u32, remaining: u32, target: f64, n: u32) -> AttendanceResult {
    let n = n.min(remaining);
    calc_attendance(
        attended.saturating_add(n),
        total.saturating_add(n),
        remaining - n,
        target,
    )
}

pub fn can_skip_today(attended: u32, total: u32, remaining: u32, target: f64) -> SkipCheck {
    let result_after_skip = simulate_miss_n(attended, total, remaining, target, 1);
    // skippable is floored at zero; the second clause stays as an invariant check.
    let safe = result_after_skip.reachable && i64::from(result_after_skip.skippable) >= 0;
    SkipCheck {
        safe,
        result_after_skip,
    }
}

/// Spread the required attendance over a planning window of
/// `weeks_remaining` weeks with `classes_per_week` classes each.
///
/// The requirement is computed against the true `remaining`, then scaled into
/// the window proportionally. When weekly caps bind, the last weeks may sum
/// to less than the scaled requirement; that shortfall is left visible.
pub fn weekly_distribution_plan(
    attended: u32,
    total: u32,
    remaining: u32,
    target: f64,
    weeks_remaining: u32,
    classes_per_week: u32,
) -> WeeklyPlan {
    let window = u64::from(weeks_remaining) * u64::from(classes_per_week);
    let total_in_window = u64::from(remaining).min(window) as u32;

    let required_future = required_future(attended, total, remaining, target);

    let required_in_window = if remaining > 0 {
        let share = f64::from(total_in_window) / f64::from(remaining);
        let scaled = to_count((f64::from(required_future) * share).ceil());
        total_in_window.min(scaled)
    } else {
        0
    };

    let min_per_week = if weeks_remaining > 0 {
        required_in_window.div_ceil(weeks_remaining)
    } else {
        0
    };
    let skippable_per_week = classes_per_week.saturating_sub(min_per_week);

    let mut distribution = Vec::with_capacity(weeks_remaining as usize);
    let mut left = required_in_window;
    for i in 0..weeks_remaining {
        let weeks_left = weeks_remaining - i;
        let this_week = classes_per_week.min(left.div_ceil(weeks_left));
        distribution.push(this_week);
        left -= this_week;
    }

    WeeklyPlan {
        weeks_remaining,
        classes_per_week,
        min_per_week,
        skippable_per_week,
        distribution,
    }
}

fn to_count(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}
