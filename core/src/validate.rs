//! Input checks run before any calculation.
//!
//! Validation never fails; it reports field-level problems and leaves it to
//! the caller to withhold computation while the list is non-empty.

pub use crate::model::result::{Field, ValidationError};
use crate::config::Limits;

pub const MAX_WEEKS: u32 = 52;
pub const MAX_CLASSES_PER_WEEK: u32 = 50;

/// Checks the raw form values against the default limits.
pub fn validate(attended: f64, total: f64, remaining: f64, target: f64) -> Vec<ValidationError> {
    validate_with_limits(attended, total, remaining, target, &Limits::default())
}

pub fn validate_with_limits(
    attended: f64,
    total: f64,
    remaining: f64,
    target: f64,
    limits: &Limits,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !is_count(attended) {
        errors.push(ValidationError::new(Field::Attended, "Classes attended must be 0 or more"));
    }
    if !is_count(total) {
        errors.push(ValidationError::new(Field::Total, "Total classes must be 0 or more"));
    }
    if !is_count(remaining) {
        errors.push(ValidationError::new(Field::Remaining, "Remaining classes must be 0 or more"));
    }
    if !target.is_finite() || target <= 0.0 || target > 100.0 {
        errors.push(ValidationError::new(Field::Target, "Target must be between 1 and 100"));
    }
    if attended.is_finite() && total.is_finite() && attended > total {
        errors.push(ValidationError::new(Field::Attended, "Attended cannot exceed total classes"));
    }

    let ceiling = f64::from(limits.max_classes);
    if total > ceiling {
        errors.push(ValidationError::new(Field::Total, "Total classes seems too large"));
    }
    if remaining > ceiling {
        errors.push(ValidationError::new(Field::Remaining, "Remaining classes seems too large"));
    }

    errors
}

/// Bounds for the weekly planner window.
pub fn validate_plan_window(weeks: u32, classes_per_week: u32) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if weeks == 0 || weeks > MAX_WEEKS {
        errors.push(ValidationError::new(
            Field::Weeks,
            format!("Weeks remaining must be between 1 and {MAX_WEEKS}"),
        ));
    }
    if classes_per_week == 0 || classes_per_week > MAX_CLASSES_PER_WEEK {
        errors.push(ValidationError::new(
            Field::ClassesPerWeek,
            format!("Classes per week must be between 1 and {MAX_CLASSES_PER_WEEK}"),
        ));
    }
    errors
}

fn is_count(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
