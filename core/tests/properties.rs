//! Property-based checks for the attendance arithmetic.

use attendance_core::calc::{
    calc_attendance, current_percent, final_percent_if_attend_all, reachable, risk_score, simulate_attend_n,
    simulate_miss_n, skippable, weekly_distribution_plan,
};
use attendance_core::RiskLevel;
use proptest::prelude::*;

// (attended, total) with attended <= total
fn history() -> impl Strategy<Value = (u32, u32)> {
    (0u32..500, 0u32..500).prop_map(|(attended, missed)| (attended, attended + missed))
}

fn target() -> impl Strategy<Value = f64> {
    (1u32..=100).prop_map(f64::from)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_current_percent_is_bounded((attended, total) in history()) {
        let percent = current_percent(attended, total);
        prop_assert!((0.0..=100.0).contains(&percent));
        if total == 0 {
            prop_assert_eq!(percent, 0.0);
        }
    }

    #[test]
    fn prop_nothing_attended_means_nothing_to_skip(total in 0u32..1000, target in target()) {
        prop_assert_eq!(skippable(0, total, target), 0);
    }

    #[test]
    fn prop_more_remaining_never_hurts_reachability(
        (attended, total) in history(),
        remaining in 0u32..300,
        target in target(),
    ) {
        if reachable(attended, total, remaining, target) {
            prop_assert!(reachable(attended, total, remaining + 1, target));
        }
    }

    #[test]
    fn prop_lower_target_never_hurts_reachability(
        (attended, total) in history(),
        remaining in 0u32..300,
        high in 2u32..=100,
    ) {
        let low = high - 1;
        if reachable(attended, total, remaining, f64::from(high)) {
            prop_assert!(reachable(attended, total, remaining, f64::from(low)));
        }
    }

    #[test]
    fn prop_attending_everything_matches_final_percent(
        (attended, total) in history(),
        remaining in 0u32..300,
        target in target(),
    ) {
        let attended_all = simulate_attend_n(attended, total, remaining, target, remaining);
        prop_assert_eq!(
            attended_all.current_percent,
            final_percent_if_attend_all(attended, total, remaining)
        );
    }

    #[test]
    fn prop_missing_drains_remaining(
        (attended, total) in history(),
        remaining in 0u32..300,
        n in 0u32..400,
        target in target(),
    ) {
        let missed = simulate_miss_n(attended, total, remaining, target, n);
        let expected = calc_attendance(attended, total + n, remaining.saturating_sub(n), target);
        prop_assert_eq!(missed, expected);
    }

    #[test]
    fn prop_risk_score_is_a_percentage(
        percent in 0.0f64..=100.0,
        target in target(),
        skippable in 0u32..200,
        remaining in 0u32..200,
    ) {
        let score = risk_score(percent, target, skippable, remaining);
        prop_assert!(score <= 100);
        let level = RiskLevel::from_score(score);
        prop_assert_eq!(level >= RiskLevel::Critical, score > 80);
    }

    #[test]
    fn prop_distribution_fits_window(
        (attended, total) in history(),
        remaining in 0u32..400,
        target in target(),
        weeks in 1u32..=52,
        per_week in 1u32..=50,
    ) {
        let plan = weekly_distribution_plan(attended, total, remaining, target, weeks, per_week);
        prop_assert_eq!(plan.distribution.len(), weeks as usize);
        prop_assert!(plan.distribution.iter().all(|&week| week <= per_week));
        prop_assert!(plan.planned_total() <= remaining.min(weeks * per_week));
        prop_assert_eq!(plan.skippable_per_week, per_week.saturating_sub(plan.min_per_week));
        // Front-loaded: never more in a later week than an earlier one
        prop_assert!(plan.distribution.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn prop_calc_is_idempotent(
        (attended, total) in history(),
        remaining in 0u32..300,
        target in target(),
    ) {
        prop_assert_eq!(
            calc_attendance(attended, total, remaining, target),
            calc_attendance(attended, total, remaining, target)
        );
    }
}
