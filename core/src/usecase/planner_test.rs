#[cfg(test)]
mod tests {
    use crate::config::PlannerConfig;
    use crate::model::record::AttendanceRecord;
    use crate::model::risk::RiskLevel;
    use crate::repository::AttendanceRepository;
    use crate::service::attendance_service::AttendanceService;
    use crate::usecase::planner::{skip_message, window_mismatch, PlannerOutcome, PlannerUseCase, Scenario};
    use anyhow::Result;

    struct MockRepo {
        record: AttendanceRecord,
    }

    impl MockRepo {
        fn new(attended: u32, total: u32, remaining: u32) -> Self {
            let mut record = AttendanceRecord::default();
            record.attended = attended;
            record.total = total;
            record.remaining = remaining;
            Self { record }
        }
    }

    impl AttendanceRepository for MockRepo {
        fn load(&self) -> Result<AttendanceRecord> { Ok(self.record.clone()) }
        fn save(&self, _record: &AttendanceRecord) -> Result<()> { unimplemented!() }
    }

    fn planner_config() -> PlannerConfig {
        PlannerConfig::default()
    }

    #[test]
    fn test_weekly_plan_ready() {
        let service = AttendanceService::new(MockRepo::new(60, 80, 20));
        let planner = PlannerUseCase::new(&service, planner_config());

        match planner.weekly_plan(4, 5).unwrap() {
            PlannerOutcome::Ready(report) => {
                assert_eq!(report.plan.distribution, vec![4, 4, 4, 3]);
                assert_eq!(report.planned_classes, 20);
                assert_eq!(report.remaining, 20);
                assert!(!report.mismatch);
            }
            other => panic!("expected a plan, got {:?}", other),
        }
    }

    #[test]
    fn test_weekly_plan_flags_mismatch() {
        let service = AttendanceService::new(MockRepo::new(60, 80, 20));
        let planner = PlannerUseCase::new(&service, planner_config());

        // 8 x 6 = 48 planned against 20 remaining
        match planner.weekly_plan(8, 6).unwrap() {
            PlannerOutcome::Ready(report) => assert!(report.mismatch),
            other => panic!("expected a plan, got {:?}", other),
        }
    }

    #[test]
    fn test_default_plan_uses_config_window() {
        let service = AttendanceService::new(MockRepo::new(60, 80, 48));
        let config = PlannerConfig {
            weeks: 8,
            classes_per_week: 6,
            ..PlannerConfig::default()
        };
        let planner = PlannerUseCase::new(&service, config);

        match planner.default_weekly_plan().unwrap() {
            PlannerOutcome::Ready(report) => {
                assert_eq!(report.plan.distribution.len(), 8);
                assert_eq!(report.planned_classes, 48);
                assert!(!report.mismatch);
            }
            other => panic!("expected a plan, got {:?}", other),
        }
    }

    #[test]
    fn test_weekly_plan_rejects_window() {
        let service = AttendanceService::new(MockRepo::new(60, 80, 20));
        let planner = PlannerUseCase::new(&service, planner_config());
        assert!(matches!(planner.weekly_plan(0, 5).unwrap(), PlannerOutcome::Invalid(_)));
        assert!(matches!(planner.weekly_plan(4, 51).unwrap(), PlannerOutcome::Invalid(_)));
    }

    #[test]
    fn test_no_data_and_no_remaining() {
        let empty = AttendanceService::new(MockRepo::new(0, 0, 0));
        let planner = PlannerUseCase::new(&empty, planner_config());
        assert_eq!(planner.weekly_plan(4, 5).unwrap(), PlannerOutcome::NoData);
        assert_eq!(planner.what_if(Scenario::Miss, 1).unwrap(), PlannerOutcome::NoData);

        let finished = AttendanceService::new(MockRepo::new(60, 80, 0));
        let planner = PlannerUseCase::new(&finished, planner_config());
        assert_eq!(planner.what_if_table(Scenario::Attend).unwrap(), PlannerOutcome::NoRemaining);
        assert_eq!(planner.skip_today().unwrap(), PlannerOutcome::NoRemaining);
    }

    #[test]
    fn test_invalid_record_blocks_planning() {
        let service = AttendanceService::new(MockRepo::new(90, 80, 20));
        let planner = PlannerUseCase::new(&service, planner_config());
        assert!(matches!(planner.skip_today().unwrap(), PlannerOutcome::Invalid(_)));
    }

    #[test]
    fn test_skip_today_needs_history() {
        // Term not started: classes remain but none held yet
        let service = AttendanceService::new(MockRepo::new(0, 0, 40));
        let planner = PlannerUseCase::new(&service, planner_config());
        assert_eq!(planner.skip_today().unwrap(), PlannerOutcome::NoData);
        assert!(matches!(planner.what_if(Scenario::Attend, 3).unwrap(), PlannerOutcome::Ready(_)));
    }

    #[test]
    fn test_skip_today_messages() {
        let service = AttendanceService::new(MockRepo::new(90, 100, 20));
        let planner = PlannerUseCase::new(&service, planner_config());
        let check = match planner.skip_today().unwrap() {
            PlannerOutcome::Ready(check) => check,
            other => panic!("expected a skip check, got {:?}", other),
        };
        assert!(check.safe);
        assert_eq!(
            skip_message(&check, 75.0),
            "Yes, you can skip! After skipping, you'd still have 19 skip(s) left and 89.1% attendance."
        );

        let service = AttendanceService::new(MockRepo::new(55, 80, 20));
        let planner = PlannerUseCase::new(&service, planner_config());
        let check = match planner.skip_today().unwrap() {
            PlannerOutcome::Ready(check) => check,
            other => panic!("expected a skip check, got {:?}", other),
        };
        assert!(!check.safe);
        assert_eq!(
            skip_message(&check, 75.0),
            "No, don't skip! Skipping would drop you to 67.9%. You need every class to reach 75%."
        );
    }

    #[test]
    fn test_what_if_table_is_bounded() {
        let service = AttendanceService::new(MockRepo::new(90, 100, 45));
        let planner = PlannerUseCase::new(&service, planner_config());
        let rows = match planner.what_if_table(Scenario::Miss).unwrap() {
            PlannerOutcome::Ready(rows) => rows,
            other => panic!("expected rows, got {:?}", other),
        };
        assert_eq!(rows.len(), 31);
        assert_eq!(rows[0].classes, 0);
        assert_eq!(rows[30].classes, 30);
        // Missing classes never lowers risk
        assert!(rows.windows(2).all(|w| w[0].risk_score <= w[1].risk_score));
        assert_eq!(rows[0].risk_level, RiskLevel::Safe);
    }

    #[test]
    fn test_window_mismatch() {
        assert!(!window_mismatch(4, 5, 20));
        assert!(!window_mismatch(4, 5, 30)); // 10 / 30
        assert!(window_mismatch(4, 5, 41)); // 21 / 41
        assert!(window_mismatch(8, 6, 20)); // 28 / 48
        assert!(!window_mismatch(0, 6, 20));
    }
}
