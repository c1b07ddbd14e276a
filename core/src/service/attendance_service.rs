use crate::config::{Config, Limits};
use crate::input::RecordUpdate;
use crate::model::record::{AttendanceRecord, DEFAULT_TARGET};
use crate::model::result::AttendanceResult;
use crate::repository::AttendanceRepository;
use crate::validate::{validate_with_limits, ValidationError};
use anyhow::Result;
use tracing::{debug, info};

/// A stored record together with its validation outcome.
///
/// `result` is only present when `errors` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub record: AttendanceRecord,
    pub errors: Vec<ValidationError>,
    pub result: Option<AttendanceResult>,
}

impl Evaluation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Saved(AttendanceRecord),
    Rejected(Vec<ValidationError>),
}

pub struct AttendanceService<R: AttendanceRepository> {
    repo: R,
    default_target: f64,
    limits: Limits,
}

impl<R: AttendanceRepository> AttendanceService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            default_target: DEFAULT_TARGET,
            limits: Limits::default(),
        }
    }

    pub fn with_config(repo: R, config: &Config) -> Self {
        Self {
            repo,
            default_target: config.defaults.target,
            limits: config.limits,
        }
    }

    pub fn record(&self) -> Result<AttendanceRecord> {
        self.repo.load()
    }

    pub fn evaluate(&self) -> Result<Evaluation> {
        let record = self.repo.load()?;
        Ok(self.evaluate_record(record))
    }

    pub fn evaluate_record(&self, record: AttendanceRecord) -> Evaluation {
        let errors = validate_with_limits(
            f64::from(record.attended),
            f64::from(record.total),
            f64::from(record.remaining),
            record.target,
            &self.limits,
        );
        let result = if errors.is_empty() {
            Some(record.input().calc())
        } else {
            debug!(count = errors.len(), "record failed validation, withholding result");
            None
        };
        Evaluation { record, errors, result }
    }

    /// Applies user-entered values over the stored record.
    ///
    /// Nothing is saved when the merged values fail validation.
    pub fn update(&self, update: RecordUpdate) -> Result<UpdateOutcome> {
        let current = self.repo.load()?;

        let attended = update.attended.unwrap_or(f64::from(current.attended));
        let total = update.total.unwrap_or(f64::from(current.total));
        let remaining = update.remaining.unwrap_or(f64::from(current.remaining));
        let target = update.target.unwrap_or(current.target);

        let errors = validate_with_limits(attended, total, remaining, target, &self.limits);
        if !errors.is_empty() {
            return Ok(UpdateOutcome::Rejected(errors));
        }

        // Fractional counts are truncated, as the entry form does.
        let mut record = AttendanceRecord {
            attended: attended.trunc() as u32,
            total: total.trunc() as u32,
            remaining: remaining.trunc() as u32,
            target,
            last_updated: current.last_updated,
        };
        self.persist(&mut record)?;
        info!(
            attended = record.attended,
            total = record.total,
            remaining = record.remaining,
            target = record.target,
            "attendance record updated"
        );
        Ok(UpdateOutcome::Saved(record))
    }

    pub fn mark_present(&self) -> Result<AttendanceRecord> {
        let mut record = self.repo.load()?;
        record.mark_present();
        self.persist(&mut record)?;
        info!(attended = record.attended, total = record.total, "marked present");
        Ok(record)
    }

    pub fn mark_absent(&self) -> Result<AttendanceRecord> {
        let mut record = self.repo.load()?;
        record.mark_absent();
        self.persist(&mut record)?;
        info!(attended = record.attended, total = record.total, "marked absent");
        Ok(record)
    }

    pub fn reset(&self) -> Result<AttendanceRecord> {
        let mut record = self.repo.load()?;
        record.reset(self.default_target);
        self.persist(&mut record)?;
        info!("attendance record reset");
        Ok(record)
    }

    fn persist(&self, record: &mut AttendanceRecord) -> Result<()> {
        record.touch();
        self.repo.save(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Field;
    use std::cell::RefCell;

    struct MemoryRepo {
        record: RefCell<AttendanceRecord>,
        saves: RefCell<usize>,
    }

    impl MemoryRepo {
        fn with(attended: u32, total: u32, remaining: u32, target: f64) -> Self {
            let mut record = AttendanceRecord::with_target(target);
            record.attended = attended;
            record.total = total;
            record.remaining = remaining;
            Self {
                record: RefCell::new(record),
                saves: RefCell::new(0),
            }
        }
    }

    impl AttendanceRepository for &MemoryRepo {
        fn load(&self) -> Result<AttendanceRecord> {
            Ok(self.record.borrow().clone())
        }
        fn save(&self, record: &AttendanceRecord) -> Result<()> {
            *self.record.borrow_mut() = record.clone();
            *self.saves.borrow_mut() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_evaluate_valid_record() {
        let repo = MemoryRepo::with(90, 100, 20, 75.0);
        let service = AttendanceService::new(&repo);
        let evaluation = service.evaluate().unwrap();
        assert!(evaluation.is_valid());
        let result = evaluation.result.unwrap();
        assert_eq!(result.skippable, 20);
    }

    #[test]
    fn test_evaluate_withholds_result_on_invalid_record() {
        // Hand-edited file with attended > total
        let repo = MemoryRepo::with(12, 10, 0, 75.0);
        let service = AttendanceService::new(&repo);
        let evaluation = service.evaluate().unwrap();
        assert!(!evaluation.is_valid());
        assert_eq!(evaluation.errors[0].field, Field::Attended);
        assert!(evaluation.result.is_none());
    }

    #[test]
    fn test_update_merges_and_saves() {
        let repo = MemoryRepo::with(10, 20, 5, 75.0);
        let service = AttendanceService::new(&repo);
        let outcome = service
            .update(RecordUpdate {
                remaining: Some(30.0),
                target: Some(80.0),
                ..RecordUpdate::default()
            })
            .unwrap();

        match outcome {
            UpdateOutcome::Saved(record) => {
                assert_eq!(record.attended, 10);
                assert_eq!(record.total, 20);
                assert_eq!(record.remaining, 30);
                assert_eq!(record.target, 80.0);
            }
            UpdateOutcome::Rejected(errors) => panic!("unexpected rejection: {:?}", errors),
        }
        assert_eq!(*repo.saves.borrow(), 1);
    }

    #[test]
    fn test_update_rejects_without_saving() {
        let repo = MemoryRepo::with(10, 20, 5, 75.0);
        let service = AttendanceService::new(&repo);
        let outcome = service
            .update(RecordUpdate {
                attended: Some(25.0),
                ..RecordUpdate::default()
            })
            .unwrap();

        match outcome {
            UpdateOutcome::Rejected(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "Attended cannot exceed total classes");
            }
            UpdateOutcome::Saved(_) => panic!("invalid update was saved"),
        }
        assert_eq!(*repo.saves.borrow(), 0);
        assert_eq!(repo.record.borrow().attended, 10);
    }

    #[test]
    fn test_update_respects_configured_ceiling() {
        let repo = MemoryRepo::with(0, 0, 0, 75.0);
        let config = Config::from_toml_str("[limits]\nmax_classes = 100").unwrap();
        let service = AttendanceService::with_config(&repo, &config);
        let outcome = service
            .update(RecordUpdate {
                total: Some(150.0),
                ..RecordUpdate::default()
            })
            .unwrap();
        assert!(matches!(outcome, UpdateOutcome::Rejected(_)));
    }

    #[test]
    fn test_quick_updates() {
        let repo = MemoryRepo::with(10, 12, 2, 75.0);
        let service = AttendanceService::new(&repo);

        let record = service.mark_present().unwrap();
        assert_eq!((record.attended, record.total, record.remaining), (11, 13, 1));

        let record = service.mark_absent().unwrap();
        assert_eq!((record.attended, record.total, record.remaining), (11, 14, 0));

        let record = service.mark_absent().unwrap();
        assert_eq!((record.attended, record.total, record.remaining), (11, 15, 0));
        assert_eq!(*repo.saves.borrow(), 3);
    }

    #[test]
    fn test_reset_uses_configured_target() {
        let repo = MemoryRepo::with(10, 12, 2, 60.0);
        let config = Config::from_toml_str("[defaults]\ntarget = 85.0").unwrap();
        let service = AttendanceService::with_config(&repo, &config);
        let record = service.reset().unwrap();
        assert_eq!(record.total, 0);
        assert_eq!(record.target, 85.0);
    }
}
