use anyhow::Result;
use attendance_core::repository::AttendanceRepository;
use attendance_core::service::attendance_service::{AttendanceService, Evaluation};
use attendance_core::service::dto::SimulationRow;
use attendance_core::usecase::planner::{PlanReport, PlannerOutcome, PlannerUseCase, Scenario};

pub struct App<'a, R: AttendanceRepository> {
    service: &'a AttendanceService<R>,
    planner: &'a PlannerUseCase<'a, R>,
    pub evaluation: Evaluation,
    pub scenario: Scenario,
    pub classes: u32,
    pub simulation: Option<SimulationRow>,
    pub plan: Option<PlanReport>,
    pub status: String,
}

impl<'a, R: AttendanceRepository> App<'a, R> {
    pub fn new(service: &'a AttendanceService<R>, planner: &'a PlannerUseCase<'a, R>) -> Result<Self> {
        let mut app = App {
            service,
            planner,
            evaluation: service.evaluate()?,
            scenario: Scenario::Miss,
            classes: 1,
            simulation: None,
            plan: None,
            status: String::from("Ready"),
        };
        app.refresh_derived()?;
        Ok(app)
    }

    pub fn mark_present(&mut self) -> Result<()> {
        self.service.mark_present()?;
        self.status = String::from("Marked present");
        self.reload()
    }

    pub fn mark_absent(&mut self) -> Result<()> {
        self.service.mark_absent()?;
        self.status = String::from("Marked absent");
        self.reload()
    }

    pub fn reset(&mut self) -> Result<()> {
        self.service.reset()?;
        self.status = String::from("Record reset");
        self.reload()
    }

    pub fn more_classes(&mut self) -> Result<()> {
        let limit = self.planner.simulation_limit(self.evaluation.record.remaining);
        if self.classes < limit {
            self.classes += 1;
        }
        self.refresh_derived()
    }

    pub fn fewer_classes(&mut self) -> Result<()> {
        self.classes = self.classes.saturating_sub(1);
        self.refresh_derived()
    }

    pub fn toggle_scenario(&mut self) -> Result<()> {
        self.scenario = match self.scenario {
            Scenario::Miss => Scenario::Attend,
            Scenario::Attend => Scenario::Miss,
        };
        self.refresh_derived()
    }

    fn reload(&mut self) -> Result<()> {
        self.evaluation = self.service.evaluate()?;
        let limit = self.planner.simulation_limit(self.evaluation.record.remaining);
        self.classes = self.classes.min(limit);
        self.refresh_derived()
    }

    fn refresh_derived(&mut self) -> Result<()> {
        self.simulation = match self.planner.what_if(self.scenario, self.classes)? {
            PlannerOutcome::Ready(row) => Some(row),
            _ => None,
        };
        self.plan = match self.planner.default_weekly_plan()? {
            PlannerOutcome::Ready(report) => Some(report),
            _ => None,
        };
        Ok(())
    }
}
