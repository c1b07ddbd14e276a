mod report;
mod tui;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use attendance_core::config::Config;
use attendance_core::input::{parse_record_update, parse_reminder_update};
use attendance_core::repository::{FileAttendanceRepository, FileReminderRepository};
use attendance_core::service::attendance_service::{AttendanceService, UpdateOutcome};
use attendance_core::service::dto::SummaryDto;
use attendance_core::service::reminder_service::ReminderService;
use attendance_core::time::{parse_term_end, weeks_until};
use attendance_core::usecase::planner::{skip_message, PlannerUseCase, Scenario};
use attendance_core::usecase::reminder::ReminderUseCase;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "attendance")]
#[command(about = "Attendance calculator and skip planner", long_about = None)]
struct Cli {
    /// Trace logging to stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Directory holding attendance.json and reminder_settings.json
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the stored record with its computed result
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Update fields (usage: set att:55 tot:80 rem:20 tar:75)
    Set {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Record one attended class
    Present,
    /// Record one missed class
    Absent,
    /// Clear all counts and restore the default target
    Reset,
    /// What-if scenarios
    Simulate {
        #[command(subcommand)]
        scenario: SimulateCommand,
    },
    /// Can I skip today?
    Skip,
    /// Weekly attendance plan
    Plan {
        #[arg(long)]
        weeks: Option<u32>,
        #[arg(long)]
        per_week: Option<u32>,
        /// Last day of term (YYYY-MM-DD, +Nd, +Nw, eow, eom); overrides --weeks
        #[arg(long, value_name = "DATE")]
        until: Option<String>,
    },
    /// Reminder settings and notifications
    Reminder {
        #[command(subcommand)]
        action: ReminderCommand,
    },
    /// Open the terminal dashboard
    Tui,
}

#[derive(Subcommand)]
enum SimulateCommand {
    /// Miss the next N classes
    Miss { n: u32 },
    /// Attend the next N classes
    Attend { n: u32 },
    /// Table of outcomes for 0..=N classes
    Table {
        #[arg(value_enum, default_value_t = ScenarioArg::Miss)]
        scenario: ScenarioArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ScenarioArg {
    Miss,
    Attend,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Miss => Scenario::Miss,
            ScenarioArg::Attend => Scenario::Attend,
        }
    }
}

#[derive(Subcommand)]
enum ReminderCommand {
    Show,
    /// Update settings (usage: reminder set enabled:on time:07:30 weekly:off)
    Set {
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Notifications that would fire today
    Preview,
}

fn init_tracing(debug: bool, level: &str) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&Config::default_path())?;
    init_tracing(cli.debug, &config.logging.level);

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    debug!(data_dir = %data_dir.display(), "using data directory");

    let attendance_service =
        AttendanceService::with_config(FileAttendanceRepository::new(Some(data_dir.clone()))?, &config);
    let reminder_service = ReminderService::new(FileReminderRepository::new(Some(data_dir))?);
    let planner = PlannerUseCase::new(&attendance_service, config.planner);

    match cli.command {
        Some(Commands::Show { json }) => {
            let evaluation = attendance_service.evaluate()?;
            match (&evaluation.result, json) {
                (Some(result), true) => {
                    let summary = SummaryDto::from_result(&evaluation.record, result);
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
                (Some(result), false) => report::show_summary(&evaluation.record, result),
                (None, _) => report::show_errors(&evaluation.errors),
            }
        }
        Some(Commands::Set { args }) => {
            let update = parse_record_update(&args)?;
            if update.is_empty() {
                return Err(anyhow!("Nothing to update. Usage: set att:55 tot:80 rem:20 tar:75"));
            }
            match attendance_service.update(update)? {
                UpdateOutcome::Saved(record) => {
                    let evaluation = attendance_service.evaluate_record(record);
                    if let Some(result) = &evaluation.result {
                        report::show_summary(&evaluation.record, result);
                    }
                }
                UpdateOutcome::Rejected(errors) => {
                    report::show_errors(&errors);
                    println!("Nothing was saved.");
                }
            }
        }
        Some(Commands::Present) => {
            let record = attendance_service.mark_present()?;
            println!("Marked present.");
            report::show_evaluation(&attendance_service.evaluate_record(record));
        }
        Some(Commands::Absent) => {
            let record = attendance_service.mark_absent()?;
            println!("Marked absent.");
            report::show_evaluation(&attendance_service.evaluate_record(record));
        }
        Some(Commands::Reset) => {
            let record = attendance_service.reset()?;
            println!("Record reset. Target is {}%.", record.target);
        }
        Some(Commands::Simulate { scenario }) => match scenario {
            SimulateCommand::Miss { n } => {
                report::show_outcome(planner.what_if(Scenario::Miss, n)?, |row| report::show_simulation(&[row]));
            }
            SimulateCommand::Attend { n } => {
                report::show_outcome(planner.what_if(Scenario::Attend, n)?, |row| report::show_simulation(&[row]));
            }
            SimulateCommand::Table { scenario } => {
                report::show_outcome(planner.what_if_table(scenario.into())?, |rows| report::show_simulation(&rows));
            }
        },
        Some(Commands::Skip) => {
            let target = attendance_service.record()?.target;
            report::show_outcome(planner.skip_today()?, |check| println!("{}", skip_message(&check, target)));
        }
        Some(Commands::Plan { weeks, per_week, until }) => {
            let weeks = match until {
                Some(until) => {
                    let today = Local::now().date_naive();
                    let end = parse_term_end(&until, today)?;
                    weeks_until(today, end)
                }
                None => weeks.unwrap_or(config.planner.weeks),
            };
            let per_week = per_week.unwrap_or(config.planner.classes_per_week);
            report::show_outcome(planner.weekly_plan(weeks, per_week)?, |plan| report::show_plan(&plan));
        }
        Some(Commands::Reminder { action }) => match action {
            ReminderCommand::Show => report::show_reminder_settings(&reminder_service.get_settings()?),
            ReminderCommand::Set { args } => {
                let settings = reminder_service.update(parse_reminder_update(&args)?)?;
                report::show_reminder_settings(&settings);
            }
            ReminderCommand::Preview => {
                let usecase = ReminderUseCase::new(&attendance_service, &reminder_service);
                let notifications = usecase.notifications_for(Local::now().date_naive())?;
                report::show_notifications(&notifications);
            }
        },
        Some(Commands::Tui) | None => {
            tui::run(&attendance_service, &planner)?;
        }
    }

    Ok(())
}

