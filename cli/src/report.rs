use attendance_core::model::reminder::{Notification, ReminderSettings};
use attendance_core::model::risk::RiskLevel;
use attendance_core::service::attendance_service::Evaluation;
use attendance_core::service::dto::{format_percent, SimulationRow};
use attendance_core::usecase::planner::{PlanReport, PlannerOutcome};
use attendance_core::{AttendanceRecord, AttendanceResult, ValidationError};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct WhatIfRow {
    #[tabled(rename = "Classes")]
    classes: u32,
    #[tabled(rename = "Attendance")]
    percent: String,
    #[tabled(rename = "Skips")]
    skippable: u32,
    #[tabled(rename = "Reachable")]
    reachable: &'static str,
    #[tabled(rename = "Risk")]
    risk: String,
}

#[derive(Tabled)]
struct WeekRow {
    #[tabled(rename = "Week")]
    week: u32,
    #[tabled(rename = "Attend")]
    attend: u32,
    #[tabled(rename = "Can skip")]
    skip: u32,
}

#[derive(Tabled)]
struct ErrorRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Problem")]
    message: String,
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

/// Bold 256-colour escape for a risk tier's colour name.
fn risk_ansi(level: RiskLevel) -> &'static str {
    match level.color() {
        "emerald" => "\x1b[1;38;5;36m",
        "green" => "\x1b[1;38;5;76m",
        "yellow" => "\x1b[1;38;5;220m",
        "orange" => "\x1b[1;38;5;208m",
        _ => "\x1b[1;38;5;196m",
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

pub fn show_summary(record: &AttendanceRecord, result: &AttendanceResult) {
    let level = result.risk_level();
    println!(
        "\n{}{} ({}/100)\x1b[0m  {}/{} attended, {} remaining, target {}%",
        risk_ansi(level),
        level,
        result.risk_score,
        record.attended,
        record.total,
        record.remaining,
        record.target
    );

    let rows = vec![
        FieldRow { name: "Current", value: format_percent(result.current_percent) },
        FieldRow { name: "Required in total", value: result.required_total.to_string() },
        FieldRow { name: "Still to attend", value: result.required_future.to_string() },
        FieldRow { name: "Can skip", value: result.skippable.to_string() },
        FieldRow { name: "Target reachable", value: yes_no(result.reachable).to_string() },
        FieldRow { name: "If you attend all", value: format_percent(result.final_percent_if_attend_all) },
    ];
    print_table(rows);

    if !result.reachable {
        println!("Even attending every remaining class ends at {}.", format_percent(result.final_percent_if_attend_all));
    }
}

pub fn show_errors(errors: &[ValidationError]) {
    println!("\x1b[1;31mPlease fix the following:\x1b[0m");
    let rows = errors
        .iter()
        .map(|e| ErrorRow { field: e.field.to_string(), message: e.message.clone() })
        .collect();
    print_table::<ErrorRow>(rows);
}

pub fn show_evaluation(evaluation: &Evaluation) {
    match &evaluation.result {
        Some(result) => show_summary(&evaluation.record, result),
        None => show_errors(&evaluation.errors),
    }
}

pub fn show_outcome<T>(outcome: PlannerOutcome<T>, show: impl FnOnce(T)) {
    match outcome {
        PlannerOutcome::Invalid(errors) => show_errors(&errors),
        PlannerOutcome::NoData => println!("Enter your attendance first (attendance set att:.. tot:.. rem:..)."),
        PlannerOutcome::NoRemaining => println!("No classes remaining this term."),
        PlannerOutcome::Ready(value) => show(value),
    }
}

pub fn show_simulation(rows: &[SimulationRow]) {
    let rows = rows
        .iter()
        .map(|row| WhatIfRow {
            classes: row.classes,
            percent: format_percent(row.current_percent),
            skippable: row.skippable,
            reachable: yes_no(row.reachable),
            risk: format!("{} ({})", row.risk_level, row.risk_score),
        })
        .collect();
    print_table::<WhatIfRow>(rows);
}

pub fn show_plan(report: &PlanReport) {
    let plan = &report.plan;
    println!(
        "\n\x1b[1;36m{} week(s) x {} class(es)\x1b[0m  attend at least {}/week, skip up to {}/week",
        plan.weeks_remaining, plan.classes_per_week, plan.min_per_week, plan.skippable_per_week
    );
    if report.mismatch {
        println!(
            "\x1b[1;33mWarning:\x1b[0m this window holds {} classes but {} remain. Check weeks and classes per week.",
            report.planned_classes, report.remaining
        );
    }

    let rows = plan
        .distribution
        .iter()
        .enumerate()
        .map(|(i, &attend)| WeekRow {
            week: i as u32 + 1,
            attend,
            skip: plan.classes_per_week.saturating_sub(attend),
        })
        .collect();
    print_table::<WeekRow>(rows);
    println!("Planned attendance: {} class(es)", plan.planned_total());
}

pub fn show_reminder_settings(settings: &ReminderSettings) {
    let on_off = |v: bool| (if v { "on" } else { "off" }).to_string();
    let rows = vec![
        FieldRow { name: "Enabled", value: on_off(settings.enabled) },
        FieldRow { name: "Time", value: settings.time.clone() },
        FieldRow { name: "Daily reminder", value: on_off(settings.daily_reminder) },
        FieldRow { name: "Risk alert", value: on_off(settings.risk_alert) },
        FieldRow { name: "Weekly summary", value: on_off(settings.weekly_summary) },
    ];
    print_table(rows);
}

pub fn show_notifications(notifications: &[Notification]) {
    if notifications.is_empty() {
        println!("No reminders due today.");
        return;
    }
    for notification in notifications {
        println!("\x1b[1m{}\x1b[0m\n  {}", notification.title, notification.body);
    }
}
