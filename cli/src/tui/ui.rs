use attendance_core::model::risk::RiskLevel;
use attendance_core::repository::AttendanceRepository;
use attendance_core::service::dto::format_percent;
use attendance_core::usecase::planner::Scenario;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::App;

const MUTED: Color = Color::DarkGray;
const LABEL: Color = Color::Blue;

fn risk_color(level: RiskLevel) -> Color {
    match level.color() {
        "emerald" => Color::Rgb(16, 185, 129),
        "green" => Color::Rgb(34, 197, 94),
        "yellow" => Color::Rgb(234, 179, 8),
        "orange" => Color::Rgb(249, 115, 22),
        _ => Color::Rgb(239, 68, 68),
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(MUTED))
}

fn field<'a>(name: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(name, Style::default().fg(LABEL)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

pub fn draw<R: AttendanceRepository>(f: &mut Frame, app: &App<'_, R>) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    let header = Paragraph::new("ATTENDANCE PLANNER")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(3)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(6)])
        .split(columns[1]);

    draw_results(f, app, left[0]);
    draw_risk_gauge(f, app, left[1]);
    draw_what_if(f, app, right[0]);
    draw_plan_chart(f, app, right[1]);

    let footer = Paragraph::new(format!(
        "p: Present | a: Absent | r: Reset | +/-: Classes | m: Miss/Attend | q: Quit    {}",
        app.status
    ))
    .style(Style::default().fg(MUTED))
    .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);
}

fn draw_results<R: AttendanceRepository>(f: &mut Frame, app: &App<'_, R>, area: Rect) {
    let record = &app.evaluation.record;
    let mut lines = vec![
        field("Attended:  ", format!("{} / {}", record.attended, record.total)),
        field("Remaining: ", record.remaining.to_string()),
        field("Target:    ", format!("{}%", record.target)),
        Line::from(""),
    ];

    match &app.evaluation.result {
        Some(result) => {
            lines.push(field("Current:   ", format_percent(result.current_percent)));
            lines.push(field("To attend: ", result.required_future.to_string()));
            lines.push(field("Can skip:  ", result.skippable.to_string()));
            let (text, color) = if result.reachable {
                ("reachable", Color::Green)
            } else {
                ("out of reach", Color::Red)
            };
            lines.push(Line::from(vec![
                Span::styled("Target is ", Style::default().fg(LABEL)),
                Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!(" (attend all: {})", format_percent(result.final_percent_if_attend_all)),
                    Style::default().fg(MUTED),
                ),
            ]));
        }
        None => {
            for error in &app.evaluation.errors {
                lines.push(Line::from(Span::styled(error.message.clone(), Style::default().fg(Color::Red))));
            }
        }
    }

    let results = Paragraph::new(lines)
        .block(panel(" Results "))
        .wrap(Wrap { trim: true });
    f.render_widget(results, area);
}

fn draw_risk_gauge<R: AttendanceRepository>(f: &mut Frame, app: &App<'_, R>, area: Rect) {
    let block = panel(" Risk ");
    let Some(result) = &app.evaluation.result else {
        f.render_widget(block, area);
        return;
    };

    let level = result.risk_level();
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(risk_color(level)))
        .ratio(f64::from(result.risk_score) / 100.0)
        .label(format!("{} {}/100", level, result.risk_score));
    f.render_widget(gauge, area);
}

fn draw_what_if<R: AttendanceRepository>(f: &mut Frame, app: &App<'_, R>, area: Rect) {
    let verb = match app.scenario {
        Scenario::Miss => "miss",
        Scenario::Attend => "attend",
    };
    let title = format!(" What if I {} {} more? ", verb, app.classes);

    let lines = match &app.simulation {
        Some(row) => vec![
            field("Attendance: ", format_percent(row.current_percent)),
            field("Can skip:   ", row.skippable.to_string()),
            Line::from(vec![
                Span::styled("Risk:       ", Style::default().fg(LABEL)),
                Span::styled(
                    format!("{} ({})", row.risk_level, row.risk_score),
                    Style::default().fg(risk_color(row.risk_level)).add_modifier(Modifier::BOLD),
                ),
            ]),
            field("Reachable:  ", (if row.reachable { "yes" } else { "no" }).to_string()),
        ],
        None => vec![Line::from(Span::styled("Nothing to simulate", Style::default().fg(MUTED)))],
    };

    f.render_widget(Paragraph::new(lines).block(panel(&title)), area);
}

fn draw_plan_chart<R: AttendanceRepository>(f: &mut Frame, app: &App<'_, R>, area: Rect) {
    let Some(report) = &app.plan else {
        let empty = Paragraph::new("No plan available")
            .alignment(Alignment::Center)
            .block(panel(" Weekly Plan "));
        f.render_widget(empty, area);
        return;
    };

    let plan = &report.plan;
    let bars: Vec<Bar> = plan
        .distribution
        .iter()
        .enumerate()
        .map(|(i, &attend)| {
            Bar::default()
                .label(format!("W{}", i + 1))
                .value(u64::from(attend))
                .style(Style::default().fg(if attend == plan.classes_per_week { Color::Red } else { Color::Green }))
                .text_value(attend.to_string())
        })
        .collect();

    let title = if report.mismatch {
        format!(" Weekly Plan: min {}/week (window != {} remaining) ", plan.min_per_week, report.remaining)
    } else {
        format!(" Weekly Plan: min {}/week ", plan.min_per_week)
    };

    let chart = BarChart::default()
        .block(panel(&title))
        .bar_width(3)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars))
        .max(u64::from(plan.classes_per_week));
    f.render_widget(chart, area);
}
