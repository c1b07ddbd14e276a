pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use attendance_core::repository::AttendanceRepository;
use attendance_core::service::attendance_service::AttendanceService;
use attendance_core::usecase::planner::PlannerUseCase;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::warn;

use crate::tui::app::App;

pub fn run<R: AttendanceRepository>(service: &AttendanceService<R>, planner: &PlannerUseCase<'_, R>) -> Result<()> {
    let mut app = App::new(service, planner)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend, R: AttendanceRepository>(terminal: &mut Terminal<B>, app: &mut App<'_, R>) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let outcome = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('p') => app.mark_present(),
            KeyCode::Char('a') => app.mark_absent(),
            KeyCode::Char('r') => app.reset(),
            KeyCode::Char('+') | KeyCode::Right | KeyCode::Char('l') => app.more_classes(),
            KeyCode::Char('-') | KeyCode::Left | KeyCode::Char('h') => app.fewer_classes(),
            KeyCode::Char('m') | KeyCode::Tab => app.toggle_scenario(),
            _ => Ok(()),
        };
        if let Err(err) = outcome {
            warn!(error = %err, "dashboard action failed");
            app.status = format!("Error: {}", err);
        }
    }
}
