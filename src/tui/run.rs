//! TUI entry point and terminal setup.

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::{app::App, error::AppError, storage::FileStorage, tui::app::TuiApp};

/// Take over the terminal, bootstrap the application and run until the user
/// quits. The terminal is restored even when bootstrap fails.
pub fn run_tui(storage: FileStorage) -> Result<(), AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = match App::bootstrap(storage) {
        Ok(app) => TuiApp::new(app).run(&mut terminal).map_err(AppError::from),
        Err(e) => Err(AppError::from(e)),
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
