// src/tui/mod.rs
pub mod input;
pub mod opener;
pub mod runner;
pub mod state;
pub mod ui;

use crate::viewer::loader;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use state::BoardApp;
use std::io;
use std::time::Duration;

/// Runs the interactive viewer over the snapshot at `source`.
///
/// # Errors
/// Returns error if terminal setup fails or IO error occurs. A failed
/// snapshot load is shown in the table, not returned.
pub fn run(source: &str) -> Result<()> {
    // stderr shares the screen; keep log lines out of the alternate buffer.
    let log_level = log::max_level();
    log::set_max_level(log::LevelFilter::Off);

    let result = runner::with_terminal(|| {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        run_app(&mut terminal, source)
    });

    log::set_max_level(log_level);
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, source: &str) -> Result<()> {
    let mut app = BoardApp::new(loader::source_for(source));

    // The initial fetch is the only wait; draw the indicator first.
    terminal.draw(|f| ui::draw(f, &app))?;
    app.reload();

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    input::handle_input(key.code, key.modifiers, &mut app);
                }
            }
        }
    }

    Ok(())
}
