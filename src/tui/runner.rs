// src/tui/runner.rs
use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use std::io;

/// Runs `body` on the alternate screen in raw mode. The terminal is restored
/// whether or not `body` succeeds.
///
/// # Errors
/// Returns the error from `body`, or from setup or restore.
pub fn with_terminal<T>(body: impl FnOnce() -> Result<T>) -> Result<T> {
    within(setup_terminal, body, restore_terminal)
}

fn within<T>(
    setup: impl FnOnce() -> Result<()>,
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    setup()?;
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

/// Enters raw mode on the alternate screen.
///
/// # Errors
/// Returns error if the terminal refuses either mode.
pub fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    Ok(())
}

/// Leaves raw mode and the alternate screen.
///
/// # Errors
/// Returns error if the terminal cannot be restored.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
