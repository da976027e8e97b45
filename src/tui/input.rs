// src/tui/input.rs
//! Key presses become typed [`ViewEvent`]s or app actions.

use super::state::{BoardApp, Focus};
use crate::viewer::{SortKey, ViewEvent};
use crossterm::event::{KeyCode, KeyModifiers};

const PAGE: isize = 10;

pub fn handle_input(code: KeyCode, modifiers: KeyModifiers, app: &mut BoardApp) {
    if handle_global(code, modifiers, app) {
        return;
    }

    match app.focus.field() {
        Some(field) => match code {
            KeyCode::Char(c) => app.edit_filter(field, |v| v.push(c)),
            KeyCode::Backspace => app.edit_filter(field, |v| {
                v.pop();
            }),
            KeyCode::Esc | KeyCode::Enter => app.focus = Focus::Table,
            _ => {}
        },
        None => handle_table_input(code, app),
    }
}

fn handle_global(code: KeyCode, modifiers: KeyModifiers, app: &mut BoardApp) -> bool {
    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.quit();
            true
        }
        (_, KeyCode::Tab) => {
            app.focus = app.focus.next();
            true
        }
        (_, KeyCode::BackTab) => {
            app.focus = app.focus.previous();
            true
        }
        _ => false,
    }
}

fn handle_table_input(code: KeyCode, app: &mut BoardApp) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('/') => app.focus = Focus::Language,
        KeyCode::Char('r') => app.reload(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
        KeyCode::PageDown => app.scroll_by(PAGE),
        KeyCode::PageUp => app.scroll_by(-PAGE),
        KeyCode::End | KeyCode::Char('G') => app.dispatch(ViewEvent::ScrollChanged {
            position: usize::MAX,
        }),
        KeyCode::Home | KeyCode::Char('g' | 't') => app.dispatch(ViewEvent::BackToTop),
        KeyCode::Char(c) => {
            if let Some(key) = column_for_digit(c) {
                app.dispatch(ViewEvent::HeaderClicked { key });
            }
        }
        _ => {}
    }
}

/// `'1'..='9'` select the sortable columns in display order.
#[must_use]
pub fn column_for_digit(c: char) -> Option<SortKey> {
    let index = c.to_digit(10)?.checked_sub(1)?;
    SortKey::ALL.get(index as usize).copied()
}
