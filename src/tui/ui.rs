// src/tui/ui.rs
use super::state::{BoardApp, Focus};
use crate::viewer::format;
use crate::viewer::render::{DisplayRow, RenderedTable, TableBody};
use crate::viewer::FilterField;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

const BACK_TO_TOP_LABEL: &str = " ↑ Top [t] ";

pub fn draw(f: &mut Frame, app: &BoardApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title / last updated
            Constraint::Length(3), // Filters
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_title(f, app, chunks[0]);
    draw_filters(f, app, chunks[1]);

    if app.loading {
        draw_loading(f, chunks[2]);
    } else {
        draw_table(f, app, chunks[2]);
        if app.controller.state().back_to_top_visible {
            draw_back_to_top(f, chunks[2]);
        }
    }

    draw_footer(f, app, chunks[3]);
}

fn draw_title(f: &mut Frame, app: &BoardApp, area: Rect) {
    let updated = app
        .controller
        .dataset()
        .last_updated()
        .map_or_else(|| "-".to_string(), format::date_time);
    let state = app.controller.state();

    let line = Line::from(vec![
        Span::styled(
            " DEMAND BOARD ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::raw(format!("Last updated: {updated}")),
        Span::raw(" | "),
        Span::raw(format!(
            "Showing {} of {} matches",
            state.table.rows().len(),
            state.table.total_matches
        )),
    ]);

    f.render_widget(
        Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_filters(f: &mut Frame, app: &BoardApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_input(f, app, FilterField::Language, "Language", chunks[0]);
    draw_input(f, app, FilterField::Keyword, "Keyword", chunks[1]);
}

fn draw_input(f: &mut Frame, app: &BoardApp, field: FilterField, title: &str, area: Rect) {
    let focused = app.focus.field() == Some(field);
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut text = app.filter_text(field).to_string();
    if focused {
        text.push('▏');
    }

    f.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        ),
        area,
    );
}

fn draw_loading(f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new("Loading projects...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Projects")),
        area,
    );
}

fn draw_table(f: &mut Frame, app: &BoardApp, area: Rect) {
    let state = app.controller.state();
    let table = &state.table;

    let header = Row::new(header_cells(table)).height(1);
    let rows = body_rows(table, state.load_error.as_deref());

    let mut block = Block::default().borders(Borders::ALL).title("Projects");
    if app.focus == Focus::Table {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }

    let widget = Table::new(rows, column_widths())
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut table_state = TableState::default();
    if matches!(table.body, TableBody::Rows(_)) {
        table_state.select(Some(state.scroll));
    }
    f.render_stateful_widget(widget, area, &mut table_state);
}

fn header_cells(table: &RenderedTable) -> Vec<Cell<'static>> {
    let mut cells = vec![Cell::from("#")];
    cells.extend(table.header.iter().map(|h| {
        let style = if h.active.is_some() {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Cell::from(h.title()).style(style)
    }));
    cells
}

fn body_rows<'a>(table: &'a RenderedTable, load_error: Option<&str>) -> Vec<Row<'a>> {
    match &table.body {
        TableBody::Rows(rows) => rows.iter().map(display_row).collect(),
        TableBody::Placeholder(message) => {
            let mut notice = message.clone();
            if let Some(e) = load_error {
                notice = format!("{notice} ({e})");
            }
            vec![message_row(notice, Color::DarkGray)]
        }
        TableBody::Error(message) => vec![message_row(message.clone(), Color::Red)],
    }
}

fn display_row(row: &DisplayRow) -> Row<'_> {
    Row::new(vec![
        Cell::from(row.rank.to_string()),
        Cell::from(row.name.label.as_str()).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        ),
        Cell::from(row.stars.as_str()),
        Cell::from(row.new_stars_30d.as_str()),
        Cell::from(row.new_open_issues.as_str()),
        Cell::from(row.contributors.as_str()),
        Cell::from(row.demand_index.as_str()),
        Cell::from(row.language.as_str()),
        Cell::from(row.keywords.as_str()),
        Cell::from(row.date_fetched.as_str()),
    ])
}

fn message_row(message: String, color: Color) -> Row<'static> {
    Row::new(vec![Cell::from(""), Cell::from(message)]).style(Style::default().fg(color))
}

fn column_widths() -> [Constraint; 10] {
    [
        Constraint::Length(4),
        Constraint::Min(24),
        Constraint::Length(9),
        Constraint::Length(17),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Min(16),
        Constraint::Length(11),
    ]
}

fn draw_back_to_top(f: &mut Frame, area: Rect) {
    let width = u16::try_from(BACK_TO_TOP_LABEL.chars().count()).unwrap_or(12);
    if area.width <= width + 2 || area.height < 3 {
        return;
    }
    let spot = Rect {
        x: area.x + area.width - width - 2,
        y: area.y + area.height - 2,
        width,
        height: 1,
    };
    f.render_widget(Clear, spot);
    f.render_widget(
        Paragraph::new(BACK_TO_TOP_LABEL).style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        spot,
    );
}

fn draw_footer(f: &mut Frame, app: &BoardApp, area: Rect) {
    let keys = match app.focus {
        Focus::Table => {
            "q: Quit | TAB: Filters | 1-9: Sort column | j/k: Scroll | t: Top | Enter: Open | r: Reload"
        }
        Focus::Language | Focus::Keyword => "Type to filter | Backspace: Delete | Esc: Back to table",
    };
    let text = match (&app.controller.state().load_error, &app.status) {
        (Some(e), _) => format!("{keys} | {e}"),
        (None, Some(status)) => format!("{keys} | {status}"),
        (None, None) => keys.to_string(),
    };
    let style = if app.controller.state().load_error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}
