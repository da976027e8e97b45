// tests/unit_render.rs
mod common;

use common::{record, with_demand, with_keywords, with_language};
use demandboard_core::types::ProjectRecord;
use demandboard_core::viewer::render::{render, TableBody, DISPLAY_LIMIT, EMPTY_MESSAGE};
use demandboard_core::viewer::{SortDirection, SortKey, SortState};

#[test]
fn test_truncates_to_display_limit() {
    let records: Vec<ProjectRecord> = (0..250).map(|i| record(&format!("p{i}"), 100 + i)).collect();
    let refs: Vec<&ProjectRecord> = records.iter().collect();

    let table = render(&refs, SortState::default());

    assert_eq!(table.rows().len(), DISPLAY_LIMIT);
    assert_eq!(table.row_count(), DISPLAY_LIMIT);
    assert_eq!(table.total_matches, 250);
    assert_eq!(table.rows()[0].rank, 1);
    assert_eq!(table.rows()[99].rank, 100);
    assert_eq!(table.rows()[99].name.label, "p99");
}

#[test]
fn test_short_input_renders_every_row() {
    let records = vec![record("a", 100), record("b", 200)];
    let refs: Vec<&ProjectRecord> = records.iter().collect();
    let table = render(&refs, SortState::default());
    assert_eq!(table.row_count(), 2);
}

#[test]
fn test_empty_renders_single_placeholder() {
    let table = render(&[], SortState::default());
    assert_eq!(table.row_count(), 1);
    assert!(table.rows().is_empty());
    assert_eq!(table.body, TableBody::Placeholder(EMPTY_MESSAGE.to_string()));
}

#[test]
fn test_cells_are_formatted() {
    let mut r = with_keywords(
        with_language(with_demand(record("owner/repo", 1_234_567), 0.5), "Rust"),
        &["CLI", "Tool"],
    );
    r.new_stars_30d = 12_345;
    r.new_open_issues = 7;
    r.contributors = 1_000;
    let table = render(&[&r], SortState::default());
    let row = &table.rows()[0];

    assert_eq!(row.name.label, "owner/repo");
    assert_eq!(row.name.href, "https://github.com/owner/repo");
    assert_eq!(row.stars, "1,234,567");
    assert_eq!(row.new_stars_30d, "12,345");
    assert_eq!(row.new_open_issues, "7");
    assert_eq!(row.contributors, "1,000");
    assert_eq!(row.demand_index, "0.5000");
    assert_eq!(row.language, "Rust");
    assert_eq!(row.keywords, "CLI, Tool");
    assert!(row.date_fetched.contains("2024"));
}

#[test]
fn test_header_marks_active_column() {
    let state = SortState::new(SortKey::Stars, SortDirection::Asc);
    let table = render(&[], state);

    assert_eq!(table.header.len(), SortKey::ALL.len());
    for cell in &table.header {
        if cell.key == SortKey::Stars {
            assert_eq!(cell.active, Some(SortDirection::Asc));
            assert!(cell.title().starts_with("Stars "));
        } else {
            assert_eq!(cell.active, None);
            assert_eq!(cell.title(), cell.label);
        }
    }
}
