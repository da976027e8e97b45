// src/viewer/render.rs
//! Table Renderer: projects the ordered collection into display rows.

use super::format;
use super::sort::{SortDirection, SortKey, SortState};
use crate::types::ProjectRecord;
use serde::Serialize;

/// Rows beyond this are not shown; there is no pagination.
pub const DISPLAY_LIMIT: usize = 100;

pub const EMPTY_MESSAGE: &str = "No projects match the current filters.";

/// A project name that links to its repository. Front ends open `href` in a
/// separate, detached context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    /// 1-based position on the displayed page.
    pub rank: usize,
    pub name: Link,
    pub stars: String,
    pub new_stars_30d: String,
    pub new_open_issues: String,
    pub contributors: String,
    pub demand_index: String,
    pub language: String,
    pub keywords: String,
    pub date_fetched: String,
}

impl DisplayRow {
    /// Cell text for a sortable column.
    #[must_use]
    pub fn cell(&self, key: SortKey) -> &str {
        match key {
            SortKey::Name => &self.name.label,
            SortKey::Stars => &self.stars,
            SortKey::NewStars30d => &self.new_stars_30d,
            SortKey::NewOpenIssues => &self.new_open_issues,
            SortKey::Contributors => &self.contributors,
            SortKey::DemandIndex => &self.demand_index,
            SortKey::Language => &self.language,
            SortKey::Keywords => &self.keywords,
            SortKey::DateFetched => &self.date_fetched,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub key: SortKey,
    pub label: &'static str,
    /// Set on the column currently sorted by.
    pub active: Option<SortDirection>,
}

impl HeaderCell {
    #[must_use]
    pub fn title(&self) -> String {
        match self.active {
            Some(direction) => format!("{} {}", self.label, direction.arrow()),
            None => self.label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TableBody {
    Rows(Vec<DisplayRow>),
    /// Single informational row shown when nothing matches.
    Placeholder(String),
    /// Single row shown in place of data when loading failed.
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub header: Vec<HeaderCell>,
    pub body: TableBody,
    /// Matches before truncation to [`DISPLAY_LIMIT`].
    pub total_matches: usize,
}

impl RenderedTable {
    /// Number of body rows, counting a placeholder or error as one.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Placeholder(_) | TableBody::Error(_) => 1,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[DisplayRow] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Placeholder(_) | TableBody::Error(_) => &[],
        }
    }
}

#[must_use]
pub fn render(ordered: &[&ProjectRecord], sort: SortState) -> RenderedTable {
    let body = if ordered.is_empty() {
        TableBody::Placeholder(EMPTY_MESSAGE.to_string())
    } else {
        TableBody::Rows(
            ordered
                .iter()
                .take(DISPLAY_LIMIT)
                .enumerate()
                .map(|(i, record)| display_row(i + 1, record))
                .collect(),
        )
    };

    RenderedTable {
        header: header(sort),
        body,
        total_matches: ordered.len(),
    }
}

#[must_use]
pub fn render_error(message: &str, sort: SortState) -> RenderedTable {
    RenderedTable {
        header: header(sort),
        body: TableBody::Error(message.to_string()),
        total_matches: 0,
    }
}

/// Header state with the active column and direction marked.
#[must_use]
pub fn header(sort: SortState) -> Vec<HeaderCell> {
    SortKey::ALL
        .into_iter()
        .map(|key| HeaderCell {
            key,
            label: key.label(),
            active: (key == sort.key).then_some(sort.direction),
        })
        .collect()
}

fn display_row(rank: usize, record: &ProjectRecord) -> DisplayRow {
    DisplayRow {
        rank,
        name: Link {
            label: record.name.clone(),
            href: record.url.clone(),
        },
        stars: format::thousands(record.stars),
        new_stars_30d: format::thousands(record.new_stars_30d),
        new_open_issues: format::thousands(record.new_open_issues),
        contributors: format::thousands(record.contributors),
        demand_index: format::demand(record.demand_index),
        language: record.language_label().to_string(),
        keywords: record.keywords_label(),
        date_fetched: format::date(record.date_fetched),
    }
}
