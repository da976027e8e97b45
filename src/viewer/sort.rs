// src/viewer/sort.rs
use crate::types::ProjectRecord;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Stars,
    #[serde(rename = "new_stars_30d")]
    NewStars30d,
    NewOpenIssues,
    Contributors,
    DemandIndex,
    Language,
    Keywords,
    DateFetched,
}

impl SortKey {
    /// Sortable columns in display order.
    pub const ALL: [SortKey; 9] = [
        Self::Name,
        Self::Stars,
        Self::NewStars30d,
        Self::NewOpenIssues,
        Self::Contributors,
        Self::DemandIndex,
        Self::Language,
        Self::Keywords,
        Self::DateFetched,
    ];

    /// Snapshot field name, also accepted on the command line.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Stars => "stars",
            Self::NewStars30d => "new_stars_30d",
            Self::NewOpenIssues => "new_open_issues",
            Self::Contributors => "contributors",
            Self::DemandIndex => "demand_index",
            Self::Language => "language",
            Self::Keywords => "keywords",
            Self::DateFetched => "date_fetched",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Stars => "Stars",
            Self::NewStars30d => "New Stars (30d)",
            Self::NewOpenIssues => "New Issues",
            Self::Contributors => "Contributors",
            Self::DemandIndex => "Demand Index",
            Self::Language => "Language",
            Self::Keywords => "Keywords",
            Self::DateFetched => "Fetched",
        }
    }

    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(self, Self::Name | Self::Language | Self::Keywords)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.field_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|k| k.field_name()).collect();
                format!("unknown sort key '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::DemandIndex,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    #[must_use]
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Header click: same column flips, a new column starts descending.
    #[must_use]
    pub fn clicked(self, key: SortKey) -> Self {
        if key == self.key {
            Self::new(key, self.direction.flipped())
        } else {
            Self::new(key, SortDirection::Desc)
        }
    }
}

/// Stable sort of an already filtered collection.
#[must_use]
pub fn sort(mut records: Vec<&ProjectRecord>, state: SortState) -> Vec<&ProjectRecord> {
    records.sort_by(|a, b| {
        let ord = compare(a, b, state.key);
        match state.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    records
}

/// Text fields compare case-insensitively, the rest by their natural order.
#[must_use]
pub fn compare(a: &ProjectRecord, b: &ProjectRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => cmp_text(&a.name, &b.name),
        SortKey::Stars => a.stars.cmp(&b.stars),
        SortKey::NewStars30d => a.new_stars_30d.cmp(&b.new_stars_30d),
        SortKey::NewOpenIssues => a.new_open_issues.cmp(&b.new_open_issues),
        SortKey::Contributors => a.contributors.cmp(&b.contributors),
        SortKey::DemandIndex => a.demand_index.total_cmp(&b.demand_index),
        SortKey::Language => cmp_text(a.language_label(), b.language_label()),
        SortKey::Keywords => cmp_text(&a.keywords_label(), &b.keywords_label()),
        SortKey::DateFetched => a.date_fetched.cmp(&b.date_fetched),
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
