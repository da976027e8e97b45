// src/tui/state.rs
use crate::viewer::{FilterField, InteractionController, SnapshotSource, ViewEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Language,
    Keyword,
}

impl Focus {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Table => Self::Language,
            Self::Language => Self::Keyword,
            Self::Keyword => Self::Table,
        }
    }

    #[must_use]
    pub fn previous(self) -> Self {
        match self {
            Self::Table => Self::Keyword,
            Self::Keyword => Self::Language,
            Self::Language => Self::Table,
        }
    }

    #[must_use]
    pub fn field(self) -> Option<FilterField> {
        match self {
            Self::Table => None,
            Self::Language => Some(FilterField::Language),
            Self::Keyword => Some(FilterField::Keyword),
        }
    }
}

pub struct BoardApp {
    pub controller: InteractionController,
    pub source: Box<dyn SnapshotSource>,
    pub focus: Focus,
    pub loading: bool,
    pub should_quit: bool,
    /// One-line feedback for the footer (opened link, reload result).
    pub status: Option<String>,
}

impl BoardApp {
    #[must_use]
    pub fn new(source: Box<dyn SnapshotSource>) -> Self {
        Self {
            controller: InteractionController::default(),
            source,
            focus: Focus::Table,
            loading: true,
            should_quit: false,
            status: None,
        }
    }

    /// Blocking (re)load. Failures stay visible through the controller state.
    pub fn reload(&mut self) {
        self.loading = true;
        let result = self.controller.load(self.source.as_ref());
        self.loading = false;
        self.status = match result {
            Ok(()) => Some(format!(
                "Loaded {} projects from {}",
                self.controller.dataset().projects().len(),
                self.source.describe()
            )),
            Err(e) => Some(e.to_string()),
        };
    }

    pub fn dispatch(&mut self, event: ViewEvent) {
        self.controller.dispatch(event);
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let current = self.controller.state().scroll;
        let position = current.saturating_add_signed(delta);
        self.dispatch(ViewEvent::ScrollChanged { position });
    }

    /// Current text of the focused filter input.
    #[must_use]
    pub fn filter_text(&self, field: FilterField) -> &str {
        let query = &self.controller.state().query;
        match field {
            FilterField::Language => &query.language,
            FilterField::Keyword => &query.keyword,
        }
    }

    pub fn edit_filter(&mut self, field: FilterField, edit: impl FnOnce(&mut String)) {
        let mut value = self.filter_text(field).to_string();
        edit(&mut value);
        self.dispatch(ViewEvent::FilterChanged { field, value });
    }

    pub fn open_selected(&mut self) {
        let state = self.controller.state();
        let Some(row) = state.table.rows().get(state.scroll) else {
            return;
        };
        let href = row.name.href.clone();
        self.status = Some(match super::opener::open_detached(&href) {
            Ok(()) => format!("Opened {href}"),
            Err(e) => e.to_string(),
        });
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
