// src/viewer/controller.rs
//! Interaction Controller: typed events in, a freshly rendered table out.
//!
//! Every event that changes filter or sort state re-runs
//! filter -> sort -> render to completion before returning.

use super::filter::{self, FilterQuery};
use super::loader::{Dataset, SnapshotSource};
use super::render::{self, RenderedTable};
use super::sort::{self, SortKey, SortState};
use crate::error::LoadError;

/// Scroll offset (rows) past which the back-to-top control appears.
pub const BACK_TO_TOP_THRESHOLD: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Language,
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    HeaderClicked { key: SortKey },
    FilterChanged { field: FilterField, value: String },
    ScrollChanged { position: usize },
    BackToTop,
}

/// Everything the front end draws from.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub sort: SortState,
    pub query: FilterQuery,
    pub scroll: usize,
    pub back_to_top_visible: bool,
    pub table: RenderedTable,
    /// Last load failure, shown even when older data is still on screen.
    pub load_error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        let sort = SortState::default();
        Self {
            sort,
            query: FilterQuery::default(),
            scroll: 0,
            back_to_top_visible: false,
            table: render::render(&[], sort),
            load_error: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    dataset: Dataset,
    state: ViewState,
}

impl InteractionController {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        let mut controller = Self {
            dataset,
            state: ViewState::default(),
        };
        controller.refresh();
        controller
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Loads from `source`. On failure the previous collection stays and the
    /// error is recorded for display.
    ///
    /// # Errors
    /// Returns the load error after recording it.
    pub fn load(&mut self, source: &dyn SnapshotSource) -> Result<(), LoadError> {
        let result = self.dataset.load(source);
        match &result {
            Ok(()) => self.state.load_error = None,
            Err(e) => {
                log::warn!("load from {} failed: {e}", source.describe());
                self.state.load_error = Some(e.to_string());
            }
        }
        self.refresh();
        result
    }

    pub fn dispatch(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::HeaderClicked { key } => {
                self.state.sort = self.state.sort.clicked(key);
                self.refresh();
            }
            ViewEvent::FilterChanged { field, value } => {
                match field {
                    FilterField::Language => self.state.query.language = value,
                    FilterField::Keyword => self.state.query.keyword = value,
                }
                self.refresh();
            }
            ViewEvent::ScrollChanged { position } => self.set_scroll(position),
            ViewEvent::BackToTop => self.set_scroll(0),
        }
    }

    /// Replaces the sort state outright, as a front end's initial setting.
    pub fn set_sort(&mut self, sort: SortState) {
        self.state.sort = sort;
        self.refresh();
    }

    /// Runs filter -> sort -> render over the loaded collection.
    pub fn refresh(&mut self) {
        let order = self.state.sort;
        self.state.table = match (&self.state.load_error, self.dataset.is_loaded()) {
            (Some(message), false) => render::render_error(message, order),
            _ => {
                let filtered = filter::filter(self.dataset.projects(), &self.state.query);
                let ordered = sort::sort(filtered, order);
                render::render(&ordered, order)
            }
        };
        self.set_scroll(self.state.scroll);
    }

    fn set_scroll(&mut self, position: usize) {
        let last = self.state.table.row_count().saturating_sub(1);
        self.state.scroll = position.min(last);
        self.state.back_to_top_visible = self.state.scroll > BACK_TO_TOP_THRESHOLD;
    }
}
