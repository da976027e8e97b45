// src/viewer/mod.rs
//! In-memory browsing of a loaded snapshot.
//!
//! Only [`loader`] performs I/O. Everything else is a pure pass over the
//! already-loaded collection, re-run in full on every interaction.

pub mod controller;
pub mod filter;
pub mod format;
pub mod loader;
pub mod render;
pub mod sort;

pub use controller::{FilterField, InteractionController, ViewEvent, ViewState};
pub use filter::FilterQuery;
pub use loader::{Dataset, SnapshotSource};
pub use render::{RenderedTable, TableBody};
pub use sort::{SortDirection, SortKey, SortState};
