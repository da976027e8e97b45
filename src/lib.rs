// src/lib.rs
//! Demand-index collection and browsing for open-source projects.
//!
//! The collector turns hosting-API search results into a [`types::Snapshot`];
//! the viewer loads that snapshot and runs filter, sort and render over it.

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod events;
pub mod exit;
pub mod keywords;
pub mod metrics;
pub mod reporting;
#[cfg(feature = "tui")]
pub mod tui;
pub mod types;
pub mod viewer;
