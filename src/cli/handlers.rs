// src/cli/handlers.rs
use crate::cli::args::{CollectArgs, TopArgs};
use crate::collector::github::{GitHubClient, RequestPolicy};
use crate::collector::{self, CollectOptions};
use crate::config::Config;
use crate::error::CollectError;
use crate::events::EventLogger;
use crate::exit::BoardExit;
use crate::reporting;
use crate::viewer::{
    format, loader, Dataset, FilterField, InteractionController, SortDirection, SortState,
    ViewEvent,
};
use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::path::PathBuf;

fn get_repo_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Applies command-line overrides on top of the loaded config.
pub fn apply_collect_overrides(config: &mut Config, args: &CollectArgs) {
    let c = &mut config.collector;
    if let Some(output) = &args.output {
        c.output = output.display().to_string();
    }
    if let Some(days) = args.created_within {
        c.created_within_days = days;
    }
    if let Some(min_stars) = args.min_stars {
        c.min_stars = min_stars;
    }
    if let Some(max_pages) = args.max_pages {
        c.max_pages = max_pages;
    }
    if args.token.is_some() {
        config.token.clone_from(&args.token);
    }
}

/// Handles the collect command.
///
/// # Errors
/// Returns error if the HTTP client cannot be built.
pub fn handle_collect(config: &mut Config, args: &CollectArgs) -> Result<BoardExit> {
    apply_collect_overrides(config, args);
    if let Err(e) = config.validate() {
        eprintln!("{} {e}", "Invalid configuration:".red());
        return Ok(BoardExit::InvalidInput);
    }
    if config.token.is_none() {
        log::warn!("no API token configured; unauthenticated rate limits apply");
    }

    let settings = &config.collector;
    let mut client = GitHubClient::new(
        &settings.api_base,
        config.token.clone(),
        RequestPolicy::from(settings),
    )
    .context("Failed to build hosting API client")?;

    let journal = if settings.journal {
        EventLogger::new(&get_repo_root())
    } else {
        EventLogger::disabled()
    };
    let options = CollectOptions::from(settings);
    let output = PathBuf::from(&settings.output);
    let now = Utc::now();

    let result = if args.dry_run {
        collector::collect(&mut client, &options, now, &journal)
    } else {
        collector::run(&mut client, &options, &output, now, &journal)
    };
    log::debug!("{} API requests issued", client.request_count());

    match result {
        Ok(report) => {
            let published = (!args.dry_run).then_some(output.as_path());
            reporting::print_collect_summary(&report, published);
            Ok(BoardExit::Success)
        }
        Err(e) => {
            eprintln!("{} {e}", "Collection aborted:".red().bold());
            if matches!(e, CollectError::Search { .. }) {
                eprintln!("{}", "The previous snapshot was left unchanged.".dimmed());
            }
            Ok(BoardExit::CollectAborted)
        }
    }
}

/// Handles the view command.
///
/// # Errors
/// Returns error if the terminal UI fails.
#[cfg(feature = "tui")]
pub fn handle_view(config: &Config, source: Option<String>) -> Result<BoardExit> {
    let source = source.unwrap_or_else(|| config.viewer.source.clone());
    crate::tui::run(&source)?;
    Ok(BoardExit::Success)
}

/// Handles the view command.
///
/// # Errors
/// Always; this build has no terminal UI.
#[cfg(not(feature = "tui"))]
pub fn handle_view(_config: &Config, _source: Option<String>) -> Result<BoardExit> {
    anyhow::bail!("built without the `tui` feature; use `demandboard top` instead")
}

/// Handles the top command.
///
/// # Errors
/// Returns error if JSON output cannot be serialized.
pub fn handle_top(config: &Config, args: &TopArgs) -> Result<BoardExit> {
    let location = args
        .source
        .clone()
        .unwrap_or_else(|| config.viewer.source.clone());
    let source = loader::source_for(&location);

    let mut controller = InteractionController::new(Dataset::new());
    let loaded = controller.load(source.as_ref());

    let direction = if args.asc {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    };
    controller.set_sort(SortState::new(args.sort, direction));
    controller.dispatch(ViewEvent::FilterChanged {
        field: FilterField::Language,
        value: args.language.clone(),
    });
    controller.dispatch(ViewEvent::FilterChanged {
        field: FilterField::Keyword,
        value: args.keyword.clone(),
    });

    let table = &controller.state().table;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(table).context("Failed to serialize table")?
        );
    } else {
        let updated = controller.dataset().last_updated().map(format::date_time);
        reporting::print_table(table, updated);
    }

    Ok(if loaded.is_ok() {
        BoardExit::Success
    } else {
        BoardExit::LoadFailed
    })
}
