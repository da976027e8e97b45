// src/cli/dispatch.rs
//! Command dispatch logic extracted from the binary.

use super::args::{CollectArgs, Commands, TopArgs};
use super::handlers::{handle_collect, handle_top, handle_view};
use crate::config::Config;
use crate::exit::BoardExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands, config: &mut Config) -> Result<BoardExit> {
    match command {
        Commands::Collect {
            output,
            token,
            created_within,
            min_stars,
            max_pages,
            dry_run,
        } => handle_collect(
            config,
            &CollectArgs {
                output,
                token,
                created_within,
                min_stars,
                max_pages,
                dry_run,
            },
        ),
        Commands::View { source } => handle_view(config, source),
        Commands::Top {
            source,
            language,
            keyword,
            sort,
            asc,
            json,
        } => handle_top(
            config,
            &TopArgs {
                source,
                language,
                keyword,
                sort,
                asc,
                json,
            },
        ),
    }
}
