// src/cli/args.rs
use crate::viewer::SortKey;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "demandboard",
    version,
    about = "Rank open-source projects by demand index"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Config file (default: ./demandboard.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Query the hosting API and publish a new snapshot
    Collect {
        /// Where to publish the snapshot
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
        /// API token (defaults to $GH_TOKEN)
        #[arg(long)]
        token: Option<String>,
        /// Only repositories created within this many days
        #[arg(long, value_name = "DAYS")]
        created_within: Option<u32>,
        /// Minimum star count for search candidates
        #[arg(long)]
        min_stars: Option<u64>,
        /// Maximum search pages to walk
        #[arg(long)]
        max_pages: Option<u32>,
        /// Build the snapshot but do not write it
        #[arg(long)]
        dry_run: bool,
    },
    /// Browse a snapshot interactively
    View {
        /// Snapshot path or http(s) URL
        #[arg(long, short)]
        source: Option<String>,
    },
    /// Print the ranked table
    Top {
        /// Snapshot path or http(s) URL
        #[arg(long, short)]
        source: Option<String>,
        /// Case-insensitive language substring
        #[arg(long, default_value = "")]
        language: String,
        /// Case-insensitive keyword substring
        #[arg(long, default_value = "")]
        keyword: String,
        /// Column to sort by
        #[arg(long, default_value = "demand_index")]
        sort: SortKey,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
        /// Emit the rendered table as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Overrides for a collect run (used by handlers)
#[derive(Debug, Clone, Default)]
pub struct CollectArgs {
    pub output: Option<PathBuf>,
    pub token: Option<String>,
    pub created_within: Option<u32>,
    pub min_stars: Option<u64>,
    pub max_pages: Option<u32>,
    pub dry_run: bool,
}

/// Options for the top command (used by handlers)
#[derive(Debug, Clone)]
pub struct TopArgs {
    pub source: Option<String>,
    pub language: String,
    pub keyword: String,
    pub sort: SortKey,
    pub asc: bool,
    pub json: bool,
}
