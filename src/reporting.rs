// src/reporting.rs
//! Console output for the non-interactive commands.

use crate::collector::CollectReport;
use crate::viewer::format;
use crate::viewer::render::{HeaderCell, RenderedTable, TableBody};
use crate::viewer::SortKey;
use colored::Colorize;
use std::path::Path;

/// Prints the rendered table as aligned plain text.
pub fn print_table(table: &RenderedTable, last_updated: Option<String>) {
    if let Some(updated) = last_updated {
        println!("{} {}", "Last updated:".dimmed(), updated);
    }

    let header: Vec<String> = std::iter::once("#".to_string())
        .chain(table.header.iter().map(HeaderCell::title))
        .collect();
    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| {
            std::iter::once(row.rank.to_string())
                .chain(SortKey::ALL.iter().map(|k| row.cell(*k).to_string()))
                .collect()
        })
        .collect();

    let widths = column_widths(&header, &rows);
    println!("{}", join_padded(&header, &widths).bold());

    match &table.body {
        TableBody::Rows(_) => {
            for row in &rows {
                println!("{}", join_padded(row, &widths));
            }
            if table.total_matches > rows.len() {
                println!(
                    "{}",
                    format!(
                        "Showing {} of {} matches.",
                        rows.len(),
                        format::thousands(table.total_matches as u64)
                    )
                    .dimmed()
                );
            }
        }
        TableBody::Placeholder(message) => println!("{}", message.dimmed()),
        TableBody::Error(message) => println!("{}", message.red()),
    }
}

fn column_widths(header: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

pub fn print_collect_summary(report: &CollectReport, output: Option<&Path>) {
    let published = report.snapshot.projects.len();
    println!(
        "{} {} candidates, {} enriched, {} skipped",
        "Collected:".bold(),
        report.searched,
        published,
        report.skipped.len()
    );
    for s in &report.skipped {
        println!("  {} {}: {}", "skip".yellow(), s.name, s.reason.dimmed());
    }
    match output {
        Some(path) => println!(
            "{}",
            format!("[OK] Snapshot published to {}", path.display())
                .green()
                .bold()
        ),
        None => println!("{}", "Dry run: nothing written.".dimmed()),
    }
}
