//! Plain-text tables printed by the `rank` and `summary` subcommands.

use cinedata_aggregate::{YearTotals, long_tail, summarize, top_by_audience};
use cinedata_bulletin_models::GroupedRecord;
use cinedata_extract::ScanReport;

const TITLE_WIDTH: usize = 48;

fn truncate(title: &str) -> String {
    if title.chars().count() <= TITLE_WIDTH {
        return title.to_owned();
    }
    let mut short: String = title.chars().take(TITLE_WIDTH - 1).collect();
    short.push('…');
    short
}

fn print_groups(heading: &str, groups: &[GroupedRecord]) {
    println!("{heading}");
    println!(
        "{:<TITLE_WIDTH$}  {:>4}  {:>12}  {:>16}",
        "Title", "Year", "Audience", "Revenue"
    );
    for g in groups {
        println!(
            "{:<TITLE_WIDTH$}  {:>4}  {:>12}  {:>16}",
            truncate(&g.title),
            g.first_year,
            g.total_audience,
            g.total_revenue.to_string()
        );
    }
    println!();
}

/// Prints the top audiences and the long tail.
pub fn print_rankings(groups: &[GroupedRecord], limit: usize) {
    print_groups(
        &format!("Top {limit} audiences"),
        &top_by_audience(groups, limit),
    );
    print_groups(
        &format!("Long tail: {limit} smallest box offices"),
        &long_tail(groups, limit),
    );
}

/// Prints extraction diagnostics and per-year totals.
pub fn print_summary(report: &ScanReport, groups: &[GroupedRecord], totals: &[YearTotals]) {
    let summary = summarize(&report.records, groups);
    let stats = &report.stats;

    println!("Documents scanned:  {}", stats.documents_scanned);
    println!("Documents failed:   {}", report.failures.len());
    println!("Pages:              {}", stats.pages);
    println!("Data lines:         {}", stats.data_lines());
    println!("Rows extracted:     {}", summary.raw_rows);
    for (reason, count) in &stats.skipped {
        println!("  skipped {reason}: {count}");
    }
    println!("Unique films:       {}", summary.unique_films);
    if let (Some(first), Some(last)) = (summary.first_year, summary.last_year) {
        println!("Years:              {first}-{last}");
    }
    println!("Total audience:     {}", summary.total_audience);
    println!("Total revenue:      {}", summary.total_revenue);
    println!();

    println!("{:>4}  {:>6}  {:>12}  {:>16}", "Year", "Films", "Audience", "Revenue");
    for t in totals {
        println!(
            "{:>4}  {:>6}  {:>12}  {:>16}",
            t.year,
            t.films,
            t.audience,
            t.revenue.to_string()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_titles_are_truncated() {
        let long = "A".repeat(TITLE_WIDTH + 10);
        let short = truncate(&long);
        assert_eq!(short.chars().count(), TITLE_WIDTH);
        assert!(short.ends_with('…'));
        assert_eq!(truncate("Curto"), "Curto");
    }
}
