//! Output formatting utilities.

use colored::Colorize;

use crate::analysis::EvolutionSeries;
use crate::error::Result;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain column-aligned table.
    #[default]
    Table,
    /// JSON document.
    Json,
}

/// Print an evolution series, keeping only the last `tail` points when set.
pub fn print_series(
    series: &EvolutionSeries,
    format: OutputFormat,
    tail: Option<usize>,
) -> Result<()> {
    let skip = tail
        .map(|tail| series.points.len().saturating_sub(tail))
        .unwrap_or(0);
    let points = &series.points[skip..];

    match format {
        OutputFormat::Table => {
            if points.is_empty() {
                println!("{}", "no matching records".dimmed());
                return Ok(());
            }
            println!(
                "{:<12} {:>9} {:>12} {:>9} {:>12} {:>10}",
                "DATE", "CASES", "CUM CASES", "DEATHS", "CUM DEATHS", "7-DAY AVG"
            );
            for point in points {
                println!(
                    "{:<12} {:>9} {:>12} {:>9} {:>12} {:>10.1}",
                    point.date,
                    point.new_cases,
                    point.cumulative_cases,
                    point.new_deaths,
                    point.cumulative_deaths,
                    point.average_cases,
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(points)?),
    }
    Ok(())
}

/// Print the closing summary of an analysis run.
pub fn print_summary(series: &EvolutionSeries) {
    let (cases, deaths) = series.totals();
    println!();
    println!("Total confirmed cases: {cases}");
    println!("Total deaths: {deaths}");
    match series.growth_rate() {
        Some(rate) => {
            let formatted = format!("{:+.1}%", rate * 100.0);
            let colored = if rate > 0.0 {
                formatted.red()
            } else {
                formatted.green()
            };
            println!("Week-over-week growth: {colored}");
        }
        None => println!("Week-over-week growth: {}", "not enough data".dimmed()),
    }
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}
