//! Display logic for the username-check CLI.
//!
//! This module handles the live progress counter, per-result lines,
//! and the final summary. Uses only the `console` crate.

use console::{pad_str, style, Alignment, Term};
use std::time::Duration;
use username_check_lib::{Category, CheckConfig, CheckOutcome, RunSummary};

// ── Progress counter ─────────────────────────────────────────────────────────

/// A completed-vs-total counter that rewrites one stderr line in place.
///
/// Writes to stderr so stdout stays clean; does nothing when stderr is
/// not a terminal (piped/captured output).
pub struct ProgressCounter {
    term: Term,
    enabled: bool,
}

impl ProgressCounter {
    /// Create a counter. Disabled when stderr is not a TTY or `quiet` is set.
    pub fn new(quiet: bool) -> Self {
        let term = Term::stderr();
        let enabled = !quiet && term.is_term();
        Self { term, enabled }
    }

    /// Redraw the progress line.
    pub fn update(&self, completed: usize, total: usize) {
        if !self.enabled {
            return;
        }
        let _ = self.term.clear_line();
        let _ = self.term.write_str(&format!(
            "{} {}/{} usernames checked",
            style("Checking...").cyan(),
            completed,
            total,
        ));
    }

    /// Clear the progress line once the run is done.
    pub fn finish(&self) {
        if self.enabled {
            let _ = self.term.clear_line();
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a verbose run.
pub fn print_header(username_count: usize, config: &CheckConfig) {
    println!(
        "{} {} {}",
        style("username-check").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "— Checking {} username{}",
            username_count,
            if username_count == 1 { "" } else { "s" }
        ))
        .dim(),
    );
    println!(
        "{}",
        style(format!(
            "Concurrency: {} | Timeout: {}s",
            config.concurrency,
            config.timeout.as_secs()
        ))
        .dim()
    );
    println!();
}

// ── Single result line ───────────────────────────────────────────────────────

/// Styled label for a category.
fn category_label(category: Category) -> console::StyledObject<&'static str> {
    match category {
        Category::Available => style("AVAILABLE").green().bold(),
        Category::Blacklisted => style("BLACKLISTED").yellow().bold(),
        Category::Taken => style("TAKEN").red().bold(),
        Category::Error => style("ERROR").magenta(),
    }
}

/// Format and print a single result with a `[cur/total]` progress prefix.
pub fn print_result(outcome: &CheckOutcome, debug: bool, counter: (usize, usize)) {
    let username_width = 30;
    let padded = pad_str(&outcome.username, username_width, Alignment::Left, Some(".."));
    let (cur, total) = counter;

    println!(
        "  {} {}  {}",
        style(format!("[{}/{}]", cur, total)).dim(),
        style(&padded).white(),
        category_label(outcome.category),
    );

    if debug {
        if let Some(duration) = outcome.check_duration {
            println!(
                "    {} Checked in {}ms",
                style("└─").dim(),
                duration.as_millis(),
            );
        }
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the final summary: total, per-category counts, and output paths.
pub fn print_summary(summary: &RunSummary, duration: Duration, config: &CheckConfig) {
    println!();
    println!("{}", style("=== Summary ===").bold());
    println!(
        "{} username{} checked in {:.1}s",
        style(summary.total).bold(),
        if summary.total == 1 { "" } else { "s" },
        duration.as_secs_f64(),
    );
    println!(
        "  {}",
        style(format!("{} available", summary.available)).green()
    );
    println!(
        "  {}",
        style(format!("{} blacklisted", summary.blacklisted)).yellow()
    );
    println!("  {}", style(format!("{} taken", summary.taken)).red());
    println!("  {}", style(format!("{} errors", summary.errors)).magenta());

    if summary.dropped_writes > 0 {
        println!(
            "  {}",
            style(format!(
                "{} result line{} could not be written (still counted above)",
                summary.dropped_writes,
                if summary.dropped_writes == 1 { "" } else { "s" }
            ))
            .yellow()
        );
    }

    println!();
    println!("Results saved to:");
    for category in [Category::Available, Category::Blacklisted, Category::Taken] {
        if let Some(path) = config.output_path(category) {
            println!(" - {}", path.display());
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
