//! Main username checker implementation.
//!
//! This module provides the primary `UsernameChecker` struct that drives
//! the whole run: it schedules usernames onto a bounded worker pool,
//! invokes the classifier and the result sink for each item, and
//! aggregates per-category counts into the final [`RunSummary`].
//!
//! The pool is a `buffer_unordered` stream over per-item futures, so at
//! most `concurrency` lookups are in flight at any instant. The pool
//! itself is the backpressure mechanism; there is no additional rate
//! limiting.

use crate::error::UsernameCheckError;
use crate::lookup::{Lookup, ProfileClient};
use crate::sink::ResultSink;
use crate::types::{Category, CheckConfig, CheckOutcome, RunSummary};
use futures::stream::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Per-category counters incremented atomically across workers.
///
/// No lock is needed: each completion performs independent relaxed
/// increments, and a consistent snapshot is taken only after the pool
/// has drained.
#[derive(Debug, Default)]
pub struct RunStats {
    available: AtomicUsize,
    blacklisted: AtomicUsize,
    taken: AtomicUsize,
    errors: AtomicUsize,
    dropped_writes: AtomicUsize,
    completed: AtomicUsize,
}

impl RunStats {
    /// Count one completed classification.
    pub fn record(&self, category: Category) {
        match category {
            Category::Available => self.available.fetch_add(1, Ordering::Relaxed),
            Category::Blacklisted => self.blacklisted.fetch_add(1, Ordering::Relaxed),
            Category::Taken => self.taken.fetch_add(1, Ordering::Relaxed),
            Category::Error => self.errors.fetch_add(1, Ordering::Relaxed),
        };
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one result line that could not be written to its sink.
    pub fn record_dropped_write(&self) {
        self.dropped_writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Monotonically increasing count of finished items.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Snapshot the counters into a read-only summary.
    pub fn snapshot(&self) -> RunSummary {
        let available = self.available.load(Ordering::Relaxed);
        let blacklisted = self.blacklisted.load(Ordering::Relaxed);
        let taken = self.taken.load(Ordering::Relaxed);
        let errors = self.errors.load(Ordering::Relaxed);
        RunSummary {
            total: available + blacklisted + taken + errors,
            available,
            blacklisted,
            taken,
            errors,
            dropped_writes: self.dropped_writes.load(Ordering::Relaxed),
        }
    }
}

/// Main checker that coordinates classification, persistence, and counting.
///
/// Generic over the [`Lookup`] seam so tests can drive the pool with
/// simulated responses; production code uses the default
/// [`ProfileClient`].
///
/// # Example
///
/// ```rust,no_run
/// use username_check_lib::{CheckConfig, UsernameChecker};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = UsernameChecker::with_config(CheckConfig::default())?;
///     let usernames = vec!["alice".to_string(), "bob".to_string()];
///     let summary = checker.run(&usernames).await?;
///     println!("available: {}", summary.available);
///     Ok(())
/// }
/// ```
pub struct UsernameChecker<L = ProfileClient> {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// Classification backend
    lookup: L,
}

impl UsernameChecker<ProfileClient> {
    /// Create a checker with default configuration.
    pub fn new() -> Result<Self, UsernameCheckError> {
        Self::with_config(CheckConfig::default())
    }

    /// Create a checker with custom configuration.
    pub fn with_config(config: CheckConfig) -> Result<Self, UsernameCheckError> {
        let lookup = ProfileClient::from_config(&config)?;
        Ok(Self { config, lookup })
    }
}

impl<L: Lookup + Sync> UsernameChecker<L> {
    /// Create a checker with an explicit classification backend.
    pub fn with_lookup(config: CheckConfig, lookup: L) -> Self {
        Self { config, lookup }
    }

    /// The configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Check every username and return the final summary.
    ///
    /// Equivalent to [`run_with_progress`](Self::run_with_progress)
    /// with a no-op progress callback.
    pub async fn run(&self, usernames: &[String]) -> Result<RunSummary, UsernameCheckError> {
        self.run_with_progress(usernames, |_, _, _| {}).await
    }

    /// Check every username, invoking `on_progress` as each completes.
    ///
    /// The callback receives `(completed, total, outcome)`; `completed`
    /// increases monotonically from 1 to `total`. Completion order is
    /// unrelated to input order, and the output files reflect
    /// completion order.
    ///
    /// Behavior:
    /// - Empty input returns a zero summary without touching the
    ///   output files or the network.
    /// - Output files are truncated once, before any lookup starts.
    /// - Per item, classify-then-record-then-count runs sequentially;
    ///   items run concurrently up to the configured budget.
    /// - A failed sink write is logged and counted as a dropped write;
    ///   the item keeps its category and the run continues.
    /// - Returns only after every username has been processed.
    ///
    /// # Errors
    ///
    /// Fails only on setup: creating an output file. Per-item faults
    /// never abort the run.
    pub async fn run_with_progress<F>(
        &self,
        usernames: &[String],
        mut on_progress: F,
    ) -> Result<RunSummary, UsernameCheckError>
    where
        F: FnMut(usize, usize, &CheckOutcome),
    {
        if usernames.is_empty() {
            return Ok(RunSummary::default());
        }

        // Truncation of all output files happens here, before any
        // concurrent work: the clean-run boundary.
        let sink = ResultSink::create(&self.config).await?;
        let stats = RunStats::default();
        let total = usernames.len();

        let work = usernames.iter().map(|username| {
            let sink = &sink;
            let stats = &stats;
            let lookup = &self.lookup;
            async move {
                let start = Instant::now();
                let category = lookup.classify(username).await;

                if let Err(e) = sink.record(username, category).await {
                    tracing::warn!(
                        username = %username,
                        category = %category,
                        error = %e,
                        "result line dropped"
                    );
                    stats.record_dropped_write();
                }
                stats.record(category);

                CheckOutcome {
                    username: username.clone(),
                    category,
                    check_duration: Some(start.elapsed()),
                }
            }
        });

        // The worker pool: no more than `concurrency` lookups in flight.
        let mut stream =
            futures::stream::iter(work).buffer_unordered(self.config.concurrency.max(1));

        let mut completed = 0usize;
        while let Some(outcome) = stream.next().await {
            completed += 1;
            on_progress(completed, total, &outcome);
        }
        drop(stream);

        Ok(stats.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// Simulated classifier: maps usernames to fixed categories,
    /// anything unknown classifies as Error.
    struct ScriptedLookup {
        responses: HashMap<String, Category>,
    }

    impl ScriptedLookup {
        fn new(entries: &[(&str, Category)]) -> Self {
            Self {
                responses: entries
                    .iter()
                    .map(|(name, cat)| (name.to_string(), *cat))
                    .collect(),
            }
        }
    }

    impl Lookup for ScriptedLookup {
        async fn classify(&self, username: &str) -> Category {
            self.responses
                .get(username)
                .copied()
                .unwrap_or(Category::Error)
        }
    }

    fn test_config(dir: &TempDir) -> CheckConfig {
        CheckConfig::default()
            .with_output(Category::Available, dir.path().join("available.txt"))
            .with_output(Category::Blacklisted, dir.path().join("blacklisted.txt"))
            .with_output(Category::Taken, dir.path().join("taken.txt"))
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_input_returns_zero_summary_without_touching_files() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir);
        let checker = UsernameChecker::with_lookup(config, ScriptedLookup::new(&[]));

        let summary = checker.run(&[]).await.unwrap();
        assert_eq!(summary, RunSummary::default());
        assert!(!dir.path().join("available.txt").exists());
    }

    #[tokio::test]
    async fn test_scenario_one_of_each_category() {
        let dir = TempDir::new().unwrap();
        let checker = UsernameChecker::with_lookup(
            test_config(&dir),
            ScriptedLookup::new(&[
                ("alice", Category::Available),
                ("bob", Category::Blacklisted),
                ("carol", Category::Taken),
                // dave gets no entry: simulated 500 -> Error
            ]),
        );

        let summary = checker
            .run(&names(&["alice", "bob", "carol", "dave"]))
            .await
            .unwrap();

        assert_eq!(summary.total, 4);
        assert_eq!(summary.available, 1);
        assert_eq!(summary.blacklisted, 1);
        assert_eq!(summary.taken, 1);
        assert_eq!(summary.errors, 1);

        let read = |f: &str| std::fs::read_to_string(dir.path().join(f)).unwrap();
        assert_eq!(read("available.txt"), "alice\n");
        assert_eq!(read("blacklisted.txt"), "bob\n");
        assert_eq!(read("taken.txt"), "carol\n");
    }

    #[tokio::test]
    async fn test_total_equals_sum_of_categories() {
        let dir = TempDir::new().unwrap();
        let entries: Vec<(String, Category)> = (0..40)
            .map(|i| {
                let cat = match i % 4 {
                    0 => Category::Available,
                    1 => Category::Blacklisted,
                    2 => Category::Taken,
                    _ => Category::Error,
                };
                (format!("user{}", i), cat)
            })
            .collect();
        let usernames: Vec<String> = entries.iter().map(|(n, _)| n.clone()).collect();
        let lookup = ScriptedLookup {
            responses: entries.into_iter().collect(),
        };
        let checker =
            UsernameChecker::with_lookup(test_config(&dir).with_concurrency(8), lookup);

        let summary = checker.run(&usernames).await.unwrap();

        assert_eq!(summary.total, 40);
        assert_eq!(
            summary.total,
            summary.available + summary.blacklisted + summary.taken + summary.errors
        );
        assert_eq!(summary.dropped_writes, 0);
    }

    #[tokio::test]
    async fn test_duplicates_are_processed_independently() {
        let dir = TempDir::new().unwrap();
        let checker = UsernameChecker::with_lookup(
            test_config(&dir).with_concurrency(4),
            ScriptedLookup::new(&[("dup", Category::Available)]),
        );

        let summary = checker
            .run(&names(&["dup", "dup", "dup"]))
            .await
            .unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.available, 3);
        let contents = std::fs::read_to_string(dir.path().join("available.txt")).unwrap();
        assert_eq!(contents, "dup\ndup\ndup\n");
    }

    #[tokio::test]
    async fn test_second_run_truncates_first_runs_output() {
        let dir = TempDir::new().unwrap();
        let checker = UsernameChecker::with_lookup(
            test_config(&dir),
            ScriptedLookup::new(&[
                ("first", Category::Available),
                ("second", Category::Available),
            ]),
        );

        checker.run(&names(&["first"])).await.unwrap();
        checker.run(&names(&["second"])).await.unwrap();

        let contents = std::fs::read_to_string(dir.path().join("available.txt")).unwrap();
        assert_eq!(contents, "second\n");
    }

    #[tokio::test]
    async fn test_progress_callback_is_monotonic_and_complete() {
        let dir = TempDir::new().unwrap();
        let entries: Vec<(String, Category)> = (0..25)
            .map(|i| (format!("user{}", i), Category::Taken))
            .collect();
        let usernames: Vec<String> = entries.iter().map(|(n, _)| n.clone()).collect();
        let lookup = ScriptedLookup {
            responses: entries.into_iter().collect(),
        };
        let checker =
            UsernameChecker::with_lookup(test_config(&dir).with_concurrency(10), lookup);

        let mut seen = Vec::new();
        let summary = checker
            .run_with_progress(&usernames, |completed, total, outcome| {
                assert_eq!(total, 25);
                assert_eq!(outcome.category, Category::Taken);
                seen.push(completed);
            })
            .await
            .unwrap();

        assert_eq!(seen, (1..=25).collect::<Vec<_>>());
        assert_eq!(summary.taken, 25);
    }

    #[tokio::test]
    async fn test_run_stats_snapshot() {
        let stats = RunStats::default();
        stats.record(Category::Available);
        stats.record(Category::Available);
        stats.record(Category::Error);
        stats.record_dropped_write();

        let summary = stats.snapshot();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.available, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.dropped_writes, 1);
        assert_eq!(stats.completed(), 3);
    }
}
