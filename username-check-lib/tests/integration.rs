// username-check-lib/tests/integration.rs

//! Integration tests exercising the public API end to end: input
//! loading, the concurrent checking run, sink output, and summary
//! invariants, using a simulated classifier instead of the network.

use std::collections::HashMap;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use username_check_lib::{
    load_usernames, Category, CheckConfig, Lookup, RunSummary, UsernameChecker,
};

/// Simulated classifier keyed by username; unknown names classify as Error.
struct SimulatedLookup {
    responses: HashMap<String, Category>,
}

impl SimulatedLookup {
    fn new(entries: &[(&str, Category)]) -> Self {
        Self {
            responses: entries
                .iter()
                .map(|(name, cat)| (name.to_string(), *cat))
                .collect(),
        }
    }
}

impl Lookup for SimulatedLookup {
    async fn classify(&self, username: &str) -> Category {
        // Yield so completions interleave under concurrency.
        tokio::task::yield_now().await;
        self.responses
            .get(username)
            .copied()
            .unwrap_or(Category::Error)
    }
}

fn output_config(dir: &TempDir) -> CheckConfig {
    CheckConfig::default()
        .with_output(Category::Available, dir.path().join("available.txt"))
        .with_output(Category::Blacklisted, dir.path().join("blacklisted.txt"))
        .with_output(Category::Taken, dir.path().join("taken.txt"))
}

fn read(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name)).unwrap()
}

#[tokio::test]
async fn test_file_to_summary_pipeline() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "alice\n bob \n\ncarol\ndave").unwrap();

    let usernames = load_usernames(input.path()).await.unwrap();
    assert_eq!(usernames, vec!["alice", "bob", "carol", "dave"]);

    let dir = TempDir::new().unwrap();
    let checker = UsernameChecker::with_lookup(
        output_config(&dir),
        SimulatedLookup::new(&[
            ("alice", Category::Available),
            ("bob", Category::Blacklisted),
            ("carol", Category::Taken),
            // dave unknown: simulated server error
        ]),
    );

    let summary = checker.run(&usernames).await.unwrap();

    assert_eq!(
        summary,
        RunSummary {
            total: 4,
            available: 1,
            blacklisted: 1,
            taken: 1,
            errors: 1,
            dropped_writes: 0,
        }
    );

    assert_eq!(read(&dir, "available.txt"), "alice\n");
    assert_eq!(read(&dir, "blacklisted.txt"), "bob\n");
    assert_eq!(read(&dir, "taken.txt"), "carol\n");
}

#[tokio::test]
async fn test_concurrent_run_with_duplicates_keeps_line_count() {
    let dir = TempDir::new().unwrap();

    // 30 items, 10 distinct names each appearing three times.
    let mut usernames = Vec::new();
    let mut entries = Vec::new();
    for i in 0..10 {
        let name = format!("user{}", i);
        let category = match i % 3 {
            0 => Category::Available,
            1 => Category::Blacklisted,
            _ => Category::Taken,
        };
        entries.push((name.clone(), category));
        for _ in 0..3 {
            usernames.push(name.clone());
        }
    }
    let lookup = SimulatedLookup {
        responses: entries.into_iter().collect(),
    };

    let checker =
        UsernameChecker::with_lookup(output_config(&dir).with_concurrency(8), lookup);
    let summary = checker.run(&usernames).await.unwrap();

    assert_eq!(summary.total, 30);
    assert_eq!(
        summary.total,
        summary.available + summary.blacklisted + summary.taken + summary.errors
    );

    // Every input line yields exactly one output line, duplicates included,
    // and every line is a single well-formed username.
    let mut total_lines = 0;
    for name in ["available.txt", "blacklisted.txt", "taken.txt"] {
        for line in read(&dir, name).lines() {
            assert!(line.starts_with("user"), "corrupted line: {:?}", line);
            total_lines += 1;
        }
    }
    assert_eq!(total_lines, 30);
}

#[tokio::test]
async fn test_errors_leave_no_trace_in_output_files() {
    let dir = TempDir::new().unwrap();
    let checker = UsernameChecker::with_lookup(
        output_config(&dir),
        SimulatedLookup::new(&[]), // everything classifies as Error
    );

    let usernames = vec!["ghost1".to_string(), "ghost2".to_string()];
    let summary = checker.run(&usernames).await.unwrap();

    assert_eq!(summary.errors, 2);
    assert_eq!(read(&dir, "available.txt"), "");
    assert_eq!(read(&dir, "blacklisted.txt"), "");
    assert_eq!(read(&dir, "taken.txt"), "");
}

#[tokio::test]
async fn test_back_to_back_runs_are_idempotent() {
    let dir = TempDir::new().unwrap();
    let config = output_config(&dir);

    let first = UsernameChecker::with_lookup(
        config.clone(),
        SimulatedLookup::new(&[("old", Category::Available)]),
    );
    first.run(&["old".to_string()]).await.unwrap();

    let second = UsernameChecker::with_lookup(
        config,
        SimulatedLookup::new(&[("new", Category::Available)]),
    );
    second.run(&["new".to_string()]).await.unwrap();

    // Second run's files contain only the second run's results.
    assert_eq!(read(&dir, "available.txt"), "new\n");
}
