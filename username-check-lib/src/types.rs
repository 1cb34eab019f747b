//! Core data types for username availability checking.
//!
//! This module defines all the main data structures used throughout the library,
//! including classification outcomes, run summaries, and configuration options.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default lookup endpoint template. `{}` is replaced by the username.
pub const DEFAULT_API_URL_TEMPLATE: &str = "https://api.phantom.app/user/v1/profiles/{}";

/// Classification outcome for a single username.
///
/// Exactly one category is assigned per username per run. All lookup
/// ambiguity (unexpected status codes, transport faults, malformed
/// bodies) collapses into `Error` rather than propagating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Lookup returned 404: nobody owns the name
    #[serde(rename = "available")]
    Available,

    /// Lookup returned 403: the name is reserved/blocked by the service
    #[serde(rename = "blacklisted")]
    Blacklisted,

    /// Lookup returned 200 with a profile payload: the name is in use
    #[serde(rename = "taken")]
    Taken,

    /// Any other status, a malformed body, or a transport failure
    #[serde(rename = "error")]
    Error,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Available => write!(f, "available"),
            Category::Blacklisted => write!(f, "blacklisted"),
            Category::Taken => write!(f, "taken"),
            Category::Error => write!(f, "error"),
        }
    }
}

/// Result of checking a single username.
///
/// Produced once per input item; consumed by the sink (written) and the
/// run statistics (counted). Not mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// The username that was checked
    pub username: String,

    /// The category assigned to the username
    pub category: Category,

    /// How long the lookup took to complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_duration: Option<Duration>,
}

/// Final counts for a completed run.
///
/// Mutated incrementally (via [`crate::RunStats`]) as results arrive,
/// finalized only after all work completes, read-only thereafter.
///
/// Invariant: `total == available + blacklisted + taken + errors`
/// and equals the number of input usernames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of usernames processed
    pub total: usize,

    /// Usernames that nobody owns
    pub available: usize,

    /// Usernames reserved/blocked by the service
    pub blacklisted: usize,

    /// Usernames already in use
    pub taken: usize,

    /// Usernames whose lookup could not be classified
    pub errors: usize,

    /// Result lines that could not be written to their sink.
    /// These usernames are still counted in their category; the line
    /// itself was dropped and logged.
    pub dropped_writes: usize,
}

impl RunSummary {
    /// Count for a specific category.
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Available => self.available,
            Category::Blacklisted => self.blacklisted,
            Category::Taken => self.taken,
            Category::Error => self.errors,
        }
    }
}

/// Configuration options for username checking operations.
///
/// This struct allows fine-tuning of the checking behavior, including
/// concurrency, timeout, endpoint, and output destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Input file with usernames, one per line
    pub usernames_file: PathBuf,

    /// Maximum number of concurrent lookups
    /// Default: 20, Range: 1-100
    pub concurrency: usize,

    /// Timeout for each individual lookup
    /// Default: 10 seconds
    #[serde(skip)] // Don't serialize Duration directly
    pub timeout: Duration,

    /// Output file for available usernames (truncated at run start)
    pub output_available: PathBuf,

    /// Output file for blacklisted usernames (truncated at run start)
    pub output_blacklisted: PathBuf,

    /// Output file for taken usernames (truncated at run start)
    pub output_taken: PathBuf,

    /// Lookup endpoint template; `{}` is replaced by the username
    pub api_url_template: String,
}

impl Default for CheckConfig {
    /// Create a sensible default configuration.
    ///
    /// The defaults are conservative about load on the remote service.
    fn default() -> Self {
        Self {
            usernames_file: PathBuf::from("usernames.txt"),
            concurrency: 20,
            timeout: Duration::from_secs(10),
            output_available: PathBuf::from("available_usernames.txt"),
            output_blacklisted: PathBuf::from("blacklisted_usernames.txt"),
            output_taken: PathBuf::from("taken_usernames.txt"),
            api_url_template: DEFAULT_API_URL_TEMPLATE.to_string(),
        }
    }
}

impl CheckConfig {
    /// Set the input file path.
    pub fn with_usernames_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.usernames_file = path.into();
        self
    }

    /// Set the concurrency budget.
    ///
    /// Automatically caps concurrency at 100 to prevent resource exhaustion
    /// and floors it at 1 so the pool always makes progress.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }

    /// Set the per-lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the lookup endpoint template. `{}` is replaced by the username.
    pub fn with_api_url_template<S: Into<String>>(mut self, template: S) -> Self {
        self.api_url_template = template.into();
        self
    }

    /// Set the output file for a non-Error category.
    ///
    /// Setting a path for [`Category::Error`] is a no-op: error results
    /// are recorded only in the aggregate count.
    pub fn with_output<P: Into<PathBuf>>(mut self, category: Category, path: P) -> Self {
        match category {
            Category::Available => self.output_available = path.into(),
            Category::Blacklisted => self.output_blacklisted = path.into(),
            Category::Taken => self.output_taken = path.into(),
            Category::Error => {}
        }
        self
    }

    /// Output path for a category, if it has one.
    pub fn output_path(&self, category: Category) -> Option<&std::path::Path> {
        match category {
            Category::Available => Some(&self.output_available),
            Category::Blacklisted => Some(&self.output_blacklisted),
            Category::Taken => Some(&self.output_taken),
            Category::Error => None,
        }
    }
}
