//! # Username Check Library
//!
//! A fast, concurrent library for checking username availability against a
//! remote profile-lookup API.
//!
//! Each username is classified into one of four categories based on a single
//! HTTP lookup: **available** (404), **blacklisted** (403), **taken** (200
//! with a profile payload), or **error** (anything else, including transport
//! faults). Results are appended to category-specific output files and
//! aggregated into a final summary.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use username_check_lib::{CheckConfig, UsernameChecker, load_usernames};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CheckConfig::default().with_concurrency(20);
//!     let usernames = load_usernames(&config.usernames_file).await?;
//!
//!     let checker = UsernameChecker::with_config(config)?;
//!     let summary = checker.run(&usernames).await?;
//!
//!     println!("available: {}, taken: {}", summary.available, summary.taken);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Bounded concurrency**: a fixed worker budget caps in-flight lookups
//! - **Concurrency-safe sinks**: one locked append target per category
//! - **Failure containment**: per-item faults never abort the run
//! - **Configurable**: TOML files, environment variables, builder API

// Re-export main public API types and functions
// This makes them available as username_check_lib::TypeName
pub use checker::{RunStats, UsernameChecker};
pub use config::{
    load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
    OutputConfig,
};
pub use error::UsernameCheckError;
pub use input::load_usernames;
pub use lookup::{Lookup, ProfileClient};
pub use sink::ResultSink;
pub use types::{Category, CheckConfig, CheckOutcome, RunSummary, DEFAULT_API_URL_TEMPLATE};

// Internal modules
mod checker;
mod config;
mod error;
mod input;
mod lookup;
mod sink;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, UsernameCheckError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
