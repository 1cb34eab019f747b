//! Username Check CLI Application
//!
//! A command-line interface for checking username availability against a
//! remote profile-lookup API. This CLI application provides a user-friendly
//! interface to the username-check-lib library.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use username_check_lib::{
    load_env_config, load_usernames, parse_timeout_string, Category, CheckConfig, ConfigManager,
    FileConfig, UsernameChecker,
};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for username-check
#[derive(Parser, Debug)]
#[command(name = "username-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check username availability with bounded concurrency")]
#[command(
    long_about = "Check a list of usernames against a profile-lookup API, classifying each as available, blacklisted, taken, or error, and saving results to per-category output files."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Input file with usernames (one per line)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "Input"
    )]
    pub file: Option<String>,

    /// Max concurrent lookups (default: 20, max: 100)
    #[arg(
        short = 'c',
        long = "concurrency",
        value_name = "N",
        help_heading = "Performance"
    )]
    pub concurrency: Option<usize>,

    /// Per-lookup timeout, e.g. "10s", "2m" (default: 10s)
    #[arg(long = "timeout", value_name = "DURATION", help_heading = "Performance")]
    pub timeout: Option<String>,

    /// Lookup endpoint template; {} is replaced by the username
    #[arg(long = "api-url", value_name = "TEMPLATE", help_heading = "Network")]
    pub api_url: Option<String>,

    /// Output file for available usernames
    #[arg(long = "output-available", value_name = "FILE", help_heading = "Output")]
    pub output_available: Option<String>,

    /// Output file for blacklisted usernames
    #[arg(
        long = "output-blacklisted",
        value_name = "FILE",
        help_heading = "Output"
    )]
    pub output_blacklisted: Option<String>,

    /// Output file for taken usernames
    #[arg(long = "output-taken", value_name = "FILE", help_heading = "Output")]
    pub output_taken: Option<String>,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Print each result as it completes
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,

    /// Show per-result timing and debug diagnostics
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Suppress the live progress counter
    #[arg(short = 'q', long = "quiet", help_heading = "Configuration")]
    pub quiet: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_tracing(&args);

    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run_username_check(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Set up the tracing subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise the level follows -v/-d.
fn init_tracing(args: &Args) {
    let default_level = if args.debug {
        "username_check=debug,username_check_lib=debug"
    } else if args.verbose {
        "username_check=info,username_check_lib=info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if let Some(concurrency) = args.concurrency {
        if concurrency == 0 || concurrency > 100 {
            return Err("Concurrency must be between 1 and 100".to_string());
        }
    }

    if let Some(timeout) = &args.timeout {
        if parse_timeout_string(timeout).is_none() {
            return Err(format!(
                "Invalid timeout '{}'. Use format like '5s', '30s', '2m'",
                timeout
            ));
        }
    }

    if let Some(template) = &args.api_url {
        if !template.contains("{}") {
            return Err(format!(
                "API URL template '{}' must contain a '{{}}' placeholder",
                template
            ));
        }
    }

    if args.quiet && args.verbose {
        return Err("Cannot specify both --quiet and --verbose".to_string());
    }

    Ok(())
}

/// Main username checking logic
async fn run_username_check(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&args)?;

    // Input failure is the one run-level abort: nothing has been
    // truncated or contacted yet.
    let usernames = load_usernames(&config.usernames_file).await?;

    if usernames.is_empty() {
        println!(
            "No usernames to check in {}.",
            config.usernames_file.display()
        );
        return Ok(());
    }

    println!(
        "Loaded {} usernames from {}.",
        usernames.len(),
        config.usernames_file.display()
    );

    if args.verbose {
        ui::print_header(usernames.len(), &config);
    }

    let checker = UsernameChecker::with_config(config.clone())?;
    let progress = ui::ProgressCounter::new(args.quiet || args.verbose);

    let start_time = std::time::Instant::now();

    let summary = checker
        .run_with_progress(&usernames, |completed, total, outcome| {
            if args.verbose {
                ui::print_result(outcome, args.debug, (completed, total));
            } else {
                progress.update(completed, total);
            }
        })
        .await?;

    progress.finish();

    let duration = start_time.elapsed();

    ui::print_summary(&summary, duration, &config);

    Ok(())
}

/// Build CheckConfig from CLI arguments with config file integration.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (UC_*)
/// 3. Local config file (./.username-check.toml)
/// 4. Home config file (~/.username-check.toml)
/// 5. XDG config file (~/.config/username-check/config.toml)
/// 6. Built-in defaults
fn build_config(args: &Args) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    let mut config = CheckConfig::default();

    let config_manager = ConfigManager::new(args.verbose);
    let env_config = load_env_config(args.verbose);

    // Step 1: Load config files (explicit path beats discovery)
    if let Some(explicit_config_path) = args.config.as_ref().or(env_config.config.as_ref()) {
        let file_config = config_manager.load_file(explicit_config_path).map_err(|e| {
            format!(
                "Failed to load config file '{}': {}",
                explicit_config_path, e
            )
        })?;
        config = merge_file_config_into_check_config(config, file_config);
    } else {
        match config_manager.discover_and_load() {
            Ok(file_config) => {
                config = merge_file_config_into_check_config(config, file_config);
            }
            Err(e) if args.verbose => {
                eprintln!("Config discovery warning: {}", e);
            }
            Err(_) => {
                // Silently continue with defaults if no config files found
            }
        }
    }

    // Step 2: Apply environment variables (UC_*)
    if let Some(file) = &env_config.file {
        config = config.with_usernames_file(file);
    }
    if let Some(concurrency) = env_config.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(timeout_str) = &env_config.timeout {
        if let Some(secs) = parse_timeout_string(timeout_str) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
    }
    if let Some(template) = &env_config.api_url {
        config = config.with_api_url_template(template.clone());
    }

    // Step 3: Apply CLI arguments (highest precedence)
    config = apply_cli_args_to_config(config, args);

    Ok(config)
}

/// Merge FileConfig into CheckConfig
fn merge_file_config_into_check_config(
    mut config: CheckConfig,
    file_config: FileConfig,
) -> CheckConfig {
    if let Some(defaults) = file_config.defaults {
        if let Some(file) = defaults.file {
            config = config.with_usernames_file(file);
        }
        if let Some(concurrency) = defaults.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(timeout_str) = defaults.timeout {
            if let Some(secs) = parse_timeout_string(&timeout_str) {
                config = config.with_timeout(Duration::from_secs(secs));
            }
        }
        if let Some(template) = defaults.api_url_template {
            config = config.with_api_url_template(template);
        }
    }

    if let Some(output) = file_config.output {
        if let Some(path) = output.available {
            config = config.with_output(Category::Available, path);
        }
        if let Some(path) = output.blacklisted {
            config = config.with_output(Category::Blacklisted, path);
        }
        if let Some(path) = output.taken {
            config = config.with_output(Category::Taken, path);
        }
    }

    config
}

/// Apply CLI arguments to config (highest precedence).
fn apply_cli_args_to_config(mut config: CheckConfig, args: &Args) -> CheckConfig {
    if let Some(file) = &args.file {
        config = config.with_usernames_file(file);
    }
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(timeout_str) = &args.timeout {
        if let Some(secs) = parse_timeout_string(timeout_str) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
    }
    if let Some(template) = &args.api_url {
        config = config.with_api_url_template(template.clone());
    }
    if let Some(path) = &args.output_available {
        config = config.with_output(Category::Available, path);
    }
    if let Some(path) = &args.output_blacklisted {
        config = config.with_output(Category::Blacklisted, path);
    }
    if let Some(path) = &args.output_taken {
        config = config.with_output(Category::Taken, path);
    }
    config
}
