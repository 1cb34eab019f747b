//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and from
//! `UC_*` environment variables. Precedence is applied by the CLI:
//! CLI arguments > environment variables > local config file > home
//! config file > built-in defaults.

use crate::error::UsernameCheckError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration loaded from TOML files.
///
/// This represents the structure of configuration files that users can
/// create to set default values:
///
/// ```toml
/// [defaults]
/// file = "usernames.txt"
/// concurrency = 20
/// timeout = "10s"
/// api_url_template = "https://api.phantom.app/user/v1/profiles/{}"
///
/// [output]
/// available = "available_usernames.txt"
/// blacklisted = "blacklisted_usernames.txt"
/// taken = "taken_usernames.txt"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Output file destinations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default usernames file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Default concurrency level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Default timeout (as string, e.g., "10s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Default lookup endpoint template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url_template: Option<String>,
}

/// Output file configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Destination for available usernames
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<String>,

    /// Destination for blacklisted usernames
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blacklisted: Option<String>,

    /// Destination for taken usernames
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taken: Option<String>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, UsernameCheckError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(UsernameCheckError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            UsernameCheckError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig =
            toml::from_str(&content).map_err(|e| UsernameCheckError::ConfigError {
                message: format!("Failed to parse TOML configuration: {}", e),
            })?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Looks in the XDG config directory, then the home directory, then
    /// the current directory; later files override earlier ones.
    pub fn discover_and_load(&self) -> Result<FileConfig, UsernameCheckError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        if let Some(xdg_path) = self.get_xdg_config_path() {
            if let Ok(config) = self.load_file(&xdg_path) {
                merged_config = merge_configs(merged_config, config);
                loaded_files.push(xdg_path);
            }
        }

        if let Some(global_path) = self.get_global_config_path() {
            if let Ok(config) = self.load_file(&global_path) {
                merged_config = merge_configs(merged_config, config);
                loaded_files.push(global_path);
            }
        }

        if let Some(local_path) = self.get_local_config_path() {
            if let Ok(config) = self.load_file(&local_path) {
                merged_config = merge_configs(merged_config, config);
                loaded_files.push(local_path);
            }
        }

        if self.verbose && loaded_files.len() > 1 {
            eprintln!("Multiple config files found. Using precedence:");
            for (i, path) in loaded_files.iter().enumerate() {
                let status = if i == loaded_files.len() - 1 {
                    "active"
                } else {
                    "overridden"
                };
                eprintln!("   {} ({})", path.display(), status);
            }
        }

        Ok(merged_config)
    }

    /// Configuration file in the current directory, if present.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./username-check.toml", "./.username-check.toml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Configuration file in the user's home directory, if present.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        if let Some(home) = env::var_os("HOME") {
            let candidates = [".username-check.toml", "username-check.toml"];

            for candidate in &candidates {
                let path = Path::new(&home).join(candidate);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        None
    }

    /// Configuration file per the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("username-check").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), UsernameCheckError> {
        if let Some(defaults) = &config.defaults {
            if let Some(concurrency) = defaults.concurrency {
                if concurrency == 0 || concurrency > 100 {
                    return Err(UsernameCheckError::config(
                        "Concurrency must be between 1 and 100",
                    ));
                }
            }

            if let Some(timeout_str) = &defaults.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(UsernameCheckError::config(format!(
                        "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                        timeout_str
                    )));
                }
            }

            if let Some(template) = &defaults.api_url_template {
                if !template.contains("{}") {
                    return Err(UsernameCheckError::config(format!(
                        "api_url_template '{}' must contain a '{{}}' placeholder",
                        template
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Merge two configurations; values from `higher` win.
fn merge_configs(lower: FileConfig, higher: FileConfig) -> FileConfig {
    FileConfig {
        defaults: match (lower.defaults, higher.defaults) {
            (Some(mut lower_defaults), Some(higher_defaults)) => {
                if higher_defaults.file.is_some() {
                    lower_defaults.file = higher_defaults.file;
                }
                if higher_defaults.concurrency.is_some() {
                    lower_defaults.concurrency = higher_defaults.concurrency;
                }
                if higher_defaults.timeout.is_some() {
                    lower_defaults.timeout = higher_defaults.timeout;
                }
                if higher_defaults.api_url_template.is_some() {
                    lower_defaults.api_url_template = higher_defaults.api_url_template;
                }
                Some(lower_defaults)
            }
            (None, Some(higher_defaults)) => Some(higher_defaults),
            (Some(lower_defaults), None) => Some(lower_defaults),
            (None, None) => None,
        },
        output: match (lower.output, higher.output) {
            (Some(mut lower_output), Some(higher_output)) => {
                if higher_output.available.is_some() {
                    lower_output.available = higher_output.available;
                }
                if higher_output.blacklisted.is_some() {
                    lower_output.blacklisted = higher_output.blacklisted;
                }
                if higher_output.taken.is_some() {
                    lower_output.taken = higher_output.taken;
                }
                Some(lower_output)
            }
            (None, Some(higher_output)) => Some(higher_output),
            (Some(lower_output), None) => Some(lower_output),
            (None, None) => None,
        },
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// These values can be set via `UC_*` environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub file: Option<String>,
    pub concurrency: Option<usize>,
    pub timeout: Option<String>,
    pub api_url: Option<String>,
    pub config: Option<String>,
}

/// Load configuration from environment variables.
///
/// Parses all `UC_*` environment variables. Invalid values are warned
/// about (when verbose) and ignored.
pub fn load_env_config(verbose: bool) -> EnvConfig {
    let mut env_config = EnvConfig::default();

    // UC_FILE - usernames input file
    if let Ok(file) = env::var("UC_FILE") {
        if !file.trim().is_empty() {
            env_config.file = Some(file);
        }
    }

    // UC_CONCURRENCY - concurrent lookups
    if let Ok(val) = env::var("UC_CONCURRENCY") {
        match val.parse::<usize>() {
            Ok(concurrency) if concurrency > 0 && concurrency <= 100 => {
                env_config.concurrency = Some(concurrency);
            }
            _ => {
                if verbose {
                    eprintln!("Invalid UC_CONCURRENCY='{}', must be 1-100", val);
                }
            }
        }
    }

    // UC_TIMEOUT - per-lookup timeout
    if let Ok(timeout_str) = env::var("UC_TIMEOUT") {
        if parse_timeout_string(&timeout_str).is_some() {
            env_config.timeout = Some(timeout_str);
        } else if verbose {
            eprintln!(
                "Invalid UC_TIMEOUT='{}', use format like '5s', '30s', '2m'",
                timeout_str
            );
        }
    }

    // UC_API_URL - lookup endpoint template
    if let Ok(template) = env::var("UC_API_URL") {
        if template.contains("{}") {
            env_config.api_url = Some(template);
        } else if verbose {
            eprintln!(
                "Invalid UC_API_URL='{}', must contain a '{{}}' placeholder",
                template
            );
        }
    }

    // UC_CONFIG - explicit config file path
    if let Ok(path) = env::var("UC_CONFIG") {
        if !path.trim().is_empty() {
            env_config.config = Some(path);
        }
    }

    env_config
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| m * 60)
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok()
    }
}
