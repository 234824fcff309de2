//! Configuration management for fslist
//!
//! Settings are loaded from environment variables with defaults. Command-line
//! flags override them in the binary.
//!
//! # Environment Variables
//!
//! - `FSLIST_STRATEGY`: Traversal strategy (auto|recursive|typed|stat) - default: "auto"
//! - `FSLIST_LOG_LEVEL`: Logging level - default: "warn"
//! - `FSLIST_LOG_JSON`: Emit JSON log lines (true|false) - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use fslist::{DirectoryLister, FslistConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FslistConfig::default();
//! config.validate()?;
//!
//! let lister = DirectoryLister::from_config(&config);
//! let entries = lister.list(".").await?;
//! # Ok(())
//! # }
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::list::strategy::{select_strategy, Capabilities, Strategy};

const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_LOG_JSON: bool = false;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown traversal strategy name
    #[error("Invalid strategy: {0}. Valid options: auto, recursive, typed, stat")]
    InvalidStrategy(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Requested traversal strategy; `Auto` defers to capability detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyChoice {
    #[default]
    Auto,
    Recursive,
    Typed,
    Stat,
}

impl StrategyChoice {
    /// The strategy to run given what the backend offers
    pub fn resolve(self, capabilities: &Capabilities) -> Strategy {
        match self {
            StrategyChoice::Auto => select_strategy(capabilities),
            StrategyChoice::Recursive => Strategy::RecursiveNative,
            StrategyChoice::Typed => Strategy::TypedTraversal,
            StrategyChoice::Stat => Strategy::StatTraversal,
        }
    }
}

impl FromStr for StrategyChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(StrategyChoice::Auto),
            "recursive" => Ok(StrategyChoice::Recursive),
            "typed" => Ok(StrategyChoice::Typed),
            "stat" => Ok(StrategyChoice::Stat),
            _ => Err(ConfigError::InvalidStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for StrategyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyChoice::Auto => "auto",
            StrategyChoice::Recursive => "recursive",
            StrategyChoice::Typed => "typed",
            StrategyChoice::Stat => "stat",
        };
        f.write_str(name)
    }
}

/// Main configuration structure for fslist
#[derive(Debug, Clone)]
pub struct FslistConfig {
    /// Traversal strategy
    pub strategy: StrategyChoice,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit JSON log lines instead of plain text
    pub log_json: bool,
}

impl Default for FslistConfig {
    /// Loads from `FSLIST_*` environment variables, falling back to defaults
    ///
    /// An unrecognised `FSLIST_STRATEGY` is reported on stderr and replaced
    /// with `auto`. Configuration loads before logging is set up, so this
    /// cannot go through `tracing`.
    fn default() -> Self {
        let strategy = match env::var("FSLIST_STRATEGY") {
            Ok(value) => value.parse().unwrap_or_else(|err: ConfigError| {
                eprintln!("{}; falling back to auto", err);
                StrategyChoice::Auto
            }),
            Err(_) => StrategyChoice::Auto,
        };

        let log_level = env::var("FSLIST_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("FSLIST_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_LOG_JSON);

        Self {
            strategy,
            log_level,
            log_json,
        }
    }
}

impl FslistConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the log level is not recognised
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = vec![
            EnvGuard::unset("FSLIST_STRATEGY"),
            EnvGuard::unset("FSLIST_LOG_LEVEL"),
            EnvGuard::unset("FSLIST_LOG_JSON"),
        ];

        let config = FslistConfig::default();

        assert_eq!(config.strategy, StrategyChoice::Auto);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.log_json, DEFAULT_LOG_JSON);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = vec![
            EnvGuard::set("FSLIST_STRATEGY", "Stat"),
            EnvGuard::set("FSLIST_LOG_LEVEL", "DEBUG"),
            EnvGuard::set("FSLIST_LOG_JSON", "true"),
        ];

        let config = FslistConfig::default();

        assert_eq!(config.strategy, StrategyChoice::Stat);
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
    }

    #[test]
    #[serial]
    fn test_invalid_strategy_falls_back_to_auto() {
        let _guard = EnvGuard::set("FSLIST_STRATEGY", "parallel");

        let config = FslistConfig::default();
        assert_eq!(config.strategy, StrategyChoice::Auto);
    }

    #[test]
    fn test_strategy_choice_parsing() {
        assert_eq!("auto".parse::<StrategyChoice>().unwrap(), StrategyChoice::Auto);
        assert_eq!(
            "recursive".parse::<StrategyChoice>().unwrap(),
            StrategyChoice::Recursive
        );
        assert_eq!(" typed ".parse::<StrategyChoice>().unwrap(), StrategyChoice::Typed);
        assert!(matches!(
            "find".parse::<StrategyChoice>(),
            Err(ConfigError::InvalidStrategy(_))
        ));
    }

    #[test]
    fn test_strategy_choice_resolution() {
        let minimal = Capabilities::minimal();
        assert_eq!(
            StrategyChoice::Auto.resolve(&minimal),
            Strategy::StatTraversal
        );
        assert_eq!(
            StrategyChoice::Recursive.resolve(&minimal),
            Strategy::RecursiveNative
        );
        assert_eq!(
            StrategyChoice::Typed.resolve(&Capabilities::full()),
            Strategy::TypedTraversal
        );
    }

    #[test]
    fn test_configuration_validation_invalid_log_level() {
        let config = FslistConfig {
            strategy: StrategyChoice::Auto,
            log_level: "verbose".to_string(),
            log_json: false,
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_strategy_choice_display() {
        assert_eq!(StrategyChoice::Auto.to_string(), "auto");
        assert_eq!(StrategyChoice::Stat.to_string(), "stat");
    }
}
