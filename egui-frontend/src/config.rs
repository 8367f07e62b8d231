//! # Configuration
//!
//! Settings are read from a YAML file. The location is `BANK_USAGE_CONFIG` when
//! set, otherwise `config.yaml` in the platform config directory. A missing file
//! means "use the defaults"; a malformed one is an error.
//!
//! ```yaml
//! backend:
//!   command: bank-usage-backend
//!   args: ["--stdio"]
//!   request_timeout_secs: 30
//!   login_timeout_secs: 300
//! display:
//!   currency_symbol: "€"
//!   symbol_after_amount: true
//!   decimal_separator: ","
//!   thousands_separator: "."
//!   date_format: "%d/%m/%Y"
//! log_level: info
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "BANK_USAGE_CONFIG";
pub const BACKEND_COMMAND_ENV: &str = "BANK_USAGE_BACKEND";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    InvalidYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// How to reach the backend process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_command")]
    pub command: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Login waits for the user to finish the browser sign-in
    #[serde(default = "default_login_timeout_secs")]
    pub login_timeout_secs: u64,
}

fn default_backend_command() -> PathBuf {
    PathBuf::from("bank-usage-backend")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_login_timeout_secs() -> u64 {
    300
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            command: default_backend_command(),
            args: Vec::new(),
            request_timeout_secs: default_request_timeout_secs(),
            login_timeout_secs: default_login_timeout_secs(),
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }
}

/// Locale-dependent presentation. Defaults follow Greek euro formatting ("1.234,50 €").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_true")]
    pub symbol_after_amount: bool,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
    /// chrono format string for transaction dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

fn default_true() -> bool {
    true
}

fn default_decimal_separator() -> char {
    ','
}

fn default_thousands_separator() -> char {
    '.'
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            symbol_after_amount: true,
            decimal_separator: default_decimal_separator(),
            thousands_separator: default_thousands_separator(),
            date_format: default_date_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    /// Default log filter; RUST_LOG takes precedence
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            display: DisplayConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load from the configured location and apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };

        if let Ok(command) = std::env::var(BACKEND_COMMAND_ENV) {
            if !command.trim().is_empty() {
                config.backend.command = PathBuf::from(command);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // An empty file parses as null, which serde_yaml refuses for a struct
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&raw).map_err(|source| ConfigError::InvalidYaml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.command.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "backend.command".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.backend.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.request_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.backend.login_timeout_secs < self.backend.request_timeout_secs {
            return Err(ConfigError::InvalidValue {
                field: "backend.login_timeout_secs".to_string(),
                reason: "must not be shorter than request_timeout_secs".to_string(),
            });
        }
        if self.display.decimal_separator == self.display.thousands_separator {
            return Err(ConfigError::InvalidValue {
                field: "display.thousands_separator".to_string(),
                reason: "must differ from the decimal separator".to_string(),
            });
        }
        if StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidValue {
                field: "display.date_format".to_string(),
                reason: format!("'{}' is not a valid date format", self.display.date_format),
            });
        }
        Ok(())
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    directories::ProjectDirs::from("", "", "bank-usage")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.backend.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.backend.login_timeout(), Duration::from_secs(300));
        assert_eq!(config.display.currency_symbol, "€");
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let file = write_config(
            "backend:\n  command: /opt/bank/backend\n  args: [\"--stdio\"]\ndisplay:\n  currency_symbol: \"$\"\n  symbol_after_amount: false\n  decimal_separator: \".\"\n  thousands_separator: \",\"\n",
        );

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.backend.command, PathBuf::from("/opt/bank/backend"));
        assert_eq!(config.backend.args, vec!["--stdio".to_string()]);
        assert_eq!(config.backend.request_timeout_secs, 30);
        assert_eq!(config.backend.login_timeout_secs, 300);
        assert_eq!(config.display.currency_symbol, "$");
        assert!(!config.display.symbol_after_amount);
        assert_eq!(config.display.date_format, "%d/%m/%Y");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("  \n");
        assert_eq!(AppConfig::load_from(file.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let file = write_config("backend: [not, a, map\n");
        assert!(matches!(
            AppConfig::load_from(file.path()),
            Err(ConfigError::InvalidYaml { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let file = write_config("backend:\n  request_timeout_secs: 0\n");
        match AppConfig::load_from(file.path()) {
            Err(ConfigError::InvalidValue { field, .. }) => {
                assert_eq!(field, "backend.request_timeout_secs")
            }
            other => panic!("expected invalid value, got {:?}", other),
        }
    }

    #[test]
    fn test_login_timeout_shorter_than_request_timeout_is_rejected() {
        let file = write_config("backend:\n  request_timeout_secs: 60\n  login_timeout_secs: 10\n");
        match AppConfig::load_from(file.path()) {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "backend.login_timeout_secs"),
            other => panic!("expected invalid value, got {:?}", other),
        }
    }

    #[test]
    fn test_identical_separators_are_rejected() {
        let mut config = AppConfig::default();
        config.display.thousands_separator = ',';
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_date_format_specifier_is_rejected() {
        let mut config = AppConfig::default();
        config.display.date_format = "%d/%Q".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "display.date_format"
        ));
    }
}
