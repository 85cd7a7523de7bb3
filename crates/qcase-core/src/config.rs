//! Runtime configuration
//!
//! Loaded from TOML; every section and field has a default, so an empty
//! file is a valid configuration.
//!
//! ```toml
//! [allocation]
//! timeout_ms = 5000
//!
//! [allocation.retry]
//! max_attempts = 16
//! initial_backoff_ms = 5
//! max_backoff_ms = 250
//!
//! [storage]
//! backend = "file"
//! dir = "./data/counters"
//!
//! [logging]
//! filter = "info,qcase_counter=debug"
//! json = false
//! ```

use crate::error::{CaseError, Result};
use qcase_counter::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseConfig {
    /// Id allocation
    pub allocation: AllocationConfig,
    /// Counter persistence
    pub storage: StorageConfig,
    /// Log output
    pub logging: LoggingConfig,
}

impl CaseConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns [`CaseError::ConfigParse`] on malformed TOML and
    /// [`CaseError::Config`] if validation fails
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Returns [`CaseError::Io`] if the file cannot be read, otherwise as
    /// [`CaseConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CaseError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// With allocation timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.allocation.timeout_ms = timeout_ms;
        self
    }

    /// With retry bound
    #[inline]
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.allocation.retry.max_attempts = max_attempts;
        self
    }

    /// With file-backed counters under `dir`
    #[inline]
    #[must_use]
    pub fn with_file_storage(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.backend = StorageBackend::File;
        self.storage.dir = dir.into();
        self
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    /// Returns [`CaseError::Config`] describing the first violation
    pub fn validate(&self) -> Result<()> {
        let alloc = &self.allocation;
        if alloc.timeout_ms == 0 {
            return Err(CaseError::Config(
                "allocation.timeout_ms must be at least 1".to_string(),
            ));
        }
        if alloc.retry.max_attempts == 0 {
            return Err(CaseError::Config(
                "allocation.retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if alloc.retry.initial_backoff_ms > alloc.retry.max_backoff_ms {
            return Err(CaseError::Config(format!(
                "allocation.retry.initial_backoff_ms ({}) exceeds max_backoff_ms ({})",
                alloc.retry.initial_backoff_ms, alloc.retry.max_backoff_ms
            )));
        }
        if self.storage.backend == StorageBackend::File
            && self.storage.dir.as_os_str().is_empty()
        {
            return Err(CaseError::Config(
                "storage.dir is required for the file backend".to_string(),
            ));
        }
        tracing_subscriber::EnvFilter::try_new(&self.logging.filter).map_err(|e| {
            CaseError::Config(format!("invalid logging.filter '{}': {e}", self.logging.filter))
        })?;
        Ok(())
    }
}

/// Id allocation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Deadline for one allocation; expiry issues a fallback id
    pub timeout_ms: u64,
    /// Conflict retry bound
    pub retry: RetryConfig,
}

impl AllocationConfig {
    /// Deadline as a duration
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            retry: RetryConfig::default(),
        }
    }
}

/// Bounded retry with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per increment, including the first
    pub max_attempts: u32,
    /// Delay after the first conflict
    pub initial_backoff_ms: u64,
    /// Upper bound on any single delay
    pub max_backoff_ms: u64,
}

impl RetryConfig {
    /// Counter retry policy
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.initial_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
        )
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 16,
            initial_backoff_ms: 5,
            max_backoff_ms: 250,
        }
    }
}

/// Counter backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local, lost on exit
    #[default]
    Memory,
    /// JSON documents on disk
    File,
}

/// Counter persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend
    pub backend: StorageBackend,
    /// Directory for the file backend
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            dir: PathBuf::from("./data/counters"),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = CaseConfig::from_toml_str("").unwrap();
        assert_eq!(config, CaseConfig::default());
        assert_eq!(config.allocation.timeout(), Duration::from_secs(5));
        assert_eq!(config.allocation.retry.policy(), RetryPolicy::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = CaseConfig::from_toml_str(
            r#"
            [allocation.retry]
            max_attempts = 4

            [storage]
            backend = "file"
            dir = "/var/lib/qcase"
            "#,
        )
        .unwrap();

        assert_eq!(config.allocation.retry.max_attempts, 4);
        assert_eq!(config.allocation.retry.max_backoff_ms, 250);
        assert_eq!(config.allocation.timeout_ms, 5_000);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.dir, PathBuf::from("/var/lib/qcase"));
        assert!(!config.logging.json);
    }

    #[test]
    fn validation_rejects_bad_bounds() {
        let err = CaseConfig::from_toml_str("[allocation.retry]\nmax_attempts = 0").unwrap_err();
        assert!(matches!(err, CaseError::Config(_)));

        let err = CaseConfig::from_toml_str("[allocation]\ntimeout_ms = 0").unwrap_err();
        assert!(matches!(err, CaseError::Config(_)));

        let err = CaseConfig::from_toml_str(
            "[allocation.retry]\ninitial_backoff_ms = 500\nmax_backoff_ms = 10",
        )
        .unwrap_err();
        assert!(err.to_string().contains("exceeds max_backoff_ms"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = CaseConfig::from_toml_str("[allocation\ntimeout_ms = 1").unwrap_err();
        assert!(matches!(err, CaseError::ConfigParse(_)));

        let err = CaseConfig::from_toml_str("[storage]\nbackend = \"redis\"").unwrap_err();
        assert!(matches!(err, CaseError::ConfigParse(_)));
    }

    #[test]
    fn builders_compose() {
        let config = CaseConfig::new()
            .with_timeout_ms(250)
            .with_max_attempts(3)
            .with_file_storage("/tmp/counters");

        assert!(config.validate().is_ok());
        assert_eq!(config.allocation.timeout(), Duration::from_millis(250));
        assert_eq!(config.storage.backend, StorageBackend::File);
    }
}
