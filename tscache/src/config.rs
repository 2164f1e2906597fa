use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;

use crate::error::{CacheError, CacheResult};
use crate::storage::file::DEFAULT_STAGING_ROOT;
use crate::window::DEFAULT_WINDOW_SIZE;

/// Segment cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Number of segments kept in the live playlist
    pub window_size: usize,
    /// Directory that persisted segments and playlists are written under
    pub staging_root: String,
    pub logging: LoggingConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE.get(),
            staging_root: DEFAULT_STAGING_ROOT.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

impl CacheConfig {
    /// Load configuration from an optional file, then environment overrides
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // Override with environment variables (TSCACHE_STAGING_ROOT, TSCACHE_LOGGING__LEVEL, etc.)
        builder = builder.add_source(
            Environment::with_prefix("TSCACHE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Live window size as a validated non-zero count
    pub fn window_size(&self) -> CacheResult<NonZeroUsize> {
        NonZeroUsize::new(self.window_size)
            .ok_or_else(|| CacheError::Config("window_size must be at least 1".to_string()))
    }

    pub fn validate(&self) -> CacheResult<()> {
        self.window_size()?;
        if self.staging_root.trim().is_empty() {
            return Err(CacheError::Config("staging_root must not be empty".to_string()));
        }
        Ok(())
    }
}
