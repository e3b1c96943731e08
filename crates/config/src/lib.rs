//! Shelfmate configuration
//!
//! Settings live in a single `config.toml` split into sections. Each section
//! implements [`ConfigSection`] so it validates on its own; the root
//! [`Config`] aggregates them.
//!
//! Loading never panics. A missing file yields defaults, validation
//! problems in a hand-edited file are logged rather than fatal, and writes
//! are atomic.
//!
//! # Example
//!
//! ```rust
//! use shelfmate_config::{Config, ConfigManager};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let manager = ConfigManager::with_directory(dir.path().to_path_buf()).unwrap();
//! let config = manager.load().unwrap_or_else(|e| {
//!     eprintln!("Config error: {}, using defaults", e);
//!     Config::default()
//! });
//!
//! println!("Sorting by {}", config.list.sort_params().key);
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

pub mod app_config;
pub mod list_config;
pub mod sync_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{ConfigManager, ENV_PREFIX};
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, LogLevel};
pub use list_config::ListConfig;
pub use sync_config::SyncSettings;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    pub app: AppConfig,

    /// List view defaults and known formats
    pub list: ListConfig,

    pub sync: SyncSettings,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates every section, returning all errors found
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Validator::in_range(self.version, 1, CONFIG_VERSION, "version") {
            errors.push(e);
        }

        collect_section(&self.app, &mut errors);
        collect_section(&self.list, &mut errors);
        collect_section(&self.sync, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn collect_section<S: ConfigSection>(section: &S, errors: &mut Vec<ValidationError>) {
    if let Err(mut problems) = section.validate() {
        log::debug!(
            "[{}] has {} invalid setting(s)",
            section.section_name(),
            problems.len()
        );
        errors.append(&mut problems);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            list: ListConfig::default(),
            sync: SyncSettings::default(),
        }
    }
}
