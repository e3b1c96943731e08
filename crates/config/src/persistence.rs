//! Reading and writing the config file
//!
//! Writes go through a temporary file in the same directory and an atomic
//! rename, so a crash never leaves a half-written `config.toml` behind. The
//! previous file is copied to `config.toml.backup` before each overwrite.

use crate::error::describe;
use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const DEFAULT_HEADER: &str = "\
# Shelfmate configuration
#
# [app]   log_level, data_dir, color_output
# [list]  default_sort_key (title, author, rating, pageCount,
#         publishedDate, readDate, id), default_descending, formats
# [sync]  dry_run
#
# SHELFMATE_* environment variables override values from this file.

";

/// Handles config file persistence
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Loads configuration from file
    ///
    /// A missing file yields the default config. An empty file is treated
    /// as corrupted rather than as defaults. Validation problems are logged
    /// and the config is still returned so the user can fix it in place.
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            log::info!(
                "Config file not found at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::Read {
                path: self.config_path.clone(),
                source: e,
            })?;

        if contents.trim().is_empty() {
            return Err(ConfigError::Empty {
                path: self.config_path.clone(),
            });
        }

        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: self.config_path.clone(),
            source: e,
        })?;

        if config.version > CONFIG_VERSION {
            log::warn!(
                "Config version {} is newer than supported version {}; unknown keys are ignored",
                config.version,
                CONFIG_VERSION
            );
        }

        if let Err(errors) = config.validate() {
            log::warn!("Config validation warnings: {}", describe(&errors));
        }

        Ok(config)
    }

    /// Validates and saves configuration atomically
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        let toml_string = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        self.save_contents(config, &toml_string)
    }

    /// Writes the default config preceded by a short commented guide
    pub fn write_default(&self) -> ConfigResult<()> {
        let config = Config::default();
        let body = toml::to_string_pretty(&config).map_err(ConfigError::Serialize)?;
        self.save_contents(&config, &format!("{}{}", DEFAULT_HEADER, body))?;

        log::info!("Generated default config at {}", self.config_path.display());
        Ok(())
    }

    fn save_contents(&self, config: &Config, contents: &str) -> ConfigResult<()> {
        if let Err(errors) = config.validate() {
            return Err(ConfigError::Invalid(errors));
        }

        if let Some(parent) = self.config_path.parent() {
            self.ensure_directory_exists(parent)?;
        }

        if self.config_path.exists() {
            self.backup_config()?;
        }

        let temp_file = self.create_temp_file()?;
        self.write_atomic(temp_file, contents)?;

        log::info!("Config saved to {}", self.config_path.display());
        Ok(())
    }

    fn ensure_directory_exists(&self, path: &Path) -> ConfigResult<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| ConfigError::CreateDir {
                path: path.to_path_buf(),
                source: e,
            })?;
            log::info!("Created config directory: {}", path.display());
        }
        Ok(())
    }

    fn backup_config(&self) -> ConfigResult<()> {
        let backup_path = self.config_path.with_extension("toml.backup");
        fs::copy(&self.config_path, &backup_path)
            .map_err(|e| ConfigError::Backup {
                path: backup_path.clone(),
                source: e,
            })?;
        log::debug!("Backed up config to {}", backup_path.display());
        Ok(())
    }

    fn create_temp_file(&self) -> ConfigResult<NamedTempFile> {
        let dir = self
            .config_path
            .parent()
            .ok_or_else(|| {
                ConfigError::NoConfigDir(format!(
                    "{} has no parent directory",
                    self.config_path.display()
                ))
            })?;

        NamedTempFile::new_in(dir).map_err(|e| self.write_error(e))
    }

    fn write_atomic(&self, mut temp_file: NamedTempFile, content: &str) -> ConfigResult<()> {
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| self.write_error(e))?;
        temp_file.flush().map_err(|e| self.write_error(e))?;

        temp_file
            .persist(&self.config_path)
            .map_err(|e| self.write_error(e.error))?;

        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> ConfigError {
        ConfigError::Write {
            path: self.config_path.clone(),
            source,
        }
    }
}
