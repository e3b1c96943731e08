//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "SHELFMATE";

/// Loads, saves and resolves paths for the shelfmate config file
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a config manager rooted at the platform config directory
    ///
    /// - Linux: `~/.config/shelfmate/`
    /// - macOS: `~/Library/Application Support/shelfmate/`
    /// - Windows: `%APPDATA%\shelfmate\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let config_path = config_dir.join("config.toml");
        let persistence = ConfigPersistence::new(config_path);

        Ok(Self {
            persistence,
            config_dir,
        })
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "shelfmate")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| {
                ConfigError::NoConfigDir("no home directory for the current user".to_string())
            })
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Resolves `app.data_dir` against the config directory when relative
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        if config.app.data_dir.is_absolute() {
            config.app.data_dir.clone()
        } else {
            self.config_dir.join(&config.app.data_dir)
        }
    }

    /// Loads the configuration from file
    ///
    /// A missing file yields defaults; a corrupted one is an error.
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the configuration, falling back to defaults on any error
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Validates and atomically saves the configuration
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Loads, modifies and saves the configuration in one step
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use shelfmate_config::ConfigManager;
    /// # let manager = ConfigManager::new().unwrap();
    /// manager.update(|config| {
    ///     config.list.default_sort_key = "rating".to_string();
    ///     config.list.default_descending = true;
    /// }).expect("Failed to update config");
    /// ```
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes a default config file unless one exists
    ///
    /// Returns `Ok(true)` when a new file was created.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.persistence.write_default()?;
        Ok(true)
    }

    /// Overwrites the config file with default values
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Returns every validation problem in the current config file
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let config = self.load()?;

        match config.validate() {
            Ok(()) => Ok(Vec::new()),
            Err(errors) => Ok(errors.iter().map(|e| e.to_string()).collect()),
        }
    }

    /// Loads the config and applies `SHELFMATE_SECTION_FIELD` overrides
    ///
    /// Example: `SHELFMATE_LIST_DEFAULT_SORT_KEY=rating`
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_overrides(&mut config, |key| std::env::var(key).ok());

        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings after env overrides: {:?}",
                errors
            );
        }

        Ok(config)
    }
}

/// Applies overrides from `lookup`; unparseable values are logged and skipped
pub(crate) fn apply_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(&format!("{}_{}", ENV_PREFIX, name));

    if let Some(level) = var("APP_LOG_LEVEL") {
        match level.parse::<LogLevel>() {
            Ok(level) => config.app.log_level = level,
            Err(e) => log::warn!("Ignoring {}_APP_LOG_LEVEL: {}", ENV_PREFIX, e),
        }
    }

    if let Some(dir) = var("APP_DATA_DIR") {
        config.app.data_dir = PathBuf::from(dir);
    }

    if let Some(key) = var("LIST_DEFAULT_SORT_KEY") {
        config.list.default_sort_key = key;
    }

    if let Some(flag) = var("LIST_DEFAULT_DESCENDING") {
        match parse_flag(&flag) {
            Some(v) => config.list.default_descending = v,
            None => log::warn!("Ignoring {}_LIST_DEFAULT_DESCENDING={}", ENV_PREFIX, flag),
        }
    }

    if let Some(flag) = var("SYNC_DRY_RUN") {
        match parse_flag(&flag) {
            Some(v) => config.sync.dry_run = v,
            None => log::warn!("Ignoring {}_SYNC_DRY_RUN={}", ENV_PREFIX, flag),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn setup_test_manager() -> (TempDir, ConfigManager) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())
            .expect("Failed to create manager");
        (temp_dir, manager)
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_load_or_default_with_missing_file() {
        let (_temp_dir, manager) = setup_test_manager();
        assert_eq!(manager.load_or_default(), Config::default());
    }

    #[test]
    fn test_load_or_default_with_corrupt_file() {
        let (_temp_dir, manager) = setup_test_manager();
        std::fs::write(manager.config_path(), "not = [valid").expect("Should write");
        assert_eq!(manager.load_or_default(), Config::default());
    }

    #[test]
    fn test_update() {
        let (_temp_dir, manager) = setup_test_manager();
        manager.save(&Config::default()).expect("Should save");

        manager
            .update(|config| {
                config.sync.dry_run = true;
            })
            .expect("Should update");

        let loaded = manager.load().expect("Should load");
        assert!(loaded.sync.dry_run);
    }

    #[test]
    fn test_initialize_creates_file_once() {
        let (_temp_dir, manager) = setup_test_manager();

        assert!(manager.initialize().expect("Should initialize"));
        assert!(manager.config_path().exists());
        assert!(!manager.initialize().expect("Should initialize"));
    }

    #[test]
    fn test_reset() {
        let (_temp_dir, manager) = setup_test_manager();

        let mut config = Config::default();
        config.list.default_sort_key = "author".to_string();
        manager.save(&config).expect("Should save");

        manager.reset().expect("Should reset");
        assert_eq!(manager.load().expect("Should load"), Config::default());
    }

    #[test]
    fn test_validate_reports_hand_edited_problems() {
        let (_temp_dir, manager) = setup_test_manager();
        std::fs::write(
            manager.config_path(),
            "[list]\ndefault_sort_key = \"colour\"\nformats = [\"\"]\n",
        )
        .expect("Should write");

        let errors = manager.validate().expect("Should validate");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_data_dir_resolution() {
        let (temp_dir, manager) = setup_test_manager();
        let mut config = Config::default();
        assert_eq!(manager.data_dir(&config), temp_dir.path().join("data"));

        let absolute = temp_dir.path().join("elsewhere");
        config.app.data_dir = absolute.clone();
        assert_eq!(manager.data_dir(&config), absolute);
    }

    #[test]
    fn test_overrides_apply() {
        let vars = env(&[
            ("SHELFMATE_LIST_DEFAULT_SORT_KEY", "rating"),
            ("SHELFMATE_LIST_DEFAULT_DESCENDING", "yes"),
            ("SHELFMATE_SYNC_DRY_RUN", "1"),
            ("SHELFMATE_APP_LOG_LEVEL", "debug"),
        ]);
        let mut config = Config::default();
        apply_overrides(&mut config, |k| vars.get(k).cloned());

        assert_eq!(config.list.default_sort_key, "rating");
        assert!(config.list.default_descending);
        assert!(config.sync.dry_run);
        assert_eq!(config.app.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_bad_overrides_are_skipped() {
        let vars = env(&[
            ("SHELFMATE_SYNC_DRY_RUN", "maybe"),
            ("SHELFMATE_APP_LOG_LEVEL", "shouty"),
        ]);
        let mut config = Config::default();
        apply_overrides(&mut config, |k| vars.get(k).cloned());

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_file_path() {
        let (_temp_dir, manager) = setup_test_manager();
        assert!(manager.config_path().ends_with("config.toml"));
    }
}
