//! Integration tests for the configuration system

use shelfmate_config::{
    AppConfig, Config, ConfigManager, ConfigSection, ListConfig, LogLevel, SyncSettings,
    CONFIG_VERSION,
};
use shelfmate_library::{SortKey, SortParams};
use tempfile::TempDir;

fn setup_test_manager() -> Result<(TempDir, ConfigManager), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())?;
    Ok((temp_dir, manager))
}

#[test]
fn test_full_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    assert!(manager.initialize()?);

    let config = manager.load()?;
    assert_eq!(config.version, CONFIG_VERSION);

    let mut modified = config.clone();
    modified.list.default_sort_key = "readDate".to_string();
    modified.list.default_descending = true;
    modified.sync.dry_run = true;
    manager.save(&modified)?;

    let reloaded = manager.load()?;
    assert_eq!(
        reloaded.list.sort_params(),
        SortParams::descending(SortKey::ReadDate)
    );
    assert!(reloaded.sync.dry_run);

    manager.reset()?;
    assert_eq!(manager.load()?, Config::default());

    Ok(())
}

#[test]
fn test_invalid_config_is_rejected_on_save() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    manager.save(&Config::default())?;
    assert!(manager.validate()?.is_empty());

    let mut invalid = Config::default();
    invalid.list.formats.push(String::new());
    assert!(manager.save(&invalid).is_err());

    assert_eq!(manager.load()?, Config::default());
    Ok(())
}

#[test]
fn test_no_temp_files_left_behind() -> Result<(), Box<dyn std::error::Error>> {
    let (temp_dir, manager) = setup_test_manager()?;

    manager.save(&Config::default())?;
    manager.save(&Config::default())?;

    let mut names: Vec<String> = std::fs::read_dir(temp_dir.path())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["config.toml", "config.toml.backup"]);

    Ok(())
}

#[test]
fn test_all_sections_default_are_valid() {
    assert!(AppConfig::default().validate().is_ok());
    assert!(ListConfig::default().validate().is_ok());
    assert!(SyncSettings::default().validate().is_ok());
}

#[test]
fn test_section_names() {
    assert_eq!(AppConfig::default().section_name(), "app");
    assert_eq!(ListConfig::default().section_name(), "list");
    assert_eq!(SyncSettings::default().section_name(), "sync");
}

#[test]
fn test_hand_written_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    std::fs::write(
        manager.config_path(),
        r#"
version = 1

[app]
log_level = "debug"

[list]
default_sort_key = "rating"
default_descending = true
formats = ["Paperback", "Kindle"]

[sync]
dry_run = true
"#,
    )?;

    let config = manager.load()?;
    assert_eq!(config.app.log_level, LogLevel::Debug);
    assert_eq!(config.app.data_dir, AppConfig::default().data_dir);
    assert_eq!(config.list.formats, vec!["Paperback", "Kindle"]);
    assert_eq!(config.list.sort_params(), SortParams::descending(SortKey::Rating));
    assert!(config.sync.dry_run);

    Ok(())
}

#[test]
fn test_env_overrides() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    manager.save(&Config::default())?;

    std::env::set_var("SHELFMATE_LIST_DEFAULT_SORT_KEY", "author");
    std::env::set_var("SHELFMATE_SYNC_DRY_RUN", "true");

    let config = manager.load_with_env_overrides()?;

    std::env::remove_var("SHELFMATE_LIST_DEFAULT_SORT_KEY");
    std::env::remove_var("SHELFMATE_SYNC_DRY_RUN");

    assert_eq!(config.list.sort_params().key, SortKey::Author);
    assert!(config.sync.dry_run);

    // overrides never reach the file
    assert_eq!(manager.load()?, Config::default());
    Ok(())
}

#[test]
fn test_graceful_degradation_on_load_error() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    std::fs::write(manager.config_path(), "[list]\nformats = 7\n")?;

    assert!(manager.load().is_err());
    assert_eq!(manager.load_or_default(), Config::default());
    Ok(())
}
