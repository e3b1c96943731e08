//! Sync configuration section

use crate::validation::{ConfigSection, ValidationError};
use serde::{Deserialize, Serialize};

/// Defaults for the `sync` command
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncSettings {
    /// Report planned changes without touching the remote store
    pub dry_run: bool,
}

impl ConfigSection for SyncSettings {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Ok(())
    }

    fn section_name(&self) -> &'static str {
        "sync"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SyncSettings::default();
        assert!(!settings.dry_run);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_dry_run_from_toml() {
        let settings: SyncSettings = toml::from_str("dry_run = true").unwrap();
        assert!(settings.dry_run);
    }

    #[test]
    fn test_retired_auto_sync_key_is_ignored() {
        let settings: SyncSettings = toml::from_str("auto_sync = true").unwrap();
        assert_eq!(settings, SyncSettings::default());
    }
}
