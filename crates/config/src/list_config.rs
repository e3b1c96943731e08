//! Book list configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use shelfmate_library::{SortKey, SortParams};

/// Defaults for book list views and the known format reference list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListConfig {
    /// Sort key name used when a view opens
    pub default_sort_key: String,

    /// Whether views open in descending order
    pub default_descending: bool,

    /// Format tags offered for filtering and used to group statistics
    pub formats: Vec<String>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_sort_key: SortKey::Title.as_str().to_string(),
            default_descending: false,
            formats: vec![
                "Paperback".to_string(),
                "Hardcover".to_string(),
                "E-book".to_string(),
                "Audiobook".to_string(),
            ],
        }
    }
}

impl ListConfig {
    /// Sort parameters a new view starts with
    pub fn sort_params(&self) -> SortParams {
        SortParams::new(
            SortKey::from_name_lossy(&self.default_sort_key),
            self.default_descending,
        )
    }
}

impl ConfigSection for ListConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = Vec::new();

        if self.default_sort_key.parse::<SortKey>().is_err() {
            let allowed: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_str()).collect();
            results.push(Validator::one_of(
                &self.default_sort_key.as_str(),
                &allowed,
                "list.default_sort_key",
            ));
        }

        for (i, format) in self.formats.iter().enumerate() {
            results.push(Validator::not_empty(format, &format!("list.formats[{}]", i)));
        }

        Validator::collect_errors(results)
    }

    fn section_name(&self) -> &'static str {
        "list"
    }
}
