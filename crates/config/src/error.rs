//! Config errors

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but holds nothing but whitespace
    #[error("{} is empty; delete it or run `shelfmate config reset`", .path.display())]
    Empty { path: PathBuf },

    #[error("Invalid TOML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot create {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot back up {}: {source}", .path.display())]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No config directory: {0}")]
    NoConfigDir(String),

    /// Rejected on save; never raised on load
    #[error("{} invalid setting(s): {}", .0.len(), describe(.0))]
    Invalid(Vec<ValidationError>),
}

impl ConfigError {
    /// Field-level problems behind an [`ConfigError::Invalid`] error
    pub fn problems(&self) -> &[ValidationError] {
        match self {
            ConfigError::Invalid(problems) => problems,
            _ => &[],
        }
    }
}

/// One bad value, addressed by its dotted TOML path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// e.g. `list.default_sort_key`
    pub field: String,
    pub message: String,
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)?;
        if let Some(value) = &self.value {
            write!(f, " (got {:?})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Joins problems into one line for logs and error messages
pub(crate) fn describe(problems: &[ValidationError]) -> String {
    problems
        .iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("app.data_dir", "must not be empty");
        assert_eq!(err.to_string(), "app.data_dir must not be empty");
    }

    #[test]
    fn test_validation_error_with_value() {
        let err = ValidationError::with_value(
            "list.default_sort_key",
            "is not a sort key",
            "colour",
        );
        assert_eq!(
            err.to_string(),
            "list.default_sort_key is not a sort key (got \"colour\")"
        );
    }

    #[test]
    fn test_invalid_lists_every_problem() {
        let err = ConfigError::Invalid(vec![
            ValidationError::new("list.formats[0]", "must not be empty"),
            ValidationError::with_value("version", "must be between 1 and 1", 3),
        ]);
        assert_eq!(
            err.to_string(),
            "2 invalid setting(s): list.formats[0] must not be empty; \
             version must be between 1 and 1 (got \"3\")"
        );
        assert_eq!(err.problems().len(), 2);
    }

    #[test]
    fn test_problems_empty_for_io_errors() {
        let err = ConfigError::Empty {
            path: PathBuf::from("config.toml"),
        };
        assert!(err.problems().is_empty());
        assert!(err.to_string().starts_with("config.toml is empty"));
    }
}
