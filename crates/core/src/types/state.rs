//! Reading lifecycle state

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a book sits in the reading lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookState {
    /// Added to the collection without a reading intent
    #[default]
    New,
    /// Queued to read; ordered by priority
    Pending,
    /// Currently being read
    Reading,
    /// Finished
    Read,
}

impl BookState {
    pub const ALL: [BookState; 4] = [Self::New, Self::Pending, Self::Reading, Self::Read];

    /// Returns the canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Pending => "pending",
            Self::Reading => "reading",
            Self::Read => "read",
        }
    }
}

impl fmt::Display for BookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" | "unset" | "none" => Ok(Self::New),
            "pending" | "to-read" | "toread" => Ok(Self::Pending),
            "reading" => Ok(Self::Reading),
            "read" | "finished" => Ok(Self::Read),
            _ => Err(CoreError::UnknownState(s.to_string())),
        }
    }
}
