//! JSON configuration: the root pattern tree and the forms it feeds.
//!
//! ```json
//! {
//!   "pattern": { "type": "literal", "name": "keyword", "text": "piens" },
//!   "forms": [
//!     { "name": "Milk", "keyword": { "key": "keyword", "value": "piens" },
//!       "columns": ["keyword"], "datetime_field": "time" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forms::FormCatalog;
use crate::pattern::{Pattern, PatternError, PatternSpec};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration")]
    Io(#[from] std::io::Error),
    #[error("malformed configuration")]
    Json(#[from] serde_json::Error),
    #[error("invalid pattern tree")]
    Pattern(#[from] PatternError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub pattern: PatternSpec,
    #[serde(default)]
    pub forms: FormCatalog,
}

impl MatchConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Validate the pattern tree.
    pub fn build_pattern(&self) -> Result<Pattern, ConfigError> {
        Ok(self.pattern.clone().build()?)
    }
}
