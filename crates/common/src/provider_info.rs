//! Provider metadata loading from YAML files
//!
//! Name and revision usually come from the command line, but they can also be
//! kept next to a dump in a small metadata file:
//!
//! ```yaml
//! name: aws
//! revision: v5.31.0
//! dialect: sdk-2
//! ```

use crate::{Dialect, ExtractorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Provider identification stamped into the emitted document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderInfo {
    /// Provider name (e.g. "aws"); also names the output file
    pub name: String,
    /// Provider revision or version string
    #[serde(default)]
    pub revision: String,
    /// Dialect of the accompanying dump, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            revision: revision.into(),
            dialect: None,
        }
    }

    /// Load metadata from a YAML file
    ///
    /// Not validated: command-line flags may still replace the name, so
    /// callers run [`ProviderInfo::validate`] once everything is merged.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ExtractorError::Parse(format!("Failed to read metadata file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            ExtractorError::Parse(format!(
                "Failed to parse metadata YAML from {:?}: {}",
                path, e
            ))
        })
    }

    /// Parse metadata from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// The name is used as a file name, so it must be a single path component
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ExtractorError::Parse(
                "Provider name must not be empty".to_string(),
            ));
        }
        if self.name.contains(['/', '\\']) || self.name == "." || self.name == ".." {
            return Err(ExtractorError::Parse(format!(
                "Provider name {:?} is not a valid file name",
                self.name
            )));
        }
        Ok(())
    }
}
