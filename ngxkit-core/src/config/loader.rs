//! Options loader

use crate::config::Settings;
use crate::error::{Error, Result};
use std::path::Path;

/// Loader for option files in various formats
pub struct OptionsLoader;

impl OptionsLoader {
    /// Load settings from a `.toml` or `.json` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Options(format!("Failed to read options file: {}", e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        tracing::debug!("Loading options from {} ({})", path.display(), ext);

        match ext {
            "json" => Self::from_json(&content),
            "toml" => Self::from_toml(&content),
            _ => Err(Error::Options(format!("Unknown options format: {}", ext))),
        }
    }

    /// Parse JSON settings
    pub fn from_json(content: &str) -> Result<Settings> {
        serde_json::from_str(content).map_err(|e| Error::Options(format!("Invalid JSON: {}", e)))
    }

    /// Parse TOML settings
    pub fn from_toml(content: &str) -> Result<Settings> {
        toml::from_str(content).map_err(|e| Error::Options(format!("Invalid TOML: {}", e)))
    }
}
