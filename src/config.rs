//! Configuration for icon lookup and the template call surface
//!
//! Settings can be loaded from a TOML file and overridden through the
//! environment:
//!
//! ```toml
//! icons_zip_path = "static/lucide-latest.zip"
//! default_size = 24
//! fallback_icon = "alert-triangle"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::archive::ArchiveSource;

/// Environment variable pointing at an alternate icon archive
pub const ZIP_PATH_ENV: &str = "LUCIDE_ICONS_ZIP_PATH";

/// Environment variable pointing at a TOML configuration file
pub const CONFIG_PATH_ENV: &str = "LUCIDE_CONFIG";

/// Size applied to icons when the caller does not pass one
pub const DEFAULT_SIZE: u32 = 24;

/// Icon rendered in place of a missing one
pub const DEFAULT_FALLBACK_ICON: &str = "alert-triangle";

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Icon settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Alternate archive path; the bundled archive is used when unset
    pub icons_zip_path: Option<PathBuf>,

    /// Size used when a template call omits `size`
    pub default_size: u32,

    /// Icon tried when the requested one cannot be rendered
    pub fallback_icon: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            icons_zip_path: None,
            default_size: DEFAULT_SIZE,
            fallback_icon: DEFAULT_FALLBACK_ICON.to_string(),
        }
    }
}

impl IconConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from the environment
    ///
    /// `LUCIDE_CONFIG` names a TOML file to start from; `LUCIDE_ICONS_ZIP_PATH`
    /// then overrides the archive path.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match non_empty_var(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(path) = non_empty_var(ZIP_PATH_ENV) {
            config.icons_zip_path = Some(PathBuf::from(path));
        }
        Ok(config)
    }

    /// Like [`IconConfig::from_env`], falling back to defaults on error
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring invalid icon configuration");
            Self::default()
        })
    }

    /// Set the archive path
    pub fn with_icons_zip_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.icons_zip_path = Some(path.into());
        self
    }

    /// Use the bundled archive
    pub fn without_icons_zip_path(mut self) -> Self {
        self.icons_zip_path = None;
        self
    }

    /// Set the default icon size
    pub fn with_default_size(mut self, size: u32) -> Self {
        self.default_size = size;
        self
    }

    /// Set the fallback icon name
    pub fn with_fallback_icon(mut self, name: impl Into<String>) -> Self {
        self.fallback_icon = name.into();
        self
    }

    /// The archive this configuration selects
    pub fn archive_source(&self) -> ArchiveSource {
        ArchiveSource::from_override(self.icons_zip_path.clone())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IconConfig::default();
        assert_eq!(config.icons_zip_path, None);
        assert_eq!(config.default_size, 24);
        assert_eq!(config.fallback_icon, "alert-triangle");
        assert_eq!(config.archive_source(), ArchiveSource::Bundled);
    }

    #[test]
    fn test_builder_pattern() {
        let config = IconConfig::new()
            .with_icons_zip_path("/tmp/icons.zip")
            .with_default_size(16)
            .with_fallback_icon("circle-help");

        assert_eq!(config.icons_zip_path, Some(PathBuf::from("/tmp/icons.zip")));
        assert_eq!(config.default_size, 16);
        assert_eq!(config.fallback_icon, "circle-help");
        assert_eq!(
            config.archive_source(),
            ArchiveSource::Path(PathBuf::from("/tmp/icons.zip"))
        );

        let config = config.without_icons_zip_path();
        assert_eq!(config.archive_source(), ArchiveSource::Bundled);
    }

    #[test]
    fn test_parse_toml() {
        let config = IconConfig::from_str(
            r#"
icons_zip_path = "static/lucide-latest.zip"
default_size = 32
"#,
        )
        .expect("Should parse");
        assert_eq!(
            config.icons_zip_path,
            Some(PathBuf::from("static/lucide-latest.zip"))
        );
        assert_eq!(config.default_size, 32);
        assert_eq!(config.fallback_icon, "alert-triangle");
    }

    #[test]
    fn test_parse_empty_toml() {
        let config = IconConfig::from_str("").expect("Should parse");
        assert_eq!(config, IconConfig::default());
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = IconConfig::from_str("default_size = \"big\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
