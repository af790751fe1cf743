//! Error types for icon lookup and rendering

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving or rendering an icon
#[derive(Debug, Error)]
pub enum IconError {
    /// The active archive has no entry for this name
    #[error("The icon '{0}' does not exist.")]
    NotFound(String),

    /// The archive file could not be read
    #[error("failed to read icon archive {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The archive is not a readable zip file
    #[error("invalid icon archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The entry exists but is not well-formed SVG
    #[error("icon '{name}' is not valid SVG: {message}")]
    MalformedSvg { name: String, message: String },

    /// The entry is not UTF-8 text
    #[error("icon '{name}' is not valid UTF-8")]
    InvalidEncoding { name: String },

    /// A caller attribute key is not a valid XML attribute name
    #[error("invalid attribute name '{key}'")]
    InvalidAttribute { key: String },
}

impl IconError {
    /// Whether this error means the name is simply absent from the archive
    pub fn is_not_found(&self) -> bool {
        matches!(self, IconError::NotFound(_))
    }

    pub(crate) fn malformed(name: &str, message: impl ToString) -> Self {
        IconError::MalformedSvg {
            name: name.to_string(),
            message: message.to_string(),
        }
    }
}
