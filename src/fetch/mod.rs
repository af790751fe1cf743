//! Offline asset preparation
//!
//! Downloads a Lucide release and rewrites it into the archive format the
//! [`IconStore`](crate::IconStore) reads: one `<name>.svg` entry per icon at
//! the archive root.
//!
//! Release resolution tries, in order:
//!
//! 1. the requested version verbatim
//! 2. the requested version with its `v` prefix toggled
//! 3. the latest release reported by the release index

mod http;
mod repackage;

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

pub use http::{HttpReleaseClient, LATEST_RELEASE_URL, RELEASE_DOWNLOAD_BASE, USER_AGENT};
pub use repackage::{repackage, strip_data_slot, Repackaged, ICON_PREFIX};

/// Errors that can occur while preparing an icon archive
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid release index: {0}")]
    Json(#[from] serde_json::Error),

    #[error("release index has no tag name")]
    MissingTag,

    #[error("invalid release archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}", unresolved_message(.requested.as_deref()))]
    Unresolved { requested: Option<String> },
}

fn unresolved_message(requested: Option<&str>) -> String {
    match requested {
        Some(version) => format!(
            "Could not download Lucide for '{version}', and latest fallback failed."
        ),
        None => "Could not determine or download the latest Lucide release.".to_string(),
    }
}

/// Source of Lucide release metadata and archives
pub trait ReleaseClient {
    /// Tag of the most recent release, e.g. `v0.469.0`
    fn latest_tag(&self) -> Result<String, FetchError>;

    /// The release zip published under `tag`
    fn download_release(&self, tag: &str) -> Result<Vec<u8>, FetchError>;
}

/// A downloaded release
#[derive(Debug, Clone)]
pub struct Release {
    /// Resolved tag, always `v`-prefixed
    pub tag: String,
    /// Release zip as published upstream
    pub archive: Vec<u8>,
}

/// Outcome of [`update_archive`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    pub tag: String,
    pub path: PathBuf,
    /// Entry names written, in archive order
    pub icons: Vec<String>,
}

/// Tags to try for a requested version, before falling back to latest
pub fn tag_candidates(requested: Option<&str>) -> Vec<String> {
    let Some(version) = requested.map(str::trim).filter(|v| !v.is_empty()) else {
        return Vec::new();
    };

    let toggled = if version.starts_with('v') {
        version.trim_start_matches('v').to_string()
    } else {
        format!("v{version}")
    };

    let mut candidates = vec![version.to_string()];
    if !toggled.is_empty() && toggled != version {
        candidates.push(toggled);
    }
    candidates
}

fn normalize_tag(tag: &str) -> String {
    format!("v{}", tag.trim_start_matches('v'))
}

/// Find and download a release for `requested`, or the latest one
pub fn resolve_release<C>(client: &C, requested: Option<&str>) -> Result<Release, FetchError>
where
    C: ReleaseClient + ?Sized,
{
    let mut tried = Vec::new();
    for tag in tag_candidates(requested) {
        match client.download_release(&tag) {
            Ok(archive) => {
                return Ok(Release {
                    tag: normalize_tag(&tag),
                    archive,
                })
            }
            Err(err) => tracing::debug!(%tag, error = %err, "release download failed"),
        }
        tried.push(tag);
    }

    let unresolved = || FetchError::Unresolved {
        requested: requested.map(str::to_string).filter(|v| !v.trim().is_empty()),
    };

    let latest = match client.latest_tag() {
        Ok(tag) => tag,
        Err(err) => {
            tracing::debug!(error = %err, "could not determine latest release");
            return Err(unresolved());
        }
    };
    if tried.contains(&latest) {
        return Err(unresolved());
    }

    match client.download_release(&latest) {
        Ok(archive) => Ok(Release {
            tag: latest,
            archive,
        }),
        Err(err) => {
            tracing::debug!(tag = %latest, error = %err, "latest release download failed");
            Err(unresolved())
        }
    }
}

/// Download a release and write it as an icon archive at `output`
///
/// The previous archive is replaced only once the new one is complete.
pub fn update_archive<C>(
    client: &C,
    requested: Option<&str>,
    output: &Path,
) -> Result<UpdateReport, FetchError>
where
    C: ReleaseClient + ?Sized,
{
    let release = resolve_release(client, requested)?;
    tracing::info!(tag = %release.tag, "using Lucide release");

    let repackaged = repackage(&release.archive)?;
    write_atomically(output, &repackaged.bytes)?;

    Ok(UpdateReport {
        tag: release.tag,
        path: output.to_path_buf(),
        icons: repackaged.icons,
    })
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), FetchError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.persist(path).map_err(|e| FetchError::Io(e.error))?;
    Ok(())
}
