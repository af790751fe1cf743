//! Zip archives of `<name>.svg` icon entries

use std::collections::BTreeMap;
use std::fmt;
use std::io::{Cursor, Read, Seek};
use std::path::PathBuf;

use zip::ZipArchive;

use crate::error::IconError;

/// The archive shipped with the crate
pub static BUNDLED_ARCHIVE: &[u8] = include_bytes!("../assets/lucide.zip");

/// Where an icon archive is read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ArchiveSource {
    /// The archive compiled into the crate
    #[default]
    Bundled,
    /// A zip file on disk
    Path(PathBuf),
}

impl ArchiveSource {
    /// Select the override path if one is configured, else the bundled archive
    pub fn from_override(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => ArchiveSource::Path(path),
            None => ArchiveSource::Bundled,
        }
    }
}

impl fmt::Display for ArchiveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveSource::Bundled => write!(f, "<bundled>"),
            ArchiveSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Raw SVG sources keyed by icon name
///
/// Only `.svg` entries at the archive root are icons; directories and
/// nested entries are skipped.
#[derive(Debug, Clone)]
pub struct IconArchive {
    source: ArchiveSource,
    entries: BTreeMap<String, Vec<u8>>,
}

impl IconArchive {
    /// Read every icon entry from the given source
    pub fn open(source: &ArchiveSource) -> Result<Self, IconError> {
        match source {
            ArchiveSource::Bundled => {
                Self::from_reader(source.clone(), Cursor::new(BUNDLED_ARCHIVE))
            }
            ArchiveSource::Path(path) => {
                let bytes = std::fs::read(path).map_err(|source| IconError::Io {
                    path: path.clone(),
                    source,
                })?;
                Self::from_reader(source.clone(), Cursor::new(bytes))
            }
        }
    }

    /// Read every icon entry from a zip stream
    pub fn from_reader<R: Read + Seek>(source: ArchiveSource, reader: R) -> Result<Self, IconError> {
        let mut zip = ZipArchive::new(reader)?;
        let mut entries = BTreeMap::new();

        for index in 0..zip.len() {
            let mut file = zip.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let Some(name) = icon_name(file.name()).map(str::to_string) else {
                continue;
            };
            let mut data = Vec::new();
            file.read_to_end(&mut data)
                .map_err(zip::result::ZipError::Io)?;
            entries.insert(name, data);
        }

        tracing::debug!(%source, icons = entries.len(), "loaded icon archive");
        Ok(Self { source, entries })
    }

    /// Where this archive was read from
    pub fn source(&self) -> &ArchiveSource {
        &self.source
    }

    /// Raw SVG source for an icon
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Icon names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Icon name for a zip entry, or `None` if the entry is not a root-level SVG
fn icon_name(entry: &str) -> Option<&str> {
    let stem = entry.strip_suffix(".svg")?;
    if stem.is_empty() || stem.contains('/') {
        None
    } else {
        Some(stem)
    }
}
