//! Memoized icon lookup
//!
//! An [`IconStore`] owns one archive source, the archive read from it and
//! the documents parsed so far. The archive is opened on first lookup and
//! documents are parsed per name on first access. Both are dropped by
//! [`IconStore::clear_cache`] and [`IconStore::set_source`].

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::archive::{ArchiveSource, IconArchive};
use crate::config::IconConfig;
use crate::document::IconDocument;
use crate::error::IconError;

/// Name → document lookup backed by a zip archive
#[derive(Debug, Default)]
pub struct IconStore {
    source: RwLock<ArchiveSource>,
    archive: RwLock<Option<Arc<IconArchive>>>,
    documents: RwLock<HashMap<String, Arc<IconDocument>>>,
}

impl IconStore {
    pub fn new(source: ArchiveSource) -> Self {
        Self {
            source: RwLock::new(source),
            archive: RwLock::new(None),
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// A store reading the bundled archive
    pub fn bundled() -> Self {
        Self::new(ArchiveSource::Bundled)
    }

    pub fn from_config(config: &IconConfig) -> Self {
        Self::new(config.archive_source())
    }

    /// The process-wide store, configured from the environment on first use
    pub fn global() -> Arc<IconStore> {
        static GLOBAL: OnceLock<Arc<IconStore>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| {
                Arc::new(IconStore::from_config(&IconConfig::from_env_or_default()))
            })
            .clone()
    }

    pub fn source(&self) -> ArchiveSource {
        self.source.read().clone()
    }

    /// Switch to another archive and drop everything cached from the old one
    pub fn set_source(&self, source: ArchiveSource) {
        tracing::debug!(%source, "switching icon archive");
        *self.source.write() = source;
        self.clear_cache();
    }

    /// Forget the archive and every parsed document
    pub fn clear_cache(&self) {
        *self.archive.write() = None;
        self.documents.write().clear();
    }

    /// Number of parsed documents currently cached
    pub fn cached_len(&self) -> usize {
        self.documents.read().len()
    }

    /// Look up an icon by name
    ///
    /// Repeated calls return the same document until the cache is cleared.
    pub fn resolve(&self, name: &str) -> Result<Arc<IconDocument>, IconError> {
        if let Some(document) = self.documents.read().get(name) {
            return Ok(Arc::clone(document));
        }

        let archive = self.archive()?;
        let source = archive
            .get(name)
            .ok_or_else(|| IconError::NotFound(name.to_string()))?;
        let document = Arc::new(IconDocument::parse(name, source)?);
        tracing::debug!(icon = name, "parsed icon");

        let mut documents = self.documents.write();
        let cached = documents
            .entry(name.to_string())
            .or_insert_with(|| Arc::clone(&document));
        Ok(Arc::clone(cached))
    }

    /// Whether the active archive has an entry for `name`
    pub fn contains(&self, name: &str) -> Result<bool, IconError> {
        Ok(self.archive()?.contains(name))
    }

    /// Icon names in the active archive, sorted
    pub fn names(&self) -> Result<Vec<String>, IconError> {
        Ok(self.archive()?.names().map(str::to_string).collect())
    }

    fn archive(&self) -> Result<Arc<IconArchive>, IconError> {
        if let Some(archive) = self.archive.read().as_ref() {
            return Ok(Arc::clone(archive));
        }

        let mut slot = self.archive.write();
        if let Some(archive) = slot.as_ref() {
            return Ok(Arc::clone(archive));
        }
        let archive = Arc::new(IconArchive::open(&self.source.read())?);
        *slot = Some(Arc::clone(&archive));
        Ok(archive)
    }
}
