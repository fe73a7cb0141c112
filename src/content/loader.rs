//! Content loader - scans one content directory into typed records
//!
//! Every content type follows the same pipeline: list the directory, keep
//! `*.md` files, split front-matter, validate into a record. A file that fails
//! any step is logged and skipped; the rest of the scan carries on.

use indexmap::IndexMap;
use std::io;
use std::path::{Path, PathBuf};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::frontmatter::{self, Parsed};
use super::fs::ContentFs;
use crate::cache::{CacheStats, CachedBody, ContentCache};
use crate::config::Mode;
use crate::error::{ContentError, Result};
use crate::helpers::{normalize_date, sort_by_date_mut, Dated};

const MARKDOWN_EXT: &str = ".md";

/// Outcome of checking a parsed document against a record's requirements
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    Valid(T),
    Invalid(String),
}

/// Files whose date was kept verbatim because it did not parse.
///
/// Tracks slugs rather than events: a loader resets it at the start of every
/// scan, so rescans in development mode do not count the same file twice.
#[derive(Debug, Clone, Default)]
pub struct DateWarnings(Arc<Mutex<HashSet<String>>>);

impl DateWarnings {
    /// Normalize to `YYYY-MM-DD`, passing unparseable strings through unchanged
    pub fn normalize(&self, slug: &str, raw: &str) -> String {
        match normalize_date(raw) {
            Some(date) => date,
            None => {
                self.slugs().insert(slug.to_string());
                tracing::warn!("{}: unparseable date {:?}, keeping it as written", slug, raw);
                raw.to_string()
            }
        }
    }

    /// Number of files with an unparseable date in the latest scan
    pub fn count(&self) -> usize {
        self.slugs().len()
    }

    fn reset(&self) {
        self.slugs().clear();
    }

    fn slugs(&self) -> MutexGuard<'_, HashSet<String>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A record type that lives in its own content directory
pub trait ContentKind: Dated + Clone + Send + Sync + Sized + 'static {
    /// Human-readable name used in logs
    const KIND: &'static str;
    /// Directory name under the content root
    const DIR: &'static str;

    /// Check the parsed document and build the record
    fn validate(slug: &str, doc: &Parsed<'_>, dates: &DateWarnings) -> Validation<Self>;

    /// Order a full scan before it is cached. Newest first by default.
    fn arrange(items: &mut [Self]) {
        sort_by_date_mut(items);
    }
}

/// Loads and caches one content type
pub struct ContentLoader<K, F> {
    fs: Arc<F>,
    dir: PathBuf,
    cache: ContentCache<K>,
    dates: DateWarnings,
}

impl<K: ContentKind, F: ContentFs> ContentLoader<K, F> {
    /// Create a loader for `<content_root>/<K::DIR>`
    pub fn new(fs: Arc<F>, content_root: &Path, mode: Mode, dates: DateWarnings) -> Self {
        Self {
            fs,
            dir: content_root.join(K::DIR),
            cache: ContentCache::new(mode),
            dates,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All valid records, arranged, served from cache when possible
    pub async fn all(&self) -> Result<Arc<Vec<K>>> {
        if let Some(items) = self.cache.metadata() {
            return Ok(items);
        }

        let mut items = self.scan().await?;
        K::arrange(&mut items);
        Ok(self.cache.store_metadata(items))
    }

    /// Markdown body of `slug`, or `None` if there is no such file
    pub async fn body(&self, slug: &str) -> Result<CachedBody> {
        if let Some(body) = self.cache.body(slug) {
            return Ok(body);
        }

        let body = self.read_body(slug).await?;
        self.cache.store_body(slug, body.clone());
        Ok(body)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Files of this kind whose date did not parse in the latest scan
    pub fn date_warnings(&self) -> usize {
        self.dates.count()
    }

    /// Read every markdown file in the directory
    async fn scan(&self) -> Result<Vec<K>> {
        self.dates.reset();
        if self
            .fs
            .ensure_dir(&self.dir)
            .await
            .map_err(|e| ContentError::io(&self.dir, e))?
        {
            tracing::info!("Created empty content directory {:?}", self.dir);
            return Ok(Vec::new());
        }

        let names = self
            .fs
            .list_files(&self.dir)
            .await
            .map_err(|e| ContentError::io(&self.dir, e))?;

        let mut by_slug: IndexMap<String, K> = IndexMap::new();
        let mut skipped = 0usize;

        for name in names {
            let Some(slug) = slug_from_filename(&name) else {
                continue;
            };
            match self.load_file(slug, &self.dir.join(&name)).await {
                Some(item) => {
                    if by_slug.insert(slug.to_string(), item).is_some() {
                        tracing::warn!("Duplicate {} slug {:?}, keeping the last file", K::KIND, slug);
                    }
                }
                None => skipped += 1,
            }
        }

        tracing::debug!(
            "Loaded {} {}(s) from {:?}, skipped {}",
            by_slug.len(),
            K::KIND,
            self.dir,
            skipped
        );

        Ok(by_slug.into_values().collect())
    }

    /// Load a single file, logging and dropping it on any failure
    async fn load_file(&self, slug: &str, path: &Path) -> Option<K> {
        let raw = match self.fs.read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read {} {:?}: {}", K::KIND, path, e);
                return None;
            }
        };

        let doc = match frontmatter::parse(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Failed to parse {} {:?}: {}", K::KIND, path, e);
                return None;
            }
        };

        match K::validate(slug, &doc, &self.dates) {
            Validation::Valid(item) => Some(item),
            Validation::Invalid(reason) => {
                tracing::warn!("Skipping invalid {} {:?}: {}", K::KIND, path, reason);
                None
            }
        }
    }

    async fn read_body(&self, slug: &str) -> Result<CachedBody> {
        if !is_safe_slug(slug) {
            return Ok(None);
        }

        let path = self.dir.join(format!("{}{}", slug, MARKDOWN_EXT));
        let raw = match self.fs.read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ContentError::io(path, e)),
        };

        match frontmatter::parse(&raw) {
            Ok(doc) => Ok(Some(Arc::from(doc.content))),
            Err(e) => {
                tracing::warn!("Failed to parse {} {:?}: {}", K::KIND, path, e);
                Ok(None)
            }
        }
    }
}

/// `hello-world.md` -> `hello-world`; anything else is not content
pub fn slug_from_filename(name: &str) -> Option<&str> {
    name.strip_suffix(MARKDOWN_EXT)
        .filter(|slug| !slug.is_empty() && !slug.starts_with('.'))
}

/// A slug may only name a file directly inside the content directory
pub(crate) fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\'])
        && !slug.contains('\0')
}
