//! Content store - one loader per content type behind a single handle

use std::path::Path;
use std::sync::Arc;

use super::fs::{ContentFs, DiskFs};
use super::loader::{ContentLoader, DateWarnings};
use super::{Post, PostMetadata, ReadingMetadata, ReadingStatus, TilEntry};
use crate::cache::CacheStats;
use crate::config::Mode;
use crate::error::Result;
use crate::helpers::{count_tags, has_tag, resolve_related};

/// Posts, reading list and TIL entries for one site
pub struct ContentStore<F: ContentFs = DiskFs> {
    posts: ContentLoader<PostMetadata, F>,
    reading: ContentLoader<ReadingMetadata, F>,
    til: ContentLoader<TilEntry, F>,
    mode: Mode,
}

impl ContentStore<DiskFs> {
    /// Store reading from disk under `content_root`
    pub fn open(content_root: &Path, mode: Mode) -> Self {
        Self::new(Arc::new(DiskFs), content_root, mode)
    }
}

impl<F: ContentFs> ContentStore<F> {
    pub fn new(fs: Arc<F>, content_root: &Path, mode: Mode) -> Self {
        let loader_fs = || Arc::clone(&fs);
        Self {
            posts: ContentLoader::new(loader_fs(), content_root, mode, DateWarnings::default()),
            reading: ContentLoader::new(loader_fs(), content_root, mode, DateWarnings::default()),
            til: ContentLoader::new(loader_fs(), content_root, mode, DateWarnings::default()),
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Metadata of every valid post, newest first
    pub async fn post_metadata(&self) -> Result<Arc<Vec<PostMetadata>>> {
        self.posts.all().await
    }

    /// Markdown body of a post, `None` when no file has that slug
    pub async fn post_content(&self, slug: &str) -> Result<Option<Arc<str>>> {
        self.posts.body(slug).await
    }

    /// A post with its body. `None` if the file is missing or failed validation.
    pub async fn post(&self, slug: &str) -> Result<Option<Post>> {
        let posts = self.post_metadata().await?;
        let Some(meta) = posts.iter().find(|p| p.slug == slug).cloned() else {
            return Ok(None);
        };
        Ok(self
            .post_content(slug)
            .await?
            .map(|content| Post { meta, content }))
    }

    /// Posts carrying `tag` (case-insensitive), newest first
    pub async fn posts_by_tag(&self, tag: &str) -> Result<Vec<PostMetadata>> {
        let posts = self.post_metadata().await?;
        Ok(posts
            .iter()
            .filter(|p| has_tag(&p.tags, tag))
            .cloned()
            .collect())
    }

    /// Every post tag with its usage count, most used first
    pub async fn all_tags(&self) -> Result<Vec<(String, usize)>> {
        let posts = self.post_metadata().await?;
        Ok(count_tags(posts.iter().map(|p| p.tags.as_slice())))
    }

    /// Reading list ordered reading, queued, completed
    pub async fn reading_list(&self) -> Result<Arc<Vec<ReadingMetadata>>> {
        self.reading.all().await
    }

    pub async fn reading_by_status(&self, status: ReadingStatus) -> Result<Vec<ReadingMetadata>> {
        let items = self.reading_list().await?;
        Ok(items
            .iter()
            .filter(|item| item.status == status)
            .cloned()
            .collect())
    }

    /// Posts named in `item.related_posts` that actually exist
    pub async fn related_posts(&self, item: &ReadingMetadata) -> Result<Vec<PostMetadata>> {
        let posts = self.post_metadata().await?;
        Ok(resolve_related(&item.related_posts, &posts))
    }

    /// TIL entries, newest first
    pub async fn til_entries(&self) -> Result<Arc<Vec<TilEntry>>> {
        self.til.all().await
    }

    pub async fn til_by_tag(&self, tag: &str) -> Result<Vec<TilEntry>> {
        let entries = self.til_entries().await?;
        Ok(entries
            .iter()
            .filter(|e| has_tag(&e.tags, tag))
            .cloned()
            .collect())
    }

    /// Drop every cached scan and lookup
    pub fn clear_cache(&self) {
        self.posts.clear_cache();
        self.reading.clear_cache();
        self.til.clear_cache();
    }

    /// Files whose date was kept verbatim, as of each type's latest scan
    pub fn date_warnings(&self) -> usize {
        self.posts.date_warnings() + self.reading.date_warnings() + self.til.date_warnings()
    }

    /// Combined hit/miss counters of the three caches
    pub fn cache_stats(&self) -> CacheStats {
        [
            self.posts.cache_stats(),
            self.reading.cache_stats(),
            self.til.cache_stats(),
        ]
        .into_iter()
        .fold(CacheStats::default(), |acc, s| CacheStats {
            hits: acc.hits + s.hits,
            misses: acc.misses + s.misses,
        })
    }
}
