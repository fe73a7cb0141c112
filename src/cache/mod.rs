//! In-memory content cache
//!
//! Each loader owns one [`ContentCache`]. It holds two things: the full,
//! arranged metadata list from the last directory scan, and a map from slug
//! to body text where `None` records a lookup that found no file.
//!
//! A disabled cache (development mode) never stores anything, so every call
//! goes back to disk. There is no TTL and no file watching; [`ContentCache::clear`]
//! is the only way to drop entries.
//!
//! Locks are held only to copy an `Arc` in or out, never across an `.await`.
//! Two requests that miss at the same time both rescan and the second write
//! replaces the first with an equal value.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::Mode;

/// Body text for a slug, or `None` when no such file exists
pub type CachedBody = Option<Arc<str>>;

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Get summary for logging
    pub fn summary(&self) -> String {
        format!("{} hits, {} misses", self.hits, self.misses)
    }
}

/// Metadata list and per-slug bodies for one content type
#[derive(Debug)]
pub struct ContentCache<M> {
    enabled: bool,
    metadata: RwLock<Option<Arc<Vec<M>>>>,
    bodies: RwLock<HashMap<String, CachedBody>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<M> ContentCache<M> {
    /// Create a cache that is active outside development mode
    pub fn new(mode: Mode) -> Self {
        Self {
            enabled: !mode.is_development(),
            metadata: RwLock::new(None),
            bodies: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cached metadata list, if a scan has been stored
    pub fn metadata(&self) -> Option<Arc<Vec<M>>> {
        if !self.enabled {
            return None;
        }
        let cached = self
            .metadata
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        self.record(cached.is_some());
        cached
    }

    /// Store a fresh scan and hand it back shared
    pub fn store_metadata(&self, items: Vec<M>) -> Arc<Vec<M>> {
        let items = Arc::new(items);
        if self.enabled {
            *self
                .metadata
                .write()
                .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&items));
        }
        items
    }

    /// Cached body lookup. The outer `Option` is hit/miss, the inner one is
    /// found/not-found.
    pub fn body(&self, slug: &str) -> Option<CachedBody> {
        if !self.enabled {
            return None;
        }
        let cached = self
            .bodies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(slug)
            .cloned();
        self.record(cached.is_some());
        cached
    }

    /// Remember a body lookup result, including "not found"
    pub fn store_body(&self, slug: &str, body: CachedBody) {
        if !self.enabled {
            return;
        }
        self.bodies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(slug.to_string(), body);
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        *self
            .metadata
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        self.bodies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        tracing::debug!("Content cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn record(&self, hit: bool) {
        let counter = if hit { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}
