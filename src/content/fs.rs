//! File-system access for content loaders
//!
//! Loaders only touch the disk through [`ContentFs`], so the directory scan
//! and per-slug reads can be observed (and counted) in tests.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Asynchronous view of the content directories
#[async_trait]
pub trait ContentFs: Send + Sync + 'static {
    /// Create `dir` (and parents) when missing. Returns `true` if it was created.
    async fn ensure_dir(&self, dir: &Path) -> io::Result<bool>;

    /// File names of the regular files directly inside `dir`
    async fn list_files(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Read a whole file as UTF-8
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The real file system, backed by `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

#[async_trait]
impl ContentFs for DiskFs {
    async fn ensure_dir(&self, dir: &Path) -> io::Result<bool> {
        if tokio::fs::try_exists(dir).await? {
            return Ok(false);
        }
        tokio::fs::create_dir_all(dir).await?;
        Ok(true)
    }

    async fn list_files(&self, dir: &Path) -> io::Result<Vec<String>> {
        let dir: PathBuf = dir.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let mut names = Vec::new();
            let walker = WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true);
            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    // The directory itself failed; nothing to list
                    Err(e) if e.depth() == 0 => return Err(io::Error::other(e)),
                    Err(e) => {
                        tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                        continue;
                    }
                };
                if entry.file_type().is_file() {
                    if let Some(name) = entry.file_name().to_str() {
                        names.push(name.to_string());
                    }
                }
            }
            Ok(names)
        })
        .await
        .map_err(io::Error::other)?
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory file system that counts every access

    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct MemoryFs {
        files: Mutex<BTreeMap<PathBuf, String>>,
        dirs: Mutex<BTreeSet<PathBuf>>,
        reads: AtomicUsize,
        listings: AtomicUsize,
    }

    impl MemoryFs {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&self, path: impl Into<PathBuf>, contents: &str) {
            let path = path.into();
            if let Some(parent) = path.parent() {
                self.dirs.lock().unwrap().insert(parent.to_path_buf());
            }
            self.files.lock().unwrap().insert(path, contents.to_string());
        }

        pub fn has_dir(&self, dir: &Path) -> bool {
            self.dirs.lock().unwrap().contains(dir)
        }

        pub fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        pub fn listings(&self) -> usize {
            self.listings.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContentFs for MemoryFs {
        async fn ensure_dir(&self, dir: &Path) -> io::Result<bool> {
            Ok(self.dirs.lock().unwrap().insert(dir.to_path_buf()))
        }

        async fn list_files(&self, dir: &Path) -> io::Result<Vec<String>> {
            self.listings.fetch_add(1, Ordering::SeqCst);
            if !self.has_dir(dir) {
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
            Ok(self
                .files
                .lock()
                .unwrap()
                .keys()
                .filter(|p| p.parent() == Some(dir))
                .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
                .collect())
        }

        async fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
    }
}
