//! inkfolio: markdown content pipeline for a portfolio and blog
//!
//! Blog posts, a reading list and a "Today I Learned" log are kept as
//! markdown files with YAML front-matter. This crate scans them into typed,
//! cached records and turns the post list into RSS, Atom and sitemap XML.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod helpers;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Mode, SiteConfig};
use content::ContentStore;

/// A site on disk: configuration, directories and the content store
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Root of `posts/`, `reading/` and `til/`
    pub content_dir: PathBuf,
    /// Output directory for generated files
    pub public_dir: PathBuf,
    /// Cached loaders, shared by every request
    pub store: Arc<ContentStore>,
}

impl Site {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            SiteConfig::default()
        };
        if let Some(mode) = Mode::from_env() {
            config.mode = mode;
        }

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let store = Arc::new(ContentStore::open(&content_dir, config.mode));

        tracing::debug!(
            "Site at {:?} ({:?} mode, content in {:?})",
            base_dir,
            config.mode,
            content_dir
        );

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            store,
        }
    }

    /// Same site, different cache mode
    pub fn with_mode(self, mode: Mode) -> Self {
        if self.config.mode == mode {
            return self;
        }
        let mut config = self.config;
        config.mode = mode;
        Self::with_config(self.base_dir, config)
    }

    /// RSS 2.0 feed of the current posts
    pub async fn rss(&self) -> Result<String> {
        let posts = self.store.post_metadata().await?;
        Ok(feed::generate_rss(&self.config, &posts))
    }

    /// Atom 1.0 feed of the current posts
    pub async fn atom(&self) -> Result<String> {
        let posts = self.store.post_metadata().await?;
        Ok(feed::generate_atom(&self.config, &posts))
    }

    /// Sitemap of static pages and posts
    pub async fn sitemap(&self) -> Result<String> {
        let posts = self.store.post_metadata().await?;
        Ok(feed::generate_sitemap(&self.config, &posts))
    }

    /// Write feeds and sitemap into the public directory
    pub async fn build(&self) -> Result<()> {
        commands::build::run(self).await
    }
}
