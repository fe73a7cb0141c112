//! Site configuration (_config.yml)

use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::helpers::parse_timezone;

/// Environment variable that forces development mode when set to `development`
pub const ENV_VAR: &str = "INKFOLIO_ENV";

/// Whether loader results are memoized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Cache every scan and lookup for the life of the process
    #[default]
    Production,
    /// Re-read the content directories on every call
    Development,
}

impl Mode {
    pub fn is_development(self) -> bool {
        self == Mode::Development
    }

    /// Mode requested through [`ENV_VAR`], if any
    pub fn from_env() -> Option<Self> {
        match std::env::var(ENV_VAR).ok()?.to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Mode::Development),
            "production" | "prod" => Some(Mode::Production),
            _ => None,
        }
    }
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub email: String,
    pub language: String,
    pub timezone: String,

    // URL
    pub url: String,
    pub root: String,
    pub blog_dir: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    pub mode: Mode,

    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Portfolio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            email: String::new(),
            language: "en".to_string(),
            timezone: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            blog_dir: "blog".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            mode: Mode::Production,

            feed: FeedConfig::default(),
            sitemap: SitemapConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Timezone used to place content dates on the timeline
    pub fn tz(&self) -> Tz {
        parse_timezone(&self.timezone)
    }
}

/// RSS / Atom feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Maximum number of items, 0 for all posts
    pub limit: usize,
    pub rss_path: String,
    pub atom_path: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            limit: 0,
            rss_path: "rss.xml".to_string(),
            atom_path: "atom.xml".to_string(),
        }
    }
}

/// Sitemap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub path: String,
    pub static_pages: Vec<StaticPage>,
    pub post_changefreq: String,
    pub post_priority: f32,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        let page = |path: &str, changefreq: &str, priority: f32| StaticPage {
            path: path.to_string(),
            changefreq: changefreq.to_string(),
            priority,
        };
        Self {
            path: "sitemap.xml".to_string(),
            static_pages: vec![
                page("/", "weekly", 1.0),
                page("/about", "monthly", 0.8),
                page("/projects", "monthly", 0.8),
                page("/services", "monthly", 0.7),
                page("/blog", "weekly", 0.9),
                page("/til", "weekly", 0.7),
                page("/reading", "weekly", 0.6),
                page("/resources", "monthly", 0.5),
            ],
            post_changefreq: "monthly".to_string(),
            post_priority: 0.7,
        }
    }
}

/// A page that exists independently of the content directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPage {
    pub path: String,
    #[serde(default = "default_changefreq")]
    pub changefreq: String,
    #[serde(default = "default_priority")]
    pub priority: f32,
}

fn default_changefreq() -> String {
    "monthly".to_string()
}

fn default_priority() -> f32 {
    0.5
}
