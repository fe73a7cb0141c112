//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::{ContentKind, PostMetadata, ReadingMetadata, TilEntry};

const DEFAULT_CONFIG: &str = r#"# inkfolio configuration

# Site
title: My Portfolio
description: ''
author: John Doe
email: ''
language: en
# IANA name, e.g. Europe/Berlin. Empty means UTC.
timezone: ''

# URL
url: http://example.com
root: /
blog_dir: blog

# Directory
content_dir: content
public_dir: public

# production caches every scan; development re-reads on each call
mode: production

feed:
  limit: 0
  rss_path: rss.xml
  atom_path: atom.xml

sitemap:
  path: sitemap.xml
  post_changefreq: monthly
  post_priority: 0.7
  static_pages:
    - { path: /, changefreq: weekly, priority: 1.0 }
    - { path: /about, changefreq: monthly, priority: 0.8 }
    - { path: /projects, changefreq: monthly, priority: 0.8 }
    - { path: /services, changefreq: monthly, priority: 0.7 }
    - { path: /blog, changefreq: weekly, priority: 0.9 }
    - { path: /til, changefreq: weekly, priority: 0.7 }
    - { path: /reading, changefreq: weekly, priority: 0.6 }
    - { path: /resources, changefreq: monthly, priority: 0.5 }
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let content_dir = target_dir.join("content");
    for dir in [PostMetadata::DIR, ReadingMetadata::DIR, TilEntry::DIR] {
        fs::create_dir_all(content_dir.join(dir))?;
    }

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, DEFAULT_CONFIG)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_init_creates_layout() {
        let tmp = tempfile::tempdir().unwrap();
        init_site(tmp.path()).unwrap();

        for dir in ["posts", "reading", "til"] {
            assert!(tmp.path().join("content").join(dir).is_dir());
        }
        let config = SiteConfig::load(tmp.path().join("_config.yml")).unwrap();
        assert_eq!(config.sitemap.static_pages.len(), 8);
        assert_eq!(config.feed.atom_path, "atom.xml");
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(tmp.path()).unwrap();
        let config = SiteConfig::load(tmp.path().join("_config.yml")).unwrap();
        assert_eq!(config.title, "Mine");
    }
}
