//! Write feeds and sitemap into the public directory

use anyhow::Result;
use std::path::Path;

use crate::feed;
use crate::Site;

/// Render RSS, Atom and the sitemap from the current posts
pub async fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = site.store.post_metadata().await?;
    let reading = site.store.reading_list().await?;
    let til = site.store.til_entries().await?;
    tracing::info!(
        "Loaded {} posts, {} reading items and {} TIL entries",
        posts.len(),
        reading.len(),
        til.len()
    );

    let config = &site.config;
    let outputs = [
        (&config.feed.rss_path, feed::generate_rss(config, &posts)),
        (&config.feed.atom_path, feed::generate_atom(config, &posts)),
        (&config.sitemap.path, feed::generate_sitemap(config, &posts)),
    ];
    for (path, xml) in outputs {
        write_file(&site.public_dir, path, &xml).await?;
    }

    let warnings = site.store.date_warnings();
    if warnings > 0 {
        tracing::warn!("{} content dates could not be parsed and were kept as written", warnings);
    }
    tracing::debug!("Cache: {}", site.store.cache_stats().summary());

    let duration = start.elapsed();
    tracing::info!("Built in {:.2}s", duration.as_secs_f64());

    Ok(())
}

async fn write_file(public_dir: &Path, rel: &str, contents: &str) -> Result<()> {
    let target = public_dir.join(rel.trim_start_matches('/'));
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&target, contents).await?;
    tracing::debug!("Wrote {:?}", target);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::SiteConfig;
    use crate::Site;
    use std::fs;

    #[tokio::test]
    async fn test_build_writes_feeds() {
        let tmp = tempfile::tempdir().unwrap();
        let posts = tmp.path().join("content").join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("first.md"),
            "---\ntitle: First & Best\ndate: 2025-06-01\n---\nHello.",
        )
        .unwrap();

        let site = Site::with_config(tmp.path(), SiteConfig::default());
        site.build().await.unwrap();

        let public = tmp.path().join("public");
        let rss = fs::read_to_string(public.join("rss.xml")).unwrap();
        assert!(rss.contains("<title>First &amp; Best</title>"));
        assert!(public.join("atom.xml").is_file());
        let sitemap = fs::read_to_string(public.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("/blog/first</loc>"));
    }

    #[tokio::test]
    async fn test_build_on_empty_site_creates_content_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let site = Site::with_config(tmp.path(), SiteConfig::default());
        site.build().await.unwrap();

        for dir in ["posts", "reading", "til"] {
            assert!(tmp.path().join("content").join(dir).is_dir());
        }
        assert!(tmp.path().join("public").join("rss.xml").is_file());
    }

    #[tokio::test]
    async fn test_build_honors_nested_output_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.feed.atom_path = "feeds/atom.xml".to_string();
        let site = Site::with_config(tmp.path(), config);
        site.build().await.unwrap();
        assert!(tmp.path().join("public/feeds/atom.xml").is_file());
    }
}
