//! List site content

use anyhow::Result;
use clap::ValueEnum;
use std::fmt::Write;

use crate::content::resource::{favorite_resources, resources_by_category, sample_resources};
use crate::content::ResourceCategory;
use crate::helpers::{group_entries_by_month, truncate_words};
use crate::Site;

/// Maximum characters of a TIL body shown per line
const TIL_PREVIEW: usize = 60;

/// What to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    #[value(alias = "post")]
    Posts,
    Reading,
    Til,
    #[value(alias = "tag")]
    Tags,
    #[value(alias = "resource")]
    Resources,
}

/// Print the listing to stdout
pub async fn run(site: &Site, kind: ListKind) -> Result<()> {
    print!("{}", render(site, kind).await?);
    Ok(())
}

/// Build the listing text
pub async fn render(site: &Site, kind: ListKind) -> Result<String> {
    let mut out = String::new();

    match kind {
        ListKind::Posts => {
            let posts = site.store.post_metadata().await?;
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in posts.iter() {
                let minutes = post.reading_time.unwrap_or(1);
                writeln!(
                    out,
                    "  {} - {} [{}] {} min",
                    post.date, post.title, post.slug, minutes
                )?;
            }
        }
        ListKind::Reading => {
            let items = site.store.reading_list().await?;
            writeln!(out, "Reading ({}):", items.len())?;
            for item in items.iter() {
                let by = item
                    .author
                    .as_deref()
                    .map(|a| format!(" by {}", a))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "  [{}] {}{} ({})",
                    item.status, item.title, by, item.category
                )?;
                for post in site.store.related_posts(item).await? {
                    writeln!(out, "      -> {}", post.title)?;
                }
            }
        }
        ListKind::Til => {
            let entries = site.store.til_entries().await?;
            writeln!(out, "TIL ({}):", entries.len())?;
            for (month, group) in group_entries_by_month(&entries) {
                writeln!(out, "  {}", month)?;
                for entry in group {
                    writeln!(
                        out,
                        "    {} - {}: {}",
                        entry.date,
                        entry.title,
                        truncate_words(&entry.content, TIL_PREVIEW)
                    )?;
                }
            }
        }
        ListKind::Tags => {
            let tags = site.store.all_tags().await?;
            writeln!(out, "Tags ({}):", tags.len())?;
            for (tag, count) in tags {
                writeln!(out, "  {} ({})", tag, count)?;
            }
        }
        ListKind::Resources => {
            let resources = sample_resources();
            writeln!(
                out,
                "Resources ({}, {} favorites):",
                resources.len(),
                favorite_resources(&resources).len()
            )?;
            for category in ResourceCategory::ALL {
                let in_category = resources_by_category(&resources, category);
                if in_category.is_empty() {
                    continue;
                }
                writeln!(out, "  {}", category.label())?;
                for resource in in_category {
                    let star = if resource.favorite { "*" } else { " " };
                    writeln!(out, "   {} {} <{}>", star, resource.title, resource.url)?;
                }
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;

    fn site_with_content() -> (tempfile::TempDir, Site) {
        let tmp = tempfile::tempdir().unwrap();
        let content = tmp.path().join("content");
        for dir in ["posts", "reading", "til"] {
            fs::create_dir_all(content.join(dir)).unwrap();
        }
        fs::write(
            content.join("posts/rust-async.md"),
            "---\ntitle: Async Rust\ndate: 2025-06-10\ntags: [rust, async]\n---\nBody.",
        )
        .unwrap();
        fs::write(
            content.join("posts/old.md"),
            "---\ntitle: Older\ndate: 2025-06-01\ntags: rust\n---\nBody.",
        )
        .unwrap();
        fs::write(
            content.join("reading/tokio.md"),
            "---\ntitle: Tokio Book\ncategory: book\nstatus: reading\nrelatedPosts: [rust-async, gone]\n---\n",
        )
        .unwrap();
        fs::write(
            content.join("til/one.md"),
            "---\ndate: 2025-06-01\ntitle: One\n---\nFirst thing.",
        )
        .unwrap();
        fs::write(
            content.join("til/two.md"),
            "---\ndate: 2025-06-15\ntitle: Two\n---\nSecond thing.",
        )
        .unwrap();

        let site = Site::with_config(tmp.path(), SiteConfig::default());
        (tmp, site)
    }

    #[tokio::test]
    async fn test_list_posts_newest_first() {
        let (_tmp, site) = site_with_content();
        let out = render(&site, ListKind::Posts).await.unwrap();
        assert!(out.starts_with("Posts (2):"));
        let newer = out.find("Async Rust").unwrap();
        let older = out.find("Older").unwrap();
        assert!(newer < older);
    }

    #[tokio::test]
    async fn test_list_reading_resolves_related() {
        let (_tmp, site) = site_with_content();
        let out = render(&site, ListKind::Reading).await.unwrap();
        assert!(out.contains("[reading] Tokio Book (book)"));
        assert!(out.contains("-> Async Rust"));
        assert!(!out.contains("gone"));
    }

    #[tokio::test]
    async fn test_list_til_grouped_by_month() {
        let (_tmp, site) = site_with_content();
        let out = render(&site, ListKind::Til).await.unwrap();
        assert_eq!(out.matches("June 2025").count(), 1);
        assert!(out.find("Two").unwrap() < out.find("One").unwrap());
    }

    #[tokio::test]
    async fn test_list_tags_with_counts() {
        let (_tmp, site) = site_with_content();
        let out = render(&site, ListKind::Tags).await.unwrap();
        assert!(out.contains("  rust (2)"));
        assert!(out.contains("  async (1)"));
    }

    #[tokio::test]
    async fn test_list_resources_by_category() {
        let (_tmp, site) = site_with_content();
        let out = render(&site, ListKind::Resources).await.unwrap();
        assert!(out.starts_with("Resources ("));
        assert!(out.contains("<https://"));
    }
}
