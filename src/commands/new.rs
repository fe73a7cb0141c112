//! Create a new post, TIL entry or reading item

use anyhow::Result;
use clap::ValueEnum;
use std::fs;
use std::path::PathBuf;

use crate::content::loader::is_safe_slug;
use crate::content::{ContentKind, PostMetadata, ReadingMetadata, TilEntry};
use crate::Site;

/// What kind of file to scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NewKind {
    Post,
    Til,
    Reading,
}

impl NewKind {
    fn dir(self) -> &'static str {
        match self {
            NewKind::Post => PostMetadata::DIR,
            NewKind::Til => TilEntry::DIR,
            NewKind::Reading => ReadingMetadata::DIR,
        }
    }

    fn scaffold(self, title: &str, date: &str) -> String {
        let title = yaml_string(title);
        match self {
            NewKind::Post => format!(
                "---\ntitle: {title}\ndate: {date}\nsubtitle: ''\ntags: []\n---\n\n"
            ),
            NewKind::Til => format!("---\ndate: {date}\ntitle: {title}\ntags: []\n---\n\n"),
            NewKind::Reading => format!(
                "---\ntitle: {title}\nauthor: ''\ncategory: book\nstatus: queued\ndate: {date}\ntags: []\nrelatedPosts: []\n---\n\n"
            ),
        }
    }
}

/// Quote a scalar so titles with `:` or `#` stay valid YAML
fn yaml_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Create the file, refusing to overwrite. Returns its path.
pub fn create(site: &Site, kind: NewKind, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }
    if !is_safe_slug(&slug) {
        anyhow::bail!(
            "Invalid slug {:?}: it must name a file directly inside the content directory",
            slug
        );
    }

    let dir = site.content_dir.join(kind.dir());
    fs::create_dir_all(&dir)?;

    let file_path = dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    fs::write(&file_path, kind.scaffold(title, &date))?;

    tracing::info!("Created {:?}", file_path);
    Ok(file_path)
}
