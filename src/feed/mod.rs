//! Feed generation - RSS 2.0, Atom 1.0 and sitemap XML
//!
//! Pure string builders: they take post metadata and the site configuration
//! and never touch the disk. Posts are re-sorted newest first regardless of
//! the order they arrive in.

mod atom;
mod rss;
mod sitemap;

pub use atom::generate_atom;
pub use rss::generate_rss;
pub use sitemap::generate_sitemap;

use crate::config::SiteConfig;
use crate::content::PostMetadata;
use crate::helpers::{escape_xml, sort_by_date, strip_invalid_xml_chars};

pub const RSS_CONTENT_TYPE: &str = "application/xml; charset=utf-8";
pub const ATOM_CONTENT_TYPE: &str = "application/atom+xml; charset=utf-8";
pub const SITEMAP_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Escape user-supplied text for an XML text node or attribute
fn text(s: &str) -> String {
    escape_xml(&strip_invalid_xml_chars(s))
}

/// Posts newest first, capped at the configured feed size
fn feed_posts(config: &SiteConfig, posts: &[PostMetadata]) -> Vec<PostMetadata> {
    let mut sorted = sort_by_date(posts);
    if config.feed.limit > 0 {
        sorted.truncate(config.feed.limit);
    }
    sorted
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::config::SiteConfig;
    use crate::content::PostMetadata;

    pub fn config() -> SiteConfig {
        SiteConfig {
            title: "Jane's Notes".to_string(),
            description: "Writing about systems".to_string(),
            author: "Jane Doe".to_string(),
            url: "https://jane.dev".to_string(),
            ..Default::default()
        }
    }

    pub fn post(slug: &str, title: &str, date: &str) -> PostMetadata {
        PostMetadata {
            title: title.to_string(),
            date: date.to_string(),
            slug: slug.to_string(),
            subtitle: None,
            tags: Vec::new(),
            author: None,
            reading_time: Some(1),
            cover_image: None,
        }
    }

    /// Inverse of `escape_xml`, for asserting on generated documents
    pub fn unescape(s: &str) -> String {
        s.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&")
    }

    /// Text between the first `<tag>` and `</tag>` after `from`
    pub fn element<'a>(xml: &'a str, tag: &str, from: usize) -> Option<&'a str> {
        let open = format!("<{}>", tag);
        let close = format!("</{}>", tag);
        let start = xml[from..].find(&open)? + from + open.len();
        let end = xml[start..].find(&close)? + start;
        Some(&xml[start..end])
    }
}
