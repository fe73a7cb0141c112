//! Atom 1.0 feed

use chrono::Utc;

use super::{feed_posts, text};
use crate::config::SiteConfig;
use crate::content::PostMetadata;
use crate::helpers::{full_url_for, iso8601, post_url, ISO8601_FORMAT};

/// Render an Atom 1.0 document for `posts`
pub fn generate_atom(config: &SiteConfig, posts: &[PostMetadata]) -> String {
    let tz = config.tz();
    let posts = feed_posts(config, posts);
    let site_url = full_url_for(config, "/");
    let self_url = full_url_for(config, &config.feed.atom_path);

    let mut feed = String::new();
    feed.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
    feed.push_str(&format!("  <title>{}</title>\n", text(&config.title)));
    if !config.description.is_empty() {
        feed.push_str(&format!(
            "  <subtitle>{}</subtitle>\n",
            text(&config.description)
        ));
    }
    feed.push_str(&format!(
        "  <link href=\"{}\" rel=\"self\"/>\n",
        text(&self_url)
    ));
    feed.push_str(&format!("  <link href=\"{}\"/>\n", text(&site_url)));
    feed.push_str(&format!("  <id>{}</id>\n", text(&site_url)));
    // Atom requires a feed-level <updated>, even with no entries
    let updated = match posts.first() {
        Some(newest) => iso8601(&newest.date, tz),
        None => Utc::now().format(ISO8601_FORMAT).to_string(),
    };
    feed.push_str(&format!("  <updated>{}</updated>\n", updated));
    feed.push_str(&format!(
        "  <author><name>{}</name></author>\n",
        text(&config.author)
    ));

    for post in &posts {
        let link = post_url(config, &post.slug);
        let summary = post.subtitle.as_deref().unwrap_or(&post.title);

        feed.push_str("  <entry>\n");
        feed.push_str(&format!("    <title>{}</title>\n", text(&post.title)));
        feed.push_str(&format!("    <link href=\"{}\"/>\n", text(&link)));
        feed.push_str(&format!("    <id>{}</id>\n", text(&link)));
        feed.push_str(&format!(
            "    <updated>{}</updated>\n",
            iso8601(&post.date, tz)
        ));
        feed.push_str(&format!("    <summary>{}</summary>\n", text(summary)));
        for tag in &post.tags {
            feed.push_str(&format!("    <category term=\"{}\"/>\n", text(tag)));
        }
        if let Some(author) = &post.author {
            feed.push_str(&format!(
                "    <author><name>{}</name></author>\n",
                text(author)
            ));
        }
        feed.push_str("  </entry>\n");
    }

    feed.push_str("</feed>\n");
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::testing::{config, element, post, unescape};

    #[test]
    fn test_entries_and_timestamps() {
        let mut p = post("hello", "Hello", "2025-06-01");
        p.tags = vec!["c++".to_string()];
        let posts = vec![p, post("later", "Later", "2025-06-10")];

        let xml = generate_atom(&config(), &posts);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<feed"));
        assert!(xml.contains("  <updated>2025-06-10T00:00:00.000Z</updated>\n"));
        assert!(xml.contains("<link href=\"https://jane.dev/atom.xml\" rel=\"self\"/>"));
        assert!(xml.contains("<id>https://jane.dev/blog/hello</id>"));
        assert!(xml.contains("<updated>2025-06-01T00:00:00.000Z</updated>"));
        assert!(xml.contains("<category term=\"c++\"/>"));
        assert!(xml.find("<title>Later</title>") < xml.find("<title>Hello</title>"));
    }

    #[test]
    fn test_empty_feed_still_has_updated() {
        let xml = generate_atom(&config(), &[]);
        let updated = element(&xml, "updated", 0).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(updated).is_ok());
        assert_eq!(xml.matches("<updated>").count(), 1);
        assert!(!xml.contains("<entry>"));
    }

    #[test]
    fn test_site_timezone_shifts_updated() {
        let mut config = config();
        config.timezone = "Asia/Tokyo".to_string();
        let xml = generate_atom(&config, &[post("a", "A", "2025-06-01")]);
        assert!(xml.contains("<updated>2025-05-31T15:00:00.000Z</updated>"));
    }

    #[test]
    fn test_title_escaping_round_trips() {
        let title = "<script>alert('x') && \"y\"</script>";
        let xml = generate_atom(&config(), &[post("x", title, "2025-06-01")]);
        let entry = xml.find("<entry>").unwrap();
        let raw = element(&xml, "title", entry).unwrap();
        assert_eq!(unescape(raw), title);
    }
}
