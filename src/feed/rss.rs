//! RSS 2.0 feed

use super::{feed_posts, text};
use crate::config::SiteConfig;
use crate::content::PostMetadata;
use crate::helpers::{full_url_for, post_url, rfc1123};

/// Render an RSS 2.0 document for `posts`
pub fn generate_rss(config: &SiteConfig, posts: &[PostMetadata]) -> String {
    let tz = config.tz();
    let posts = feed_posts(config, posts);
    let site_url = full_url_for(config, "/");
    let self_url = full_url_for(config, &config.feed.rss_path);

    let mut feed = String::new();
    feed.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    feed.push_str("<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n");
    feed.push_str("  <channel>\n");
    feed.push_str(&format!("    <title>{}</title>\n", text(&config.title)));
    feed.push_str(&format!("    <link>{}</link>\n", text(&site_url)));
    feed.push_str(&format!(
        "    <description>{}</description>\n",
        text(&config.description)
    ));
    feed.push_str(&format!("    <language>{}</language>\n", text(&config.language)));
    if let Some(newest) = posts.first() {
        feed.push_str(&format!(
            "    <lastBuildDate>{}</lastBuildDate>\n",
            rfc1123(&newest.date, tz)
        ));
    }
    feed.push_str(&format!(
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
        text(&self_url)
    ));

    for post in &posts {
        let link = post_url(config, &post.slug);
        let description = post.subtitle.as_deref().unwrap_or(&post.title);

        feed.push_str("    <item>\n");
        feed.push_str(&format!("      <title>{}</title>\n", text(&post.title)));
        feed.push_str(&format!("      <link>{}</link>\n", text(&link)));
        feed.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            text(&link)
        ));
        feed.push_str(&format!(
            "      <pubDate>{}</pubDate>\n",
            rfc1123(&post.date, tz)
        ));
        feed.push_str(&format!(
            "      <description>{}</description>\n",
            text(description)
        ));
        for tag in &post.tags {
            feed.push_str(&format!("      <category>{}</category>\n", text(tag)));
        }
        if let Some(author) = &post.author {
            feed.push_str(&format!("      <author>{}</author>\n", text(author)));
        }
        feed.push_str("    </item>\n");
    }

    feed.push_str("  </channel>\n");
    feed.push_str("</rss>\n");
    feed
}
