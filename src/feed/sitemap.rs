//! sitemap.xml generation

use super::text;
use crate::config::SiteConfig;
use crate::content::PostMetadata;
use crate::helpers::{full_url_for, normalize_date, post_url, sort_by_date};

/// Render a sitemap with the configured static pages followed by every post
pub fn generate_sitemap(config: &SiteConfig, posts: &[PostMetadata]) -> String {
    let posts = sort_by_date(posts);
    // Static pages change whenever something new is published
    let newest = posts.first().and_then(|p| normalize_date(&p.date));

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for page in &config.sitemap.static_pages {
        push_url(
            &mut xml,
            &full_url_for(config, &page.path),
            newest.as_deref(),
            &page.changefreq,
            page.priority,
        );
    }

    for post in &posts {
        push_url(
            &mut xml,
            &post_url(config, &post.slug),
            normalize_date(&post.date).as_deref(),
            &config.sitemap.post_changefreq,
            config.sitemap.post_priority,
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: Option<&str>, changefreq: &str, priority: f32) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", text(loc)));
    if let Some(lastmod) = lastmod {
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
    }
    xml.push_str(&format!("    <changefreq>{}</changefreq>\n", text(changefreq)));
    xml.push_str(&format!("    <priority>{:.1}</priority>\n", priority.clamp(0.0, 1.0)));
    xml.push_str("  </url>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticPage;
    use crate::feed::testing::{config, post};

    #[test]
    fn test_static_pages_then_posts() {
        let mut config = config();
        config.sitemap.static_pages = vec![StaticPage {
            path: "/".to_string(),
            changefreq: "weekly".to_string(),
            priority: 1.0,
        }];
        let posts = vec![
            post("older", "Older", "2025-01-05"),
            post("newer", "Newer", "2025-03-01"),
        ];

        let xml = generate_sitemap(&config, &posts);
        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.contains(
            "    <loc>https://jane.dev/</loc>\n    <lastmod>2025-03-01</lastmod>\n    <changefreq>weekly</changefreq>\n    <priority>1.0</priority>\n"
        ));
        assert!(xml.contains(
            "    <loc>https://jane.dev/blog/older</loc>\n    <lastmod>2025-01-05</lastmod>\n    <changefreq>monthly</changefreq>\n    <priority>0.7</priority>\n"
        ));
        assert!(xml.find("blog/newer") < xml.find("blog/older"));
    }

    #[test]
    fn test_unparseable_post_date_has_no_lastmod() {
        let mut config = config();
        config.sitemap.static_pages.clear();
        let xml = generate_sitemap(&config, &[post("x", "X", "soon")]);
        assert!(!xml.contains("<lastmod>"));
        assert!(xml.contains("<loc>https://jane.dev/blog/x</loc>"));
    }
}
