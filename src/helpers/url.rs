//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/rss.xml") // -> "/rss.xml"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about") // -> "https://example.com/about"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Public URL of a blog post
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    full_url_for(
        config,
        &format!("{}/{}", config.blog_dir.trim_matches('/'), encode_segment(slug)),
    )
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            root: "/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/rss.xml"), "/rss.xml");
        assert_eq!(url_for(&config, ""), "/");
    }

    #[test]
    fn test_url_for_with_subdirectory_root() {
        let config = SiteConfig {
            root: "/site/".to_string(),
            ..test_config()
        };
        assert_eq!(url_for(&config, "about"), "/site/about");
        assert_eq!(
            full_url_for(&config, "/about"),
            "https://example.com/site/about"
        );
    }

    #[test]
    fn test_post_url() {
        let config = test_config();
        assert_eq!(
            post_url(&config, "hello-world"),
            "https://example.com/blog/hello-world"
        );
        assert_eq!(
            post_url(&config, "what is #1?"),
            "https://example.com/blog/what%20is%20%231%3F"
        );
    }
}
