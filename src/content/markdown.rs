//! Markdown rendering

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Markdown to HTML renderer used for post pages
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    /// Add `target="_blank" rel="noopener"` to absolute links
    external_links_new_tab: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom settings
    pub fn with_options(external_links_new_tab: bool) -> Self {
        Self {
            external_links_new_tab,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is split off before rendering, so no metadata blocks
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        if self.external_links_new_tab {
            html::push_html(&mut html_output, parser.map(open_external_in_new_tab));
        } else {
            html::push_html(&mut html_output, parser);
        }
        html_output
    }
}

fn open_external_in_new_tab(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::Link {
            ref dest_url,
            ref title,
            ..
        }) if dest_url.starts_with("http://") || dest_url.starts_with("https://") => {
            let title_attr = if title.is_empty() {
                String::new()
            } else {
                format!(r#" title="{}""#, crate::helpers::html_escape(title))
            };
            Event::Html(CowStr::from(format!(
                r#"<a href="{}"{} target="_blank" rel="noopener">"#,
                crate::helpers::html_escape(dest_url),
                title_attr
            )))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        let html = MarkdownRenderer::new().render("# Title\n\nSome *emphasis*.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_render_code_block_language_class() {
        let html = MarkdownRenderer::new().render("```rust\nfn main() {}\n```\n");
        assert!(html.contains(r#"<code class="language-rust">"#));
    }

    #[test]
    fn test_external_links() {
        let md = "[out](https://example.com) and [in](/about)";
        let html = MarkdownRenderer::with_options(true).render(md);
        assert!(html.contains(r#"<a href="https://example.com" target="_blank" rel="noopener">out</a>"#));
        assert!(html.contains(r#"<a href="/about">in</a>"#));
    }
}
