//! HTML and XML escaping helpers

/// Escape the five XML special characters
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for HTML bodies and attributes
pub fn html_escape(s: &str) -> String {
    escape_xml(s).replace("&apos;", "&#39;")
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
/// XML 1.0 only allows: #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
pub fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

/// `<link rel="alternate">` tag announcing a feed
pub fn feed_tag(href: &str, title: &str, mime: &str) -> String {
    format!(
        r#"<link rel="alternate" href="{}" title="{}" type="{}">"#,
        html_escape(href),
        html_escape(title),
        mime
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"Tom & "Jerry" <'cat'>"#),
            "Tom &amp; &quot;Jerry&quot; &lt;&apos;cat&apos;&gt;"
        );
    }

    #[test]
    fn test_html_escape_uses_numeric_apostrophe() {
        assert_eq!(html_escape("it's"), "it&#39;s");
    }

    #[test]
    fn test_strip_invalid_xml_chars() {
        assert_eq!(strip_invalid_xml_chars("a\u{0}b\u{1b}c\n"), "abc\n");
    }

    #[test]
    fn test_feed_tag() {
        assert_eq!(
            feed_tag("/rss.xml", "Blog", "application/rss+xml"),
            r#"<link rel="alternate" href="/rss.xml" title="Blog" type="application/rss+xml">"#
        );
    }
}
