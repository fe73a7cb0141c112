//! Blog post model

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::frontmatter::{non_empty, scalar_string, string_or_vec, Parsed};
use super::loader::{ContentKind, DateWarnings, Validation};
use crate::helpers::{reading_time, Dated};

/// Metadata of a blog post, as listed on the index and in feeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    pub title: String,

    /// `YYYY-MM-DD` when the source date parsed, the raw string otherwise
    pub date: String,

    /// File name without `.md`
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Estimated minutes to read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// A post together with its markdown body
#[derive(Debug, Clone)]
pub struct Post {
    pub meta: PostMetadata,
    pub content: Arc<str>,
}

/// Post front-matter as written by the author
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PostFrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    subtitle: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    author: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    tags: Vec<String>,
    cover_image: Option<String>,
}

impl Dated for PostMetadata {
    fn date(&self) -> &str {
        &self.date
    }
}

impl ContentKind for PostMetadata {
    const KIND: &'static str = "post";
    const DIR: &'static str = "posts";

    fn validate(slug: &str, doc: &Parsed<'_>, dates: &DateWarnings) -> Validation<Self> {
        let fm: PostFrontMatter = match doc.deserialize() {
            Ok(fm) => fm,
            Err(e) => return Validation::Invalid(format!("unexpected front-matter shape: {}", e)),
        };

        let Some(title) = fm.title.filter(|t| !t.trim().is_empty()) else {
            return Validation::Invalid("missing required field `title`".to_string());
        };
        let Some(date) = fm.date.filter(|d| !d.trim().is_empty()) else {
            return Validation::Invalid("missing required field `date`".to_string());
        };

        Validation::Valid(PostMetadata {
            title,
            date: dates.normalize(slug, &date),
            slug: slug.to_string(),
            subtitle: non_empty(fm.subtitle),
            tags: fm.tags,
            author: non_empty(fm.author),
            reading_time: Some(reading_time(doc.content)),
            cover_image: non_empty(fm.cover_image),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::frontmatter::parse;

    fn validate(raw: &str) -> Validation<PostMetadata> {
        let doc = parse(raw).unwrap();
        PostMetadata::validate("hello-world", &doc, &DateWarnings::default())
    }

    #[test]
    fn test_valid_post() {
        let raw = "---\ntitle: Hello\ndate: 2025/6/1\nsubtitle: First\ntags: [rust, web]\ncoverImage: /img/a.png\n---\nSome words here.";
        let Validation::Valid(post) = validate(raw) else {
            panic!("post should be valid");
        };
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.date, "2025-06-01");
        assert_eq!(post.subtitle.as_deref(), Some("First"));
        assert_eq!(post.tags, vec!["rust", "web"]);
        assert_eq!(post.cover_image.as_deref(), Some("/img/a.png"));
        assert_eq!(post.reading_time, Some(1));
    }

    #[test]
    fn test_missing_title_is_invalid() {
        let result = validate("---\ndate: 2025-06-01\n---\nBody");
        assert!(matches!(result, Validation::Invalid(reason) if reason.contains("title")));
    }

    #[test]
    fn test_missing_date_is_invalid() {
        let result = validate("---\ntitle: No date\n---\nBody");
        assert!(matches!(result, Validation::Invalid(reason) if reason.contains("date")));
    }

    #[test]
    fn test_wrong_shape_is_invalid() {
        let result = validate("---\ntitle: Hi\ndate: 2025-06-01\ncoverImage: [a, b]\n---\n");
        assert!(matches!(result, Validation::Invalid(_)));
    }

    #[test]
    fn test_unparseable_date_passes_through() {
        let dates = DateWarnings::default();
        let doc = parse("---\ntitle: Later\ndate: sometime soon\n---\n").unwrap();
        let Validation::Valid(post) = PostMetadata::validate("later", &doc, &dates) else {
            panic!("post should be valid");
        };
        assert_eq!(post.date, "sometime soon");
        assert_eq!(dates.count(), 1);
    }

    #[test]
    fn test_serializes_camel_case() {
        let doc = parse("---\ntitle: T\ndate: 2025-06-01\n---\nword").unwrap();
        let Validation::Valid(post) =
            PostMetadata::validate("t", &doc, &DateWarnings::default())
        else {
            panic!("post should be valid");
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["readingTime"], 1);
        assert!(json.get("coverImage").is_none());
    }
}
