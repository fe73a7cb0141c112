//! "Today I Learned" entries

use serde::{Deserialize, Serialize};

use super::frontmatter::{scalar_string, string_or_vec, Parsed};
use super::loader::{ContentKind, DateWarnings, Validation};
use crate::helpers::Dated;

/// A short TIL note; unlike posts the body travels with the metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilEntry {
    pub slug: String,
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Markdown body, trimmed
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TilFrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    date: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    tags: Vec<String>,
}

impl Dated for TilEntry {
    fn date(&self) -> &str {
        &self.date
    }
}

impl ContentKind for TilEntry {
    const KIND: &'static str = "TIL entry";
    const DIR: &'static str = "til";

    fn validate(slug: &str, doc: &Parsed<'_>, dates: &DateWarnings) -> Validation<Self> {
        let fm: TilFrontMatter = match doc.deserialize() {
            Ok(fm) => fm,
            Err(e) => return Validation::Invalid(format!("unexpected front-matter shape: {}", e)),
        };

        let Some(date) = fm.date.filter(|d| !d.trim().is_empty()) else {
            return Validation::Invalid("missing required field `date`".to_string());
        };
        let Some(title) = fm.title.filter(|t| !t.trim().is_empty()) else {
            return Validation::Invalid("missing required field `title`".to_string());
        };

        Validation::Valid(TilEntry {
            slug: slug.to_string(),
            date: dates.normalize(slug, &date),
            title,
            tags: fm.tags,
            content: doc.content.trim().to_string(),
        })
    }
}
