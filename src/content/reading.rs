//! Reading list model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::frontmatter::{non_empty, scalar_string, string_or_vec, Parsed};
use super::loader::{ContentKind, DateWarnings, Validation};
use crate::helpers::{sort_by_date_mut, Dated};

/// Kind of material on the reading list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingCategory {
    Book,
    Article,
    Paper,
    Blog,
}

/// Where an item stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingStatus {
    Reading,
    Completed,
    Queued,
}

impl ReadingStatus {
    /// Display order on the reading page: current reads, then the queue, then finished
    pub fn priority(self) -> u8 {
        match self {
            ReadingStatus::Reading => 0,
            ReadingStatus::Queued => 1,
            ReadingStatus::Completed => 2,
        }
    }
}

impl FromStr for ReadingCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "book" => Ok(Self::Book),
            "article" => Ok(Self::Article),
            "paper" => Ok(Self::Paper),
            "blog" => Ok(Self::Blog),
            other => Err(format!(
                "unknown category {:?} (expected book, article, paper or blog)",
                other
            )),
        }
    }
}

impl FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reading" => Ok(Self::Reading),
            "completed" => Ok(Self::Completed),
            "queued" => Ok(Self::Queued),
            other => Err(format!(
                "unknown status {:?} (expected reading, completed or queued)",
                other
            )),
        }
    }
}

impl fmt::Display for ReadingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Book => "book",
            Self::Article => "article",
            Self::Paper => "paper",
            Self::Blog => "blog",
        })
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reading => "reading",
            Self::Completed => "completed",
            Self::Queued => "queued",
        })
    }
}

/// An item on the reading list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingMetadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub slug: String,
    pub category: ReadingCategory,
    pub status: ReadingStatus,
    /// Empty when the item has no date
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amazon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// 1 to 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Slugs of blog posts; may name posts that no longer exist
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_posts: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ReadingFrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    author: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    category: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    status: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    date: Option<String>,
    cover_image: Option<String>,
    url: Option<String>,
    amazon_url: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    notes: Option<String>,
    rating: Option<i64>,
    #[serde(deserialize_with = "string_or_vec")]
    tags: Vec<String>,
    #[serde(deserialize_with = "string_or_vec")]
    related_posts: Vec<String>,
}

impl Dated for ReadingMetadata {
    fn date(&self) -> &str {
        &self.date
    }
}

impl ContentKind for ReadingMetadata {
    const KIND: &'static str = "reading item";
    const DIR: &'static str = "reading";

    fn validate(slug: &str, doc: &Parsed<'_>, dates: &DateWarnings) -> Validation<Self> {
        let fm: ReadingFrontMatter = match doc.deserialize() {
            Ok(fm) => fm,
            Err(e) => return Validation::Invalid(format!("unexpected front-matter shape: {}", e)),
        };

        let Some(title) = fm.title.filter(|t| !t.trim().is_empty()) else {
            return Validation::Invalid("missing required field `title`".to_string());
        };
        let category = match fm.category.as_deref().map(str::parse::<ReadingCategory>) {
            Some(Ok(category)) => category,
            Some(Err(reason)) => return Validation::Invalid(reason),
            None => return Validation::Invalid("missing required field `category`".to_string()),
        };
        let status = match fm.status.as_deref().map(str::parse::<ReadingStatus>) {
            Some(Ok(status)) => status,
            Some(Err(reason)) => return Validation::Invalid(reason),
            None => return Validation::Invalid("missing required field `status`".to_string()),
        };
        let rating = match fm.rating {
            None => None,
            Some(r @ 1..=5) => Some(r as u8),
            Some(r) => return Validation::Invalid(format!("rating {} is outside 1-5", r)),
        };
        let date = fm
            .date
            .filter(|d| !d.trim().is_empty())
            .map(|d| dates.normalize(slug, &d))
            .unwrap_or_default();

        Validation::Valid(ReadingMetadata {
            title,
            author: non_empty(fm.author),
            slug: slug.to_string(),
            category,
            status,
            date,
            cover_image: non_empty(fm.cover_image),
            url: non_empty(fm.url),
            amazon_url: non_empty(fm.amazon_url),
            notes: non_empty(fm.notes),
            rating,
            tags: fm.tags,
            related_posts: fm.related_posts,
        })
    }

    /// Newest first inside each status group
    fn arrange(items: &mut [Self]) {
        sort_by_date_mut(items);
        sort_by_status(items);
    }
}

/// Order by status priority; within a status keep the incoming order
pub fn sort_by_status(items: &mut [ReadingMetadata]) {
    items.sort_by_key(|item| item.status.priority());
}
