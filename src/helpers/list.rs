//! Sorting, grouping and tag helpers over content lists

use indexmap::IndexMap;
use std::collections::HashMap;

use super::date::{month_label, parse_date};
use crate::content::PostMetadata;

/// Anything carrying a front-matter date
pub trait Dated {
    fn date(&self) -> &str;
}

/// Sort newest first without touching the input.
///
/// Unparseable dates sort after every valid one.
pub fn sort_by_date<T: Dated + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sort_by_date_mut(&mut sorted);
    sorted
}

/// In-place variant of [`sort_by_date`]
pub fn sort_by_date_mut<T: Dated>(items: &mut [T]) {
    items.sort_by_cached_key(|item| std::cmp::Reverse(parse_date(item.date())));
}

/// Bucket entries under a "Month Year" label.
///
/// Keys keep the order in which they are first seen, so a date-sorted input
/// yields months newest first.
pub fn group_entries_by_month<T: Dated + Clone>(entries: &[T]) -> IndexMap<String, Vec<T>> {
    let mut groups: IndexMap<String, Vec<T>> = IndexMap::new();
    for entry in entries {
        groups
            .entry(month_label(entry.date()))
            .or_default()
            .push(entry.clone());
    }
    groups
}

/// Count tag usage, most used first, ties broken by name
pub fn count_tags<'a, I>(tag_lists: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tags in tag_lists {
        for tag in tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut sorted: Vec<_> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

/// Case-insensitive tag match
pub fn has_tag(tags: &[String], tag: &str) -> bool {
    tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Resolve slugs against the post list, dropping the ones that don't exist
pub fn resolve_related(slugs: &[String], posts: &[PostMetadata]) -> Vec<PostMetadata> {
    posts
        .iter()
        .filter(|post| slugs.iter().any(|s| s == &post.slug))
        .cloned()
        .collect()
}
