//! Front-matter parsing

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserializer;
use serde_yaml::{Mapping, Value};

use crate::error::{ContentError, Result};

lazy_static! {
    /// `---` line, YAML block, `---` line
    static ref FRONT_MATTER: Regex =
        Regex::new(r"(?ms)\A---[ \t]*\r?\n(?P<yaml>.*?)^---[ \t]*\r?$\n?").unwrap();
    static ref OPENING: Regex = Regex::new(r"\A---[ \t]*\r?\n").unwrap();
}

/// A markdown document split into its YAML header and body
#[derive(Debug, Clone)]
pub struct Parsed<'a> {
    /// Header fields, empty when the file has no front-matter
    pub data: Mapping,
    /// Everything after the closing delimiter
    pub content: &'a str,
}

impl<'a> Parsed<'a> {
    /// Deserialize the header into a typed record
    pub fn deserialize<T: DeserializeOwned>(&self) -> std::result::Result<T, serde_yaml::Error> {
        serde_yaml::from_value(Value::Mapping(self.data.clone()))
    }
}

/// Split `raw` into front-matter and content.
///
/// A document that does not open with a `---` line has no front-matter and is
/// returned whole as content. An opened but unterminated block, YAML that
/// fails to parse, or a header that is not a mapping are errors.
pub fn parse(raw: &str) -> Result<Parsed<'_>> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some(caps) = FRONT_MATTER.captures(raw) else {
        if OPENING.is_match(raw) {
            return Err(ContentError::Unterminated);
        }
        return Ok(Parsed {
            data: Mapping::new(),
            content: raw,
        });
    };

    let yaml = caps.name("yaml").map(|m| m.as_str()).unwrap_or_default();
    let end = caps.get(0).map(|m| m.end()).unwrap_or_default();
    let content = raw[end..].trim_start_matches(['\n', '\r']);

    let data = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            other => return Err(ContentError::NotAMapping(kind_of(&other))),
        }
    };

    Ok(Parsed { data, content })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Accepts a single string, a list of strings, or nothing
pub(crate) fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<Value>()? {
                if let Some(s) = scalar_to_string(&item) {
                    vec.push(s);
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Accepts any YAML scalar as a string (`title: 2024` reads as `"2024"`)
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

/// Treat blank optional fields as absent
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
tags:
  - rust
  - blog
---

This is the content.
"#;

        let parsed = parse(content).unwrap();
        assert_eq!(
            parsed.data.get("title").and_then(Value::as_str),
            Some("Hello World")
        );
        assert_eq!(
            parsed.data.get("date").and_then(Value::as_str),
            Some("2024-01-15")
        );
        assert_eq!(parsed.content, "This is the content.\n");
    }

    #[test]
    fn test_no_frontmatter_returns_whole_text() {
        let parsed = parse("# Just markdown\n\nBody.").unwrap();
        assert!(parsed.data.is_empty());
        assert_eq!(parsed.content, "# Just markdown\n\nBody.");
    }

    #[test]
    fn test_empty_frontmatter() {
        let parsed = parse("---\n---\nBody").unwrap();
        assert!(parsed.data.is_empty());
        assert_eq!(parsed.content, "Body");
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = parse("---\r\ntitle: Windows\r\n---\r\nBody\r\n").unwrap();
        assert_eq!(
            parsed.data.get("title").and_then(Value::as_str),
            Some("Windows")
        );
        assert_eq!(parsed.content, "Body\r\n");
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        assert!(matches!(parse(content), Err(ContentError::Yaml(_))));
    }

    #[test]
    fn test_scalar_header_is_error() {
        let content = "---\njust a sentence\n---\nBody";
        assert!(matches!(
            parse(content),
            Err(ContentError::NotAMapping("a string"))
        ));
    }

    #[test]
    fn test_unterminated_is_error() {
        let content = "---\ntitle: Never closed\n\nBody";
        assert!(matches!(parse(content), Err(ContentError::Unterminated)));
    }

    #[test]
    fn test_horizontal_rule_in_body_is_kept() {
        let content = "---\ntitle: Rules\n---\nAbove\n\n---\n\nBelow\n";
        let parsed = parse(content).unwrap();
        assert!(parsed.content.contains("Above"));
        assert!(parsed.content.contains("Below"));
    }

    #[test]
    fn test_deserialize_single_string_tags() {
        #[derive(serde::Deserialize)]
        struct Tags {
            #[serde(deserialize_with = "string_or_vec", default)]
            tags: Vec<String>,
            #[serde(deserialize_with = "scalar_string", default)]
            title: Option<String>,
        }

        let parsed = parse("---\ntitle: 2024\ntags: notes\n---\n").unwrap();
        let tags: Tags = parsed.deserialize().unwrap();
        assert_eq!(tags.tags, vec!["notes"]);
        assert_eq!(tags.title.as_deref(), Some("2024"));
    }
}
