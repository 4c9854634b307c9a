//! Front-matter parsing

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Front-matter parsing errors
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("unterminated front-matter block (missing closing ---)")]
    Unterminated,

    #[error("invalid front-matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
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

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value
                .split_whitespace()
                .map(|s| s.to_string())
                .collect())
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a post or page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub layout: Option<String>,
    pub tagline: Option<String>,
    pub permalink: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    /// Posts are published unless the front-matter opts out
    #[serde(default = "default_published")]
    pub published: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

fn default_published() -> bool {
    true
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            date: None,
            layout: None,
            tagline: None,
            permalink: None,
            tags: Vec::new(),
            // Content without front-matter is published content
            published: true,
            extra: HashMap::new(),
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string
    ///
    /// Returns (front_matter, remaining_content). Content without a leading
    /// `---` fence has no front-matter and parses to defaults.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let trimmed = content.trim_start();
        let Some(rest) = trimmed.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            return Err(FrontMatterError::Unterminated);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)?;
        Ok((fm, remaining))
    }

    /// Resolve the date string in the given timezone
    pub fn parse_date(&self, tz: chrono_tz::Tz) -> Option<DateTime<FixedOffset>> {
        self.date.as_ref().and_then(|s| parse_date_string(s, tz))
    }
}

/// Parse a date string in the formats Jekyll front-matter commonly uses
///
/// Naive dates and datetimes are interpreted in the site timezone; strings
/// carrying their own offset keep it.
pub fn parse_date_string(s: &str, tz: chrono_tz::Tz) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return resolve_local(dt, tz);
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return resolve_local(d.and_hms_opt(0, 0, 0)?, tz);
    }

    None
}

fn resolve_local(dt: NaiveDateTime, tz: chrono_tz::Tz) -> Option<DateTime<FixedOffset>> {
    tz.from_local_datetime(&dt)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
layout: post
title: Hello World
date: 2017-04-13 10:30:00
tagline: Supporting tagline
tags: [powershell, internals]
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.layout, Some("post".to_string()));
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.tagline, Some("Supporting tagline".to_string()));
        assert_eq!(fm.tags, vec!["powershell", "internals"]);
        assert!(fm.published);
        assert!(remaining.contains("This is the content."));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just some markdown.\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_missing_title_stays_absent() {
        let content = "---\nlayout: post\ndate: 2017-04-13\n---\nBody.\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let content = "---\ntitle: Broken\n";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::Unterminated)
        ));
    }

    #[test]
    fn test_space_separated_tags() {
        let content = "---\ntags: powershell reflection\n---\nBody.\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["powershell", "reflection"]);
    }

    #[test]
    fn test_parse_date_in_timezone() {
        let fm = FrontMatter {
            date: Some("2017-04-13 10:30:00".to_string()),
            ..Default::default()
        };

        let dt = fm.parse_date(chrono_tz::UTC).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2017-04-13 10:30");

        let dt = fm.parse_date(chrono_tz::America::New_York).unwrap();
        // 10:30 EDT is 14:30 UTC
        assert_eq!(
            dt.with_timezone(&chrono::Utc)
                .format("%H:%M")
                .to_string(),
            "14:30"
        );
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_date_string("2017-04-13", chrono_tz::UTC).unwrap();
        assert_eq!(dt.format("%m-%d-%Y").to_string(), "04-13-2017");
    }
}
