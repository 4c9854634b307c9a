//! Post and Page models

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A blog post
///
/// Posts are read-only records from the renderers' point of view: the
/// loader builds them once per pass and nothing mutates them afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post title; absent or empty titles suppress the heading block
    pub title: Option<String>,

    /// Publication date, resolved in the site timezone
    pub date: DateTime<FixedOffset>,

    /// Raw markdown content
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Rendered HTML excerpt; identical to `content` when the source has
    /// no excerpt separator
    pub excerpt: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Layout template to use
    pub layout: String,

    /// Optional tagline shown under the title
    pub tagline: Option<String>,

    /// Source file path (relative)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Site-relative URL path (leading slash, without the root prefix)
    pub url: String,

    /// Full permalink URL
    pub permalink: String,

    /// Whether the post is published
    pub published: bool,

    /// Slug (URL-friendly name)
    pub slug: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(date: DateTime<FixedOffset>, source: String) -> Self {
        Self {
            title: None,
            date,
            raw: String::new(),
            content: String::new(),
            excerpt: String::new(),
            tags: Vec::new(),
            layout: "post".to_string(),
            tagline: None,
            source: source.clone(),
            full_source: PathBuf::from(&source),
            url: String::new(),
            permalink: String::new(),
            published: true,
            slug: String::new(),
            extra: HashMap::new(),
        }
    }

    /// Get the previous (older) post in a newest-first list
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.source == self.source)?;
        posts.get(pos + 1)
    }

    /// Get the next (newer) post in a newest-first list
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.source == self.source)?;
        if pos > 0 {
            posts.get(pos - 1)
        } else {
            None
        }
    }
}

/// A standalone page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page title
    pub title: String,

    /// Creation date
    pub date: DateTime<FixedOffset>,

    /// Raw markdown content
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Layout template to use
    pub layout: String,

    /// Optional tagline shown under the title
    pub tagline: Option<String>,

    /// Source file path (relative)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Site-relative URL path
    pub url: String,

    /// Full permalink URL
    pub permalink: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Page {
    /// Create a new page with minimal required fields
    pub fn new(title: String, date: DateTime<FixedOffset>, source: String) -> Self {
        Self {
            title,
            date,
            raw: String::new(),
            content: String::new(),
            layout: "page".to_string(),
            tagline: None,
            source: source.clone(),
            full_source: PathBuf::from(&source),
            url: String::new(),
            permalink: String::new(),
            extra: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post_at(day: u32, source: &str) -> Post {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2017, 4, day, 0, 0, 0)
            .unwrap();
        Post::new(date, source.to_string())
    }

    #[test]
    fn test_prev_next_navigation() {
        // Newest first, matching the loader's ordering
        let posts = vec![post_at(13, "c.md"), post_at(10, "b.md"), post_at(1, "a.md")];

        assert_eq!(posts[1].prev(&posts).unwrap().source, "a.md");
        assert_eq!(posts[1].next(&posts).unwrap().source, "c.md");
        assert!(posts[0].next(&posts).is_none());
        assert!(posts[2].prev(&posts).is_none());
    }
}
