//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub author: String,
    /// IANA timezone name; naive front-matter dates are resolved in this zone
    pub timezone: chrono_tz::Tz,

    // URL
    /// Scheme and host, e.g. "https://example.com"
    pub url: String,
    /// Base path prefix prepended to post links, e.g. "/" or "/blog/"
    pub root: String,
    pub permalink: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub posts_dir: String,
    pub drafts_dir: String,

    // Writing
    pub new_post_name: String,
    pub default_layout: String,
    pub render_drafts: bool,
    /// Whether to publish posts dated in the future
    pub future: bool,
    /// Marker that splits a post into excerpt and remainder
    pub excerpt_separator: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Date / Time format (strftime)
    pub date_format: String,

    // Home page
    #[serde(default)]
    pub front_page: FrontPageConfig,

    /// Label for the link revealing content beyond the excerpt
    pub read_more_text: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Jekyll".to_string(),
            tagline: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            timezone: chrono_tz::UTC,

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            permalink: "/:year/:month/:day/:title/".to_string(),

            source_dir: ".".to_string(),
            public_dir: "_site".to_string(),
            posts_dir: "_posts".to_string(),
            drafts_dir: "_drafts".to_string(),

            new_post_name: ":year-:month-:day-:title.md".to_string(),
            default_layout: "post".to_string(),
            render_drafts: false,
            future: false,
            excerpt_separator: "<!-- more -->".to_string(),
            highlight: HighlightConfig::default(),

            date_format: "%m-%d-%Y".to_string(),

            front_page: FrontPageConfig::default(),

            read_more_text: "Read more...".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {:?}", path))?;
        Ok(config)
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Home page listing configuration
///
/// The front page shows the sub-sequence `[offset, offset + limit)` of the
/// reverse-chronological post collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontPageConfig {
    pub offset: usize,
    pub limit: usize,
}

impl Default for FrontPageConfig {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Jekyll");
        assert_eq!(config.root, "/");
        assert_eq!(config.date_format, "%m-%d-%Y");
        assert_eq!(config.front_page.offset, 0);
        assert_eq!(config.front_page.limit, 3);
        assert_eq!(config.timezone, chrono_tz::UTC);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
root: /blog/
timezone: America/New_York
front_page:
  limit: 5
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.root, "/blog/");
        assert_eq!(config.timezone, chrono_tz::America::New_York);
        assert_eq!(config.front_page.limit, 5);
        assert_eq!(config.front_page.offset, 0);
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let yaml = r#"
title: My Blog
github_username: someone
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.extra.contains_key("github_username"));
    }
}
