//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Default site configuration written by `init`
const DEFAULT_CONFIG: &str = r#"# Site
title: My Blog
tagline: ''
description: ''
author: John Doe
timezone: UTC

# URL
url: http://example.com
root: /
permalink: /:year/:month/:day/:title/

# Writing
excerpt_separator: '<!-- more -->'
render_drafts: false
future: false

# Date format (strftime)
date_format: '%m-%d-%Y'

# Home page
front_page:
  offset: 0
  limit: 3
"#;

const WELCOME_POST: &str = r#"---
layout: post
title: Welcome
tagline: A first post
---
This is your first post. Everything above the separator becomes the
excerpt shown on the front page.

<!-- more -->

Everything below it is only visible on the post page itself.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("_posts"))?;
    fs::create_dir_all(target_dir.join("_drafts"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("site already initialized: {:?} exists", config_path);
    }
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let today = chrono::Utc::now().format("%Y-%m-%d");
    fs::write(
        target_dir.join(format!("_posts/{}-welcome.md", today)),
        WELCOME_POST,
    )?;

    tracing::info!("Initialized site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_buildable_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());
        assert!(dir.path().join("_posts").is_dir());

        let jekyll = crate::Jekyll::new(dir.path()).unwrap();
        jekyll.generate().unwrap();
        let index = fs::read_to_string(jekyll.public_dir.join("index.html")).unwrap();
        assert!(index.contains("Welcome"));
        assert!(index.contains("Read more..."));
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
