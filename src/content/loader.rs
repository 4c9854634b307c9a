//! Content loader - loads posts and pages from the site directory

use anyhow::{anyhow, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Page, Post};
use crate::helpers::absolute_url;
use crate::Jekyll;

/// Loads content from the site directory
pub struct ContentLoader<'a> {
    jekyll: &'a Jekyll,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(jekyll: &'a Jekyll) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &jekyll.config.highlight.theme,
            jekyll.config.highlight.line_number,
        );
        Self { jekyll, renderer }
    }

    /// Load all posts from `_posts` (and `_drafts` when enabled)
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        let mut dirs = vec![(self.jekyll.posts_dir.clone(), false)];
        if self.jekyll.config.render_drafts {
            dirs.push((
                self.jekyll.source_dir.join(&self.jekyll.config.drafts_dir),
                true,
            ));
        }

        let now = Utc::now().fixed_offset();
        for (dir, is_draft) in dirs {
            if !dir.exists() {
                continue;
            }
            for entry in WalkDir::new(&dir)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && is_markdown_file(path) {
                    match self.load_post(path, is_draft) {
                        Ok(post) => {
                            if !post.published && !self.jekyll.config.render_drafts {
                                continue;
                            }
                            if !self.jekyll.config.future && post.date > now {
                                tracing::debug!("Skipping future-dated post {:?}", path);
                                continue;
                            }
                            posts.push(post);
                        }
                        Err(e) => {
                            tracing::warn!("Failed to load post {:?}: {}", path, e);
                        }
                    }
                }
            }
        }

        // Newest first
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path, is_draft: bool) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let (filename_date, filename_slug) = split_post_filename(stem);

        // Front-matter date wins over the filename date; drafts without
        // either fall back to the file's modification time
        let date = fm
            .parse_date(self.jekyll.config.timezone)
            .or_else(|| filename_date.and_then(|d| resolve_midnight(d, self.jekyll.config.timezone)))
            .or_else(|| if is_draft { file_mtime(path) } else { None })
            .ok_or_else(|| anyhow!("post has no date (front-matter or filename)"))?;

        let slug = filename_slug
            .map(|s| s.to_string())
            .or_else(|| fm.title.as_deref().map(slug::slugify))
            .unwrap_or_else(|| stem.to_string());

        let source = path
            .strip_prefix(&self.jekyll.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let url = match &fm.permalink {
            Some(p) => ensure_leading_slash(p),
            None => self.expand_permalink(&date, &slug),
        };
        let permalink = absolute_url(&self.jekyll.config, &url);

        // Split excerpt and render markdown; without a separator the
        // excerpt equals the content byte for byte
        let (excerpt_md, full_md) =
            MarkdownRenderer::split_excerpt(body, &self.jekyll.config.excerpt_separator);
        let content_html = self.renderer.render(&full_md)?;
        let excerpt_html = match excerpt_md {
            Some(md) => self.renderer.render(&md)?,
            None => content_html.clone(),
        };

        let mut post = Post::new(date, source);
        post.title = fm.title;
        post.raw = body.to_string();
        post.content = content_html;
        post.excerpt = excerpt_html;
        post.tags = fm.tags;
        post.layout = fm
            .layout
            .unwrap_or_else(|| self.jekyll.config.default_layout.clone());
        post.tagline = fm.tagline;
        post.full_source = path.to_path_buf();
        post.url = url;
        post.permalink = permalink;
        post.published = fm.published;
        post.slug = slug;
        post.extra = fm.extra;

        Ok(post)
    }

    /// Load all pages (non-post markdown files)
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        let mut pages = Vec::new();

        for entry in WalkDir::new(&self.jekyll.source_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| !is_special_dir(e))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_page(path) {
                    Ok(page) => pages.push(page),
                    Err(e) => {
                        tracing::warn!("Failed to load page {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(pages)
    }

    /// Load a single page from a file
    fn load_page(&self, path: &Path) -> Result<Page> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let title = fm.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let date = fm
            .parse_date(self.jekyll.config.timezone)
            .unwrap_or_else(|| Utc::now().fixed_offset());

        let source = path
            .strip_prefix(&self.jekyll.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        // index.md maps to its parent directory, everything else to a
        // directory of its own
        let without_ext = source.trim_end_matches(".md").trim_end_matches(".markdown");
        let url = if without_ext == "index" || without_ext.ends_with("/index") {
            ensure_leading_slash(without_ext.trim_end_matches("index"))
        } else {
            ensure_leading_slash(&format!("{}/", without_ext))
        };
        let permalink = absolute_url(&self.jekyll.config, &url);

        let content_html = self.renderer.render(body)?;

        let mut page = Page::new(title, date, source);
        page.raw = body.to_string();
        page.content = content_html;
        page.layout = fm.layout.unwrap_or_else(|| "page".to_string());
        page.tagline = fm.tagline;
        page.full_source = path.to_path_buf();
        page.url = url;
        page.permalink = permalink;
        page.extra = fm.extra;

        Ok(page)
    }

    /// Expand the permalink pattern into a site-relative URL
    fn expand_permalink(&self, date: &DateTime<FixedOffset>, slug: &str) -> String {
        let expanded = self
            .jekyll
            .config
            .permalink
            .replace(":year", &date.format("%Y").to_string())
            .replace(":month", &date.format("%m").to_string())
            .replace(":day", &date.format("%d").to_string())
            .replace(":title", slug);

        ensure_leading_slash(&expanded)
    }
}

fn resolve_midnight(date: NaiveDate, tz: chrono_tz::Tz) -> Option<DateTime<FixedOffset>> {
    use chrono::TimeZone;
    tz.from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

fn file_mtime(path: &Path) -> Option<DateTime<FixedOffset>> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    Some(DateTime::<Utc>::from(modified).fixed_offset())
}

/// Split a Jekyll post filename stem into its date and slug parts
///
/// `2017-04-13-create-cmdlet` -> (2017-04-13, "create-cmdlet")
fn split_post_filename(stem: &str) -> (Option<NaiveDate>, Option<&str>) {
    if stem.len() > 11 && stem.is_char_boundary(10) {
        let (prefix, rest) = stem.split_at(10);
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            if let Some(slug) = rest.strip_prefix('-') {
                return (Some(date), Some(slug));
            }
        }
    }
    (None, Some(stem).filter(|s| !s.is_empty()))
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Skip underscore directories (_posts, _drafts, _site) and hidden files
fn is_special_dir(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('_') || s.starts_with('.'))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_post_filename() {
        let (date, slug) = split_post_filename("2017-04-13-create-cmdlet");
        assert_eq!(date, NaiveDate::from_ymd_opt(2017, 4, 13));
        assert_eq!(slug, Some("create-cmdlet"));
    }

    #[test]
    fn test_split_post_filename_without_date() {
        let (date, slug) = split_post_filename("about-me");
        assert_eq!(date, None);
        assert_eq!(slug, Some("about-me"));
    }

    #[test]
    fn test_loader_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("_posts");
        fs::create_dir_all(&posts_dir).unwrap();

        fs::write(
            posts_dir.join("2017-04-13-hello.md"),
            "---\ntitle: Hello\n---\nFull text here\n",
        )
        .unwrap();
        fs::write(
            posts_dir.join("2017-04-10-older.md"),
            "---\ntitle: Older\n---\nIntro.\n<!-- more -->\nThe rest.\n",
        )
        .unwrap();

        let jekyll = Jekyll::new(dir.path()).unwrap();
        let loader = ContentLoader::new(&jekyll);
        let posts = loader.load_posts().unwrap();

        assert_eq!(posts.len(), 2);
        // Newest first
        assert_eq!(posts[0].title.as_deref(), Some("Hello"));
        assert_eq!(posts[0].url, "/2017/04/13/hello/");
        // No separator: excerpt is identical to content
        assert_eq!(posts[0].excerpt, posts[0].content);
        // Separator: excerpt is a proper prefix rendering
        assert_ne!(posts[1].excerpt, posts[1].content);
        assert!(posts[1].excerpt.contains("Intro."));
        assert!(!posts[1].excerpt.contains("The rest."));
    }

    #[test]
    fn test_future_posts_hidden_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("_posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("2999-01-01-future.md"),
            "---\ntitle: Future\n---\nNot yet.\n",
        )
        .unwrap();

        let jekyll = Jekyll::new(dir.path()).unwrap();
        let posts = ContentLoader::new(&jekyll).load_posts().unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_post_without_date_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("_posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(posts_dir.join("undated.md"), "---\ntitle: X\n---\nBody\n").unwrap();

        let jekyll = Jekyll::new(dir.path()).unwrap();
        let loader = ContentLoader::new(&jekyll);
        let posts = loader.load_posts().unwrap();
        assert!(posts.is_empty());
    }
}
