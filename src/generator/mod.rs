//! Generator module - produces the static site from loaded content

use anyhow::{Context as _, Result};
use chrono::Datelike;
use std::fs;
use std::path::PathBuf;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{Page, Post};
use crate::helpers::{format_date, url_for};
use crate::render;
use crate::templates::{NavPost, PageFront, SiteData, TemplateRenderer};
use crate::Jekyll;

/// Static site generator using the embedded classic theme
pub struct Generator {
    jekyll: Jekyll,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(jekyll: &Jekyll) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            jekyll: jekyll.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &[Post], pages: &[Page]) -> Result<()> {
        fs::create_dir_all(&self.jekyll.public_dir)?;

        self.write_theme_assets()?;
        self.copy_source_assets()?;

        // The loader already sorts newest-first; keep the snapshot sorted
        // even if a caller hands posts in another order
        let mut sorted_posts: Vec<_> = posts.to_vec();
        sorted_posts.sort_by(|a, b| b.date.cmp(&a.date));

        let site_data = self.build_site_data();

        self.generate_index(&sorted_posts, &site_data)?;
        self.generate_post_pages(&sorted_posts, &site_data)?;
        self.generate_page_pages(pages, &site_data)?;
        self.generate_manifest(&sorted_posts)?;

        Ok(())
    }

    /// Build site-wide template data
    fn build_site_data(&self) -> SiteData {
        let config = &self.jekyll.config;
        SiteData {
            title: config.title.clone(),
            tagline: config.tagline.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.clone(),
            root: config.root.clone(),
        }
    }

    /// Create a base context with common variables
    fn base_context(&self, site_data: &SiteData) -> Context {
        let mut context = Context::new();
        context.insert("site", site_data);
        context.insert(
            "css_url",
            &url_for(&self.jekyll.config, "/css/style.css"),
        );
        context.insert(
            "current_year",
            &chrono::Utc::now().year().to_string(),
        );
        context
    }

    /// Generate the home page
    ///
    /// The body is the preview listing for the configured window of the
    /// post collection, wrapped in the site layout.
    fn generate_index(&self, posts: &[Post], site_data: &SiteData) -> Result<()> {
        let config = &self.jekyll.config;
        let body = render::post_list(
            config,
            posts,
            config.front_page.offset,
            config.front_page.limit,
        );

        let front = PageFront {
            title: None,
            tagline: Some(config.tagline.clone()).filter(|t| !t.is_empty()),
        };
        let html = self
            .renderer
            .render_layout(&body, &front, self.base_context(site_data))?;

        let output_path = self.jekyll.public_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::info!("Generated home page ({} previews)", posts.len().min(config.front_page.limit));

        Ok(())
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, posts: &[Post], site_data: &SiteData) -> Result<()> {
        let config = &self.jekyll.config;

        for post in posts {
            let mut context = self.base_context(site_data);
            if let Some(title) = post.title.as_deref().filter(|t| !t.is_empty()) {
                context.insert("page_title", title);
            }
            context.insert("page_date", &format_date(&post.date, &config.date_format));
            if let Some(tagline) = &post.tagline {
                context.insert("page_tagline", tagline);
            }
            context.insert("page_content", &post.content);

            if let Some(prev) = post.prev(posts) {
                context.insert("prev_post", &nav_post(config, prev));
            }
            if let Some(next) = post.next(posts) {
                context.insert("next_post", &nav_post(config, next));
            }

            // Front-matter layout resolution: anything other than the post
            // layout gets the plain page chrome
            let html = if post.layout == "post" {
                self.renderer.render("post.html", &context)?
            } else {
                let front = PageFront {
                    title: post.title.clone().filter(|t| !t.is_empty()),
                    tagline: post.tagline.clone(),
                };
                self.renderer
                    .render_layout(&post.content, &front, self.base_context(site_data))?
            };
            let output_path = self.output_path(&post.url);
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create dir {:?}", parent))?;
            }
            fs::write(&output_path, &html)
                .with_context(|| format!("failed to write {:?}", output_path))?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        tracing::info!("Generated {} post pages", posts.len());
        Ok(())
    }

    /// Generate standalone pages
    fn generate_page_pages(&self, pages: &[Page], site_data: &SiteData) -> Result<()> {
        for page in pages {
            if page.url == "/" {
                tracing::warn!(
                    "Skipping {:?}: the front page is generated from the post listing",
                    page.source
                );
                continue;
            }

            let html = if page.layout == "post" {
                let mut context = self.base_context(site_data);
                context.insert("page_title", &page.title);
                context.insert(
                    "page_date",
                    &format_date(&page.date, &self.jekyll.config.date_format),
                );
                if let Some(tagline) = &page.tagline {
                    context.insert("page_tagline", tagline);
                }
                context.insert("page_content", &page.content);
                self.renderer.render("post.html", &context)?
            } else {
                let front = PageFront {
                    title: Some(page.title.clone()),
                    tagline: page.tagline.clone(),
                };
                self.renderer
                    .render_layout(&page.content, &front, self.base_context(site_data))?
            };

            let output_path = self.output_path(&page.url);
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
            tracing::debug!("Generated page: {:?}", output_path);
        }

        Ok(())
    }

    /// Write a JSON manifest of the post collection
    fn generate_manifest(&self, posts: &[Post]) -> Result<()> {
        let config = &self.jekyll.config;
        let entries: Vec<serde_json::Value> = posts
            .iter()
            .map(|p| {
                serde_json::json!({
                    "title": p.title,
                    "url": url_for(config, &p.url),
                    "permalink": p.permalink,
                    "date": p.date.format("%Y-%m-%d").to_string(),
                })
            })
            .collect();

        let output_path = self.jekyll.public_dir.join("posts.json");
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&output_path, json)?;
        tracing::info!("Generated posts.json");

        Ok(())
    }

    /// Write the embedded theme stylesheet
    fn write_theme_assets(&self) -> Result<()> {
        let css_dir = self.jekyll.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(
            css_dir.join("style.css"),
            include_str!("../templates/classic/style.css"),
        )?;
        Ok(())
    }

    /// Copy non-markdown source assets (images, etc.) to the public directory
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.jekyll.source_dir;

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || e.file_name()
                        .to_str()
                        .map(|s| !s.starts_with('_') && !s.starts_with('.'))
                        .unwrap_or(false)
            })
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("markdown") | Some("yml")) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            let dest = self.jekyll.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
        }

        Ok(())
    }

    /// Map a site-relative URL to its output file
    fn output_path(&self, url: &str) -> PathBuf {
        let clean = url.trim_start_matches('/');
        if url.ends_with('/') || clean.is_empty() {
            self.jekyll.public_dir.join(clean).join("index.html")
        } else if clean.ends_with(".html") {
            self.jekyll.public_dir.join(clean)
        } else {
            self.jekyll.public_dir.join(format!("{}.html", clean))
        }
    }
}

fn nav_post(config: &crate::config::SiteConfig, post: &Post) -> NavPost {
    NavPost {
        title: post
            .title
            .clone()
            .unwrap_or_else(|| post.slug.clone()),
        url: url_for(config, &post.url),
    }
}
