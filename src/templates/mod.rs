//! Built-in "classic" theme templates using the Tera template engine
//!
//! The theme provides the shared page chrome around content the rest of
//! the crate has already rendered to HTML. All templates are embedded in
//! the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with the embedded classic theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all classic templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // The inputs are already HTML; autoescaping would mangle them
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("classic/layout.html")),
            ("post.html", include_str!("classic/post.html")),
            (
                "partials/head.html",
                include_str!("classic/partials/head.html"),
            ),
            (
                "partials/header.html",
                include_str!("classic/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("classic/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Wrap an already-rendered body fragment in the site chrome
    ///
    /// This is the seam the generator hands page front-matter through:
    /// the layout consumes `title` and `tagline`, the body goes in as-is.
    pub fn render_layout(
        &self,
        content: &str,
        front: &PageFront,
        mut context: Context,
    ) -> Result<String> {
        if let Some(title) = front.title.as_deref().filter(|t| !t.is_empty()) {
            context.insert("page_title", title);
        }
        if let Some(tagline) = &front.tagline {
            context.insert("page_tagline", tagline);
        }
        context.insert("content", content);
        self.render("layout.html", &context)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(crate::helpers::strip_html(&s)))
}

/// Tera filter: reformat a YYYY-MM-DD date string with a strftime pattern
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let pattern = match args.get("pattern") {
        Some(val) => tera::try_get_value!("date_format", "pattern", String, val),
        None => "%m-%d-%Y".to_string(),
    };

    if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(tera::Value::String(date.format(&pattern).to_string()));
    }

    Ok(tera::Value::String(s))
}

/// Data structures for template context

/// Front-matter fields the layout consumes
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageFront {
    pub title: Option<String>,
    pub tagline: Option<String>,
}

/// Site-wide values available to every template
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub root: String,
}

/// Adjacent-post navigation entry
#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub url: String,
}
