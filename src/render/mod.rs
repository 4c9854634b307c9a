//! Post preview rendering
//!
//! Builds the HTML fragments for the home page listing: a linked heading
//! with the publish date, the excerpt, and a read-more link when the
//! excerpt does not cover the whole content. The fragments are pure
//! functions of the post snapshot and the site configuration; nothing here
//! touches the filesystem or mutates the collection.

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{format_date, html_escape, url_for};

/// Render the preview fragment for a single post
///
/// With no post at hand the heading and date are omitted entirely but the
/// excerpt block is still emitted, empty. A missing or empty title also
/// suppresses the heading block while keeping the excerpt. The read-more
/// link appears only when the excerpt differs from the full content.
pub fn post_preview(config: &SiteConfig, post: Option<&Post>) -> String {
    let mut html = String::from("<article class=\"post-preview\">\n");

    if let Some(post) = post {
        if let Some(title) = post.title.as_deref().filter(|t| !t.is_empty()) {
            let href = url_for(config, &post.url);
            html.push_str(&format!(
                "  <h2 class=\"post-title\"><a href=\"{}\">{}</a></h2>\n",
                href,
                html_escape(title)
            ));
            html.push_str(&format!(
                "  <p class=\"post-date\">Published: {}</p>\n",
                format_date(&post.date, &config.date_format)
            ));
        }
    }

    html.push_str("  <div class=\"post-excerpt\">");
    if let Some(post) = post {
        html.push_str(&post.excerpt);
    }
    html.push_str("</div>\n");

    if let Some(post) = post {
        if post.excerpt != post.content {
            html.push_str(&format!(
                "  <a class=\"read-more\" href=\"{}\">{}</a>\n",
                url_for(config, &post.url),
                html_escape(&config.read_more_text)
            ));
        }
    }

    html.push_str("</article>\n");
    html
}

/// Render previews for the posts in `[offset, offset + limit)`
///
/// The collection is iterated in its existing order; a collection shorter
/// than `offset + limit` simply stops at its end.
pub fn post_list(config: &SiteConfig, posts: &[Post], offset: usize, limit: usize) -> String {
    let mut html = String::new();
    for post in posts.iter().skip(offset).take(limit) {
        html.push_str(&post_preview(config, Some(post)));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn sample_post(title: Option<&str>, excerpt: &str, content: &str) -> Post {
        let date = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2017, 4, 13, 0, 0, 0)
            .unwrap();
        let mut post = Post::new(date, "2017-04-13-hello.md".to_string());
        post.title = title.map(|t| t.to_string());
        post.url = "/hello/".to_string();
        post.content = content.to_string();
        post.excerpt = excerpt.to_string();
        post
    }

    #[test]
    fn test_preview_without_read_more() {
        let config = SiteConfig::default();
        let post = sample_post(Some("Hello"), "Full text here", "Full text here");
        let html = post_preview(&config, Some(&post));

        assert!(html.contains(r#"<a href="/hello/">Hello</a>"#));
        assert!(html.contains("Published: 04-13-2017"));
        assert!(html.contains("Full text here"));
        assert!(!html.contains("Read more"));
    }

    #[test]
    fn test_preview_with_read_more() {
        let config = SiteConfig::default();
        let post = sample_post(Some("Hello"), "Full...", "Full text here");
        let html = post_preview(&config, Some(&post));

        assert!(html.contains("Full..."));
        assert!(html.contains(r#"<a class="read-more" href="/hello/">Read more...</a>"#));
    }

    #[test]
    fn test_read_more_respects_root_prefix() {
        let config = SiteConfig {
            root: "/blog/".to_string(),
            ..Default::default()
        };
        let post = sample_post(Some("Hello"), "Intro", "Intro and more");
        let html = post_preview(&config, Some(&post));

        assert!(html.contains(r#"href="/blog/hello/""#));
    }

    #[test]
    fn test_preview_without_title_keeps_excerpt() {
        let config = SiteConfig::default();
        for title in [None, Some("")] {
            let post = sample_post(title, "The excerpt.", "The excerpt. And more.");
            let html = post_preview(&config, Some(&post));

            assert!(!html.contains("<h2"));
            assert!(!html.contains("Published:"));
            assert!(html.contains(r#"<div class="post-excerpt">The excerpt.</div>"#));
        }
    }

    #[test]
    fn test_preview_of_nothing() {
        let config = SiteConfig::default();
        let html = post_preview(&config, None);

        assert!(!html.contains("<h2"));
        assert!(html.contains(r#"<div class="post-excerpt"></div>"#));
        assert!(!html.contains("Read more"));
    }

    #[test]
    fn test_list_empty_collection() {
        let config = SiteConfig::default();
        assert_eq!(post_list(&config, &[], 0, 3), "");
    }

    #[test]
    fn test_list_limit_and_order() {
        let config = SiteConfig::default();
        let posts: Vec<Post> = (1..=5)
            .map(|i| sample_post(Some(&format!("Post {}", i)), "x", "x"))
            .collect();

        let html = post_list(&config, &posts, 0, 3);
        assert_eq!(html.matches("<article").count(), 3);
        let p1 = html.find("Post 1").unwrap();
        let p2 = html.find("Post 2").unwrap();
        let p3 = html.find("Post 3").unwrap();
        assert!(p1 < p2 && p2 < p3);
        assert!(!html.contains("Post 4"));
    }

    #[test]
    fn test_list_shorter_than_limit() {
        let config = SiteConfig::default();
        let posts = vec![
            sample_post(Some("Only"), "x", "x"),
            sample_post(Some("Two"), "x", "x"),
        ];
        let html = post_list(&config, &posts, 0, 3);
        assert_eq!(html.matches("<article").count(), 2);
    }

    #[test]
    fn test_list_offset_beyond_end() {
        let config = SiteConfig::default();
        let posts = vec![sample_post(Some("Only"), "x", "x")];
        assert_eq!(post_list(&config, &posts, 5, 3), "");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let config = SiteConfig::default();
        let posts = vec![
            sample_post(Some("Hello"), "Full...", "Full text here"),
            sample_post(None, "No title here", "No title here"),
        ];

        let first = post_list(&config, &posts, 0, 3);
        let second = post_list(&config, &posts, 0, 3);
        assert_eq!(first, second);
    }
}
